//! Classification results for a storage device

use serde::Serialize;
use std::fmt;

/// The source that settled a rotational classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationEvidence {
    /// udev `ID_SSD` property
    SsdFlag,
    /// udev `ID_ATA_ROTATION_RATE_RPM` property
    AtaRotationRate,
    /// udev `ID_ATA_FEATURE_SET_AAM` property
    AcousticManagement,
    /// sysfs `queue/rotational` attribute
    QueueAttribute,
    /// "SSD" in the model string
    ModelHeuristic,
}

impl fmt::Display for RotationEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationEvidence::SsdFlag => write!(f, "ID_SSD"),
            RotationEvidence::AtaRotationRate => write!(f, "ID_ATA_ROTATION_RATE_RPM"),
            RotationEvidence::AcousticManagement => write!(f, "ID_ATA_FEATURE_SET_AAM"),
            RotationEvidence::QueueAttribute => write!(f, "queue/rotational"),
            RotationEvidence::ModelHeuristic => write!(f, "model"),
        }
    }
}

/// Outcome of the rotational decision chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub rotational: bool,
    pub evidence: RotationEvidence,
}

impl Classification {
    pub fn new(rotational: bool, evidence: RotationEvidence) -> Self {
        Self {
            rotational,
            evidence,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        if self.rotational {
            MediaKind::Hdd
        } else {
            MediaKind::Ssd
        }
    }
}

/// Physical medium of a storage device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Hdd,
    Ssd,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Hdd => write!(f, "HDD"),
            MediaKind::Ssd => write!(f, "SSD"),
        }
    }
}
