//! Rotational media decision rules
//!
//! Each property rule inspects one udev property and either settles the
//! question (`Some`) or leaves it to the next rule (`None`). A present
//! `queue/rotational` attribute is always conclusive, and the model string
//! is the last resort. The resolver evaluates them in order:
//!
//! 1. `ID_SSD`
//! 2. `ID_ATA_ROTATION_RATE_RPM`
//! 3. `ID_ATA_FEATURE_SET_AAM`
//! 4. sysfs `queue/rotational`
//! 5. "SSD" in the model string

use crate::domain::entities::{Classification, PropertyMap, RotationEvidence};

pub const ID_SSD: &str = "ID_SSD";
pub const ID_ATA_ROTATION_RATE_RPM: &str = "ID_ATA_ROTATION_RATE_RPM";
pub const ID_ATA_FEATURE_SET_AAM: &str = "ID_ATA_FEATURE_SET_AAM";

/// A rule keyed on a single device property.
///
/// The property only has to be present to be conclusive: the exact `"0"`
/// sentinel maps to one answer, every other value to the opposite one.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRule {
    pub property: &'static str,
    pub evidence: RotationEvidence,
    rotational_when_zero: bool,
}

impl PropertyRule {
    pub fn decide(&self, properties: &PropertyMap) -> Option<bool> {
        properties
            .is_zero(self.property)
            .map(|zero| zero == self.rotational_when_zero)
    }
}

/// Property rules in precedence order
pub const PROPERTY_RULES: [PropertyRule; 3] = [
    // "0" means "not an SSD"
    PropertyRule {
        property: ID_SSD,
        evidence: RotationEvidence::SsdFlag,
        rotational_when_zero: true,
    },
    // 0 RPM is the solid-state sentinel; anything else, even garbage, is spinning
    PropertyRule {
        property: ID_ATA_ROTATION_RATE_RPM,
        evidence: RotationEvidence::AtaRotationRate,
        rotational_when_zero: false,
    },
    // acoustic management only exists on spinning drives
    PropertyRule {
        property: ID_ATA_FEATURE_SET_AAM,
        evidence: RotationEvidence::AcousticManagement,
        rotational_when_zero: false,
    },
];

/// Applies the property rules in order; the first conclusive one wins
pub fn classify_properties(properties: &PropertyMap) -> Option<Classification> {
    PROPERTY_RULES.iter().find_map(|rule| {
        rule.decide(properties)
            .map(|rotational| Classification::new(rotational, rule.evidence))
    })
}

/// Interprets the content of `queue/rotational`.
///
/// A present attribute always settles the question; only `1` means spinning.
pub fn classify_queue_attribute(value: &str) -> bool {
    value.trim() == "1"
}

/// Last resort: anything not calling itself an SSD is assumed to spin
pub fn classify_model(model: &str) -> bool {
    !model.to_ascii_uppercase().contains("SSD")
}
