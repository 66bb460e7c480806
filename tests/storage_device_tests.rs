//! Storage device resolver tests
//!
//! A temporary directory stands in for `/sys/block` and `/dev`; udev is
//! replaced by an in-memory property source.

use blockprobe::{
    Classification, DeviceLookupError, DevicePropertySource, PropertyMap, RotationEvidence,
    StorageDevice, StorageDeviceError, SysfsAttributes,
};
use proptest::prelude::*;
use rstest::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test doubles and fixtures
// ============================================================================

/// Property source returning a fixed map, or failing the lookup
#[derive(Clone)]
struct StaticProperties(Option<PropertyMap>);

impl StaticProperties {
    fn with(pairs: &[(&str, &str)]) -> Self {
        Self(Some(pairs.iter().copied().collect()))
    }

    fn unknown() -> Self {
        Self(None)
    }
}

impl DevicePropertySource for StaticProperties {
    fn properties(&self, device_path: &Path) -> Result<PropertyMap, DeviceLookupError> {
        self.0
            .clone()
            .ok_or_else(|| DeviceLookupError::NotBlockDevice {
                path: device_path.to_path_buf(),
            })
    }
}

/// Fake system root with `sys/block` and `dev` directories
struct FakeSystem {
    dir: TempDir,
}

impl FakeSystem {
    fn sys_block(&self) -> PathBuf {
        self.dir.path().join("sys/block")
    }

    fn dev(&self, name: &str) -> PathBuf {
        self.dir.path().join("dev").join(name)
    }

    fn attribute(&self, device: &str, attribute: &str, content: &str) {
        let path = self.sys_block().join(device).join(attribute);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn device(
        &self,
        path: &Path,
        properties: StaticProperties,
    ) -> StorageDevice<StaticProperties, SysfsAttributes> {
        StorageDevice::with_sources(path, properties, SysfsAttributes::new(self.sys_block()))
            .unwrap()
    }
}

fn fake_system() -> FakeSystem {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("sys/block")).unwrap();
    fs::create_dir_all(dir.path().join("dev/disk/by-id")).unwrap();
    fs::write(dir.path().join("dev/sda"), b"").unwrap();
    FakeSystem { dir }
}

#[fixture]
fn system() -> FakeSystem {
    fake_system()
}

// ============================================================================
// Model
// ============================================================================

#[rstest]
fn test_model(system: FakeSystem) {
    system.attribute("sda", "device/model", "FooBar\n");
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());

    assert_eq!(device.model().unwrap(), "FooBar");
}

#[rstest]
fn test_model_absent_is_empty(system: FakeSystem) {
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());
    assert_eq!(device.model().unwrap(), "");
}

// ============================================================================
// Rotational decision chain
// ============================================================================

#[rstest]
#[case::ssd_flag_zero(&[("ID_SSD", "0")], true)]
#[case::ssd_flag_one(&[("ID_SSD", "1")], false)]
#[case::rpm_zero(&[("ID_ATA_ROTATION_RATE_RPM", "0")], false)]
#[case::rpm_nonzero(&[("ID_ATA_ROTATION_RATE_RPM", "1000")], true)]
#[case::rpm_garbage(&[("ID_ATA_ROTATION_RATE_RPM", "n/a")], true)]
#[case::aam_zero(&[("ID_ATA_FEATURE_SET_AAM", "0")], false)]
#[case::aam_one(&[("ID_ATA_FEATURE_SET_AAM", "1")], true)]
fn test_rotational_from_properties(
    system: FakeSystem,
    #[case] properties: &[(&str, &str)],
    #[case] expected: bool,
) {
    let device = system.device(&system.dev("sda"), StaticProperties::with(properties));
    assert_eq!(device.is_rotational().unwrap(), expected);
}

#[rstest]
#[case::spinning("1\n", true)]
#[case::solid_state("0\n", false)]
fn test_rotational_from_queue_attribute(
    system: FakeSystem,
    #[case] content: &str,
    #[case] expected: bool,
) {
    system.attribute("sda", "queue/rotational", content);
    let device = system.device(&system.dev("sda"), StaticProperties::with(&[]));

    let classification = device.classify_rotation().unwrap();
    assert_eq!(
        classification,
        Classification::new(expected, RotationEvidence::QueueAttribute)
    );
}

#[rstest]
fn test_unexpected_queue_content_wins_over_model(system: FakeSystem) {
    system.attribute("sda", "queue/rotational", "2\n");
    system.attribute("sda", "device/model", "Foo Bar\n");
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());

    let classification = device.classify_rotation().unwrap();
    assert_eq!(
        classification,
        Classification::new(false, RotationEvidence::QueueAttribute)
    );
}

#[rstest]
fn test_lookup_failure_falls_back_to_queue_attribute(system: FakeSystem) {
    system.attribute("sda", "queue/rotational", "0\n");
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());

    assert!(!device.is_rotational().unwrap());
}

#[rstest]
#[case::ssd_in_model("I am a SSD\n", false)]
#[case::lowercase("fast ssd drive\n", false)]
#[case::plain_model("Foo Bar\n", true)]
fn test_rotational_from_model(system: FakeSystem, #[case] model: &str, #[case] expected: bool) {
    system.attribute("sda", "device/model", model);
    let device = system.device(&system.dev("sda"), StaticProperties::with(&[]));

    let classification = device.classify_rotation().unwrap();
    assert_eq!(classification.rotational, expected);
    assert_eq!(classification.evidence, RotationEvidence::ModelHeuristic);
}

#[rstest]
fn test_nothing_known_defaults_to_rotational(system: FakeSystem) {
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());
    assert!(device.is_rotational().unwrap());
}

#[rstest]
fn test_property_wins_over_queue_attribute(system: FakeSystem) {
    system.attribute("sda", "queue/rotational", "1\n");
    let device = system.device(&system.dev("sda"), StaticProperties::with(&[("ID_SSD", "1")]));

    assert!(!device.is_rotational().unwrap());
}

#[rstest]
fn test_repeated_calls_agree(system: FakeSystem) {
    system.attribute("sda", "queue/rotational", "1\n");
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());

    let first = device.classify_rotation().unwrap();
    for _ in 0..5 {
        assert_eq!(device.classify_rotation().unwrap(), first);
    }
}

#[rstest]
fn test_queries_see_live_state(system: FakeSystem) {
    system.attribute("sda", "queue/rotational", "1\n");
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());
    assert!(device.is_rotational().unwrap());

    system.attribute("sda", "queue/rotational", "0\n");
    assert!(!device.is_rotational().unwrap());
}

// ============================================================================
// Path resolution
// ============================================================================

#[cfg(unix)]
#[rstest]
fn test_symlink_resolves_to_kernel_name(system: FakeSystem) {
    let link = system.dev("disk/by-id/ata-Foo_Bar_123");
    std::os::unix::fs::symlink("../../sda", &link).unwrap();
    system.attribute("sda", "queue/rotational", "0\n");
    system.attribute("ata-Foo_Bar_123", "queue/rotational", "1\n");

    let device = system.device(&link, StaticProperties::unknown());
    assert_eq!(device.device_name().unwrap(), "sda");
    assert_eq!(device.sysfs_path().unwrap(), system.sys_block().join("sda"));
    assert!(!device.is_rotational().unwrap());
}

#[cfg(unix)]
#[rstest]
fn test_dangling_symlink_resolves_to_target_name(system: FakeSystem) {
    let link = system.dev("disk/by-id/ata-Real_Model_XYZ");
    std::os::unix::fs::symlink("../../sdc", &link).unwrap();
    system.attribute("sdc", "device/model", "Real Model\n");

    let device = system.device(&link, StaticProperties::unknown());
    assert_eq!(device.device_name().unwrap(), "sdc");
    assert_eq!(device.model().unwrap(), "Real Model");
}

#[rstest]
fn test_missing_node_uses_given_name(system: FakeSystem) {
    system.attribute("sdq", "device/model", "Ghost\n");
    let device = system.device(&system.dev("sdq"), StaticProperties::unknown());

    assert_eq!(device.device_name().unwrap(), "sdq");
    assert_eq!(device.model().unwrap(), "Ghost");
}

#[rstest]
fn test_empty_path_is_rejected() {
    let result = StorageDevice::with_sources(
        "",
        StaticProperties::unknown(),
        SysfsAttributes::default(),
    );
    assert!(matches!(result, Err(StorageDeviceError::InvalidPath(_))));
}

#[cfg(unix)]
#[rstest]
fn test_unreadable_attribute_is_an_error(system: FakeSystem) {
    // a directory where a file is expected cannot be read as text
    fs::create_dir_all(system.sys_block().join("sda/queue/rotational")).unwrap();
    let device = system.device(&system.dev("sda"), StaticProperties::unknown());

    assert!(matches!(
        device.is_rotational(),
        Err(StorageDeviceError::Sysfs(_))
    ));
}

// ============================================================================
// Report
// ============================================================================

#[rstest]
fn test_report(system: FakeSystem) {
    system.attribute("sda", "device/model", "WDC WD10EZEX-08W\n");
    system.attribute("sda", "device/vendor", "ATA     \n");
    system.attribute("sda", "size", "1953525168\n");
    system.attribute("sda", "removable", "0\n");
    system.attribute("sda", "ro", "0\n");
    let properties = StaticProperties::with(&[
        ("ID_ATA_ROTATION_RATE_RPM", "7200"),
        ("ID_SERIAL_SHORT", "WD-WCC6Y0123456"),
        ("DEVLINKS", "/dev/disk/by-id/ata-WDC_WD10EZEX /dev/disk/by-path/pci-0-ata-1"),
    ]);

    let report = system.device(&system.dev("sda"), properties).report().unwrap();

    assert_eq!(report.name, "sda");
    assert_eq!(report.model, "WDC WD10EZEX-08W");
    assert_eq!(report.vendor, "ATA");
    assert_eq!(report.serial, "WD-WCC6Y0123456");
    assert_eq!(report.size, 1_000_204_886_016);
    assert!(report.rotational);
    assert_eq!(report.evidence, RotationEvidence::AtaRotationRate);
    assert_eq!(report.device_links.len(), 2);
    assert!(!report.removable);
}

// ============================================================================
// Precedence properties
// ============================================================================

proptest! {
    #[test]
    fn prop_ssd_flag_overrides_everything(
        ssd in prop::sample::select(vec!["0", "1"]),
        rpm in prop::option::of("[0-9]{1,5}"),
        aam in prop::option::of("[01]"),
        queue in "[01]",
        model in "[A-Za-z ]{0,20}",
    ) {
        let system = fake_system();
        system.attribute("sda", "queue/rotational", &queue);
        system.attribute("sda", "device/model", &model);

        let mut pairs = vec![("ID_SSD", ssd.to_string())];
        if let Some(rpm) = rpm {
            pairs.push(("ID_ATA_ROTATION_RATE_RPM", rpm));
        }
        if let Some(aam) = aam {
            pairs.push(("ID_ATA_FEATURE_SET_AAM", aam));
        }
        let properties = StaticProperties(Some(pairs.into_iter().collect()));

        let device = system.device(&system.dev("sda"), properties);
        prop_assert_eq!(device.is_rotational().unwrap(), ssd == "0");
    }

    #[test]
    fn prop_queue_attribute_overrides_model(
        queue in prop::sample::select(vec!["0", "1"]),
        model in "[A-Za-z ]{0,20}",
    ) {
        let system = fake_system();
        system.attribute("sda", "queue/rotational", queue);
        system.attribute("sda", "device/model", &model);

        let device = system.device(&system.dev("sda"), StaticProperties::unknown());
        prop_assert_eq!(device.is_rotational().unwrap(), queue == "1");
    }
}
