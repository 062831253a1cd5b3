use sealant_kernel::config::load_config;
use sealant_kernel::domain::config::GeneratorConfig;
use sealant_kernel::domain::features::FeatureSet;
use serial_test::serial;
use std::io::Write;

#[test]
#[serial]
fn defaults_without_file() {
    let cfg: GeneratorConfig = load_config(None::<&str>).unwrap();
    assert_eq!(cfg, GeneratorConfig::default());
}

#[test]
#[serial]
fn toml_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
features = ["fragment", "work"]
fail_fast = true

[output]
dir = "out/generated"
manifest = false
"#
    )
    .unwrap();

    let cfg: GeneratorConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.features, FeatureSet::FRAGMENT | FeatureSet::WORK);
    assert!(cfg.fail_fast);
    assert_eq!(cfg.output.dir, std::path::PathBuf::from("out/generated"));
    assert!(!cfg.output.manifest);
    assert_eq!(cfg.header.title, "Generated by Sealant.");
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config::<GeneratorConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.kind(), "Config");
}
