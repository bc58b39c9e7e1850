mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;

use tempfile::tempdir;

use loopviz::config::{load_and_validate, load_from_path, load_or_default, ConfigFile};
use loopviz::errors::SimError;
use loopviz::types::SpeedMs;
use loopviz_test_utils::builders::ConfigFileBuilder;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_config_is_loaded_and_presets_merged() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("Loopviz.toml");
    fs::write(
        &path,
        r#"
[config]
speed_ms = 600
example = "mine"

[preset.mine]
name = "Mine"
description = "one tick"
code = """
console.log('go');
process.nextTick(() => console.log('tick'));
"""

[preset.basic]
code = "console.log('overridden');"
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.speed(), SpeedMs(600));
    assert_eq!(cfg.default_example(), "mine");

    let catalog = cfg.catalog();
    assert_eq!(catalog.len(), 7);
    let mine = catalog.get("mine").expect("configured preset");
    assert_eq!(mine.name, "Mine");
    assert!(mine.code.contains("process.nextTick"));

    // Overrides keep their position and take the key as name.
    assert_eq!(catalog.keys().next(), Some("basic"));
    let basic = catalog.get("basic").expect("overridden preset");
    assert_eq!(basic.code, "console.log('overridden');");
    assert_eq!(basic.name, "basic");
    Ok(())
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("empty.toml");
    fs::write(&path, "")?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.speed(), SpeedMs(SpeedMs::DEFAULT));
    assert_eq!(cfg.default_example(), "basic");
    assert_eq!(cfg.catalog().len(), 6);
    Ok(())
}

#[test]
fn explicit_path_must_exist() {
    init_tracing();

    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    let err = load_or_default(Some(&missing)).expect_err("missing file");
    assert!(matches!(err, SimError::IoError(_)));
}

#[test]
fn malformed_toml_is_reported() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[config\nspeed_ms = ")?;

    let err = load_from_path(&path).expect_err("parse error");
    assert!(matches!(err, SimError::TomlError(_)));
    Ok(())
}

#[test]
fn speed_outside_bounds_is_rejected() {
    init_tracing();

    for ms in [0, 299, 2001] {
        let raw = ConfigFileBuilder::new().speed_ms(ms).raw();
        let err = ConfigFile::try_from(raw).expect_err("out of range");
        assert!(matches!(err, SimError::ConfigError(ref m) if m.contains("speed_ms")));
    }

    for ms in [300, 2000] {
        let cfg = ConfigFileBuilder::new().speed_ms(ms).build();
        assert_eq!(cfg.speed(), SpeedMs(ms));
    }
}

#[test]
fn default_example_must_exist() {
    init_tracing();

    let raw = ConfigFileBuilder::new().example("missing").raw();
    let err = ConfigFile::try_from(raw).expect_err("unknown example");
    assert!(matches!(err, SimError::ConfigError(ref m) if m.contains("missing")));

    let cfg = ConfigFileBuilder::new()
        .with_preset("mine", "console.log('x');")
        .example("mine")
        .build();
    assert_eq!(cfg.default_example(), "mine");

    let cfg = ConfigFileBuilder::new().example("nestedTimers").build();
    assert_eq!(cfg.default_example(), "nestedTimers");
}

#[test]
fn preset_code_must_not_be_blank() {
    init_tracing();

    let raw = ConfigFileBuilder::new().with_preset("blank", "   \n").raw();
    let err = ConfigFile::try_from(raw).expect_err("blank code");
    assert!(matches!(err, SimError::ConfigError(ref m) if m.contains("blank")));
}

#[test]
fn speed_flag_parses_within_bounds() {
    assert_eq!("750".parse::<SpeedMs>(), Ok(SpeedMs(750)));
    assert!("100".parse::<SpeedMs>().is_err());
    assert!("fast".parse::<SpeedMs>().is_err());
}
