use boat_racing::domain::{ConfigError, SpeedTuning};
use boat_racing::frameworks::config::{load_tuning, save_default_config};
use boat_racing::frameworks::server::enable;
use std::{fs, path::PathBuf};

// Unique scratch path so parallel tests never share a file.
fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("boat-racing-{}", uuid::Uuid::new_v4()))
        .join("config.toml")
}

#[test]
fn when_no_config_exists_then_defaults_are_written_and_loaded() {
    let path = scratch_path();

    assert!(save_default_config(&path).expect("write defaults"));
    let text = fs::read_to_string(&path).expect("file written");
    assert!(text.contains("max-ice-speed"));
    assert!(text.contains("acceleration-amount"));

    assert_eq!(load_tuning(&path).expect("load"), SpeedTuning::default());
}

#[test]
fn when_config_already_exists_then_it_is_not_overwritten() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, "max-off-ice-speed = 0.6\ndebug = true\n").expect("seed file");

    assert!(!save_default_config(&path).expect("no-op"));

    let tuning = load_tuning(&path).expect("load");
    assert_eq!(tuning.max_off_ice_speed, 0.6);
    assert!(tuning.debug);
    assert_eq!(tuning.max_ice_speed, 1.5);
}

#[test]
fn when_config_file_is_missing_then_loading_yields_defaults() {
    let path = scratch_path();

    assert_eq!(load_tuning(&path).expect("missing is fine"), SpeedTuning::default());
}

#[test]
fn when_config_is_malformed_then_load_fails_but_enable_falls_back_to_defaults() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, "max-ice-speed = [not toml").expect("seed file");

    assert!(matches!(load_tuning(&path), Err(ConfigError::Parse(_))));
    assert_eq!(enable(&path), SpeedTuning::default());
}

#[test]
fn when_enabled_with_custom_file_then_its_values_are_used() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, "brake-factor = 0.5\n").expect("seed file");

    let tuning = enable(&path);

    assert_eq!(tuning.brake_factor, 0.5);
    assert_eq!(tuning.momentum_loss_factor, 0.92);
}

#[test]
fn when_one_value_is_invalid_then_the_other_values_still_apply() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, "max-ice-speed = 2.0\nbrake-factor = \"strong\"\n").expect("seed file");

    let tuning = enable(&path);

    assert_eq!(tuning.max_ice_speed, 2.0);
    assert_eq!(tuning.brake_factor, 0.85);
}
