use super::builder::default_config_content;
use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn located(latitude: f64, longitude: f64) -> Config {
    Config {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..Config::default()
    }
}

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("daylightr").join("daylightr.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.latitude, None);
    assert!(config.coordinate().is_err());
    assert_eq!(config.milestone_settings(), MilestoneSettings::default());
}

#[test]
fn test_default_content_parses_and_validates() {
    let config: Config = toml::from_str(&default_config_content()).unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.daylight_hours, Some(vec![10, 12]));
    assert_eq!(config.gain_minutes, Some(vec![60, 120]));
    assert_eq!(config.track_equinox, Some(true));
    assert_eq!(config.search_window_days, Some(180));
}

#[test]
fn test_default_content_aligns_comments() {
    let content = default_config_content();
    let columns: Vec<usize> = content
        .lines()
        .filter(|line| !line.starts_with("#[") && !line.is_empty())
        .map(|line| line.rfind("# ").unwrap())
        .collect();
    assert!(columns.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_load_from_path_full_config() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"
latitude = 44.9778
longitude = -93.2650
timezone = "America/Chicago"
daylight_hours = [9, 11, 13]
gain_minutes = [30]
track_equinox = false
search_window_days = 90
state_dir = "/tmp/daylightr-state"
"#,
    );

    let config = load_from_path(&path).unwrap();
    let coordinate = config.coordinate().unwrap();
    assert_eq!(coordinate.latitude(), 44.9778);
    assert_eq!(
        config.resolve_timezone(coordinate).unwrap(),
        chrono_tz::America::Chicago
    );

    let settings = config.milestone_settings();
    assert_eq!(settings.daylight_hours, vec![9, 11, 13]);
    assert_eq!(settings.gain_minutes, vec![30]);
    assert!(!settings.track_equinox);
    assert_eq!(settings.search_window_days, 90);
    assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/daylightr-state")));
}

#[test]
fn test_timezone_detected_when_omitted() {
    let config = located(51.5074, -0.1278);
    let coordinate = config.coordinate().unwrap();
    assert_eq!(
        config.resolve_timezone(coordinate).unwrap(),
        chrono_tz::Europe::London
    );
}

#[test]
fn test_load_from_missing_path_fails() {
    let temp_dir = tempdir().unwrap();
    let result = load_from_path(&temp_dir.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_from_path_rejects_malformed_toml() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "latitude = [oops");
    let error = load_from_path(&path).unwrap_err();
    assert!(format!("{error:#}").contains("Failed to parse config"));
}

#[test]
fn test_validation_coordinate_ranges() {
    assert!(validate_config(&located(44.9, -93.2)).is_ok());
    assert!(validate_config(&located(90.0, 180.0)).is_ok());
    assert!(validate_config(&located(91.0, 0.0)).is_err());
    assert!(validate_config(&located(0.0, -181.0)).is_err());

    let half = Config {
        latitude: Some(10.0),
        ..Config::default()
    };
    let error = validate_config(&half).unwrap_err();
    assert!(error.to_string().contains("set together"));
}

#[test]
fn test_validation_search_window_range() {
    for (days, ok) in [(29, false), (30, true), (180, true), (366, true), (367, false)] {
        let config = Config {
            search_window_days: Some(days),
            ..Config::default()
        };
        assert_eq!(validate_config(&config).is_ok(), ok, "search_window_days = {days}");
    }
}

#[test]
fn test_validation_thresholds() {
    let hours = |values: Vec<u32>| Config {
        daylight_hours: Some(values),
        ..Config::default()
    };
    assert!(validate_config(&hours(vec![1, 23])).is_ok());
    assert!(validate_config(&hours(vec![])).is_ok());
    assert!(validate_config(&hours(vec![0])).is_err());
    assert!(validate_config(&hours(vec![24])).is_err());

    let error = validate_config(&hours(vec![10, 12, 10])).unwrap_err();
    assert!(error.to_string().contains("more than once"));

    let gain = Config {
        gain_minutes: Some(vec![601]),
        ..Config::default()
    };
    let error = validate_config(&gain).unwrap_err();
    assert!(error.to_string().contains("gain_minutes"));
}

#[test]
fn test_validation_rejects_unknown_timezone() {
    let config = Config {
        timezone: Some("Atlantis/Capital".to_string()),
        ..located(0.0, 0.0)
    };
    assert!(validate_config(&config).is_err());
}
