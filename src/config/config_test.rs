use std::{error::Error, fs, time::Duration};

use crate::config::{path, Config, LoadError};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.event_queue_size(), 32);
    assert!(config.fuse_joystick_devices());
    assert!(config.rumble_enabled());
    assert!(config.event_pump().is_none());
    assert!(!config.is_ignored("Any Device"));
}

#[test]
fn test_load_yaml() -> Result<(), Box<dyn Error>> {
    let content = r#"
event_queue_size: 8
fuse_joystick_devices: false
ignore_devices:
  - "*Consumer Control"
  - "Power Button"
event_pump:
  interval_ms: 10
rumble:
  enabled: false
"#;
    let config = Config::from_yaml(content.to_string())?;
    assert_eq!(config.event_queue_size(), 8);
    assert!(!config.fuse_joystick_devices());
    assert!(config.is_ignored("Logitech USB Receiver Consumer Control"));
    assert!(config.is_ignored("Power Button"));
    assert!(!config.is_ignored("Logitech Gamepad F310"));
    assert_eq!(config.event_pump(), Some((Duration::from_millis(10), 64)));

    let options = config.controller_options();
    assert_eq!(options.event_queue_size, 8);
    assert!(!options.rumble);

    Ok(())
}

#[test]
fn test_empty_yaml_is_default() -> Result<(), Box<dyn Error>> {
    let config = Config::from_yaml("{}".to_string())?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_invalid_yaml() {
    let result = Config::from_yaml("event_queue_size: lots".to_string());
    assert!(matches!(result, Err(LoadError::DeserializeError(_))));
}

#[test]
fn test_load_file() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("inputfuse-test-{}.yaml", std::process::id()));
    fs::write(&path, "event_queue_size: 4\n")?;
    let config = Config::from_yaml_path(&path);
    fs::remove_file(&path)?;
    assert_eq!(config?.event_queue_size(), 4);

    let missing = Config::from_yaml_file("/nonexistent/inputfuse.yaml".to_string());
    assert!(matches!(missing, Err(LoadError::IoError(_))));

    Ok(())
}

#[test]
fn test_search_path_order() {
    let paths = path::get_config_paths();
    assert_eq!(paths.first().map(|p| p.to_string_lossy().to_string()), Some("./inputfuse.yaml".to_string()));
    assert_eq!(
        paths.last().map(|p| p.to_string_lossy().to_string()),
        Some("/etc/inputfuse/config.yaml".to_string())
    );
}
