use ivolution::config::*;
use ivolution::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WORKER_COMMAND};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_ivolution_config_default() {
    let config = IvolutionConfig::default();

    assert_eq!(config.window_mode, WindowMode::Full);
    assert_eq!(config.worker_command, DEFAULT_WORKER_COMMAND);
    assert!(config.worker_args.is_empty());
    assert_eq!(config.root_folder, PathBuf::new());
    assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
}

#[test]
#[serial]
fn test_config_roundtrip_save_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let original = IvolutionConfig {
        window_mode: WindowMode::Minimal,
        worker_command: "python".to_string(),
        worker_args: vec!["facemovie/Facemovie.py".to_string()],
        root_folder: PathBuf::from("/opt/ivolution"),
        poll_interval_ms: 250,
    };

    original.save_to(&config_path).expect("Failed to save config");
    assert!(config_path.exists());

    let loaded = IvolutionConfig::load_from(&config_path);
    assert_eq!(original, loaded);
}

#[test]
#[serial]
fn test_config_load_nonexistent() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = IvolutionConfig::load_from(&temp_dir.path().join("missing.toml"));
    assert_eq!(config, IvolutionConfig::default());
}

#[test]
#[serial]
fn test_config_invalid_toml_fallback() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let corrupted = vec![
        ("", "Empty file"),
        ("invalid toml content [[[", "Invalid TOML syntax"),
        ("window_mode = \"sideways\"", "Unknown window mode"),
        ("poll_interval_ms = \"fast\"", "Wrong type"),
    ];

    for (index, (content, description)) in corrupted.into_iter().enumerate() {
        let path = temp_dir.path().join(format!("config_{}.toml", index));
        fs::write(&path, content).expect("Failed to write config");

        let config = IvolutionConfig::load_from(&path);
        assert_eq!(config, IvolutionConfig::default(), "{} should fall back to defaults", description);
    }
}

#[test]
fn test_window_mode_serialized_lowercase() {
    let content = toml::to_string_pretty(&IvolutionConfig::default()).expect("Failed to serialize config");
    assert!(content.contains("window_mode = \"full\""));
    assert!(content.contains("worker_command = \"facemovie\""));
}

#[test]
fn test_config_path_is_named_after_app() {
    if let Ok(path) = IvolutionConfig::config_path() {
        assert!(path.ends_with("config.toml"));
        let app_dir = path.parent().and_then(|p| p.file_name()).unwrap();
        assert!(app_dir.eq_ignore_ascii_case("ivolution"));
    }
}
