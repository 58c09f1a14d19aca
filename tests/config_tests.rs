use std::path::PathBuf;
use std::time::Duration;

use wallpaper_rotator::config::{Configuration, normalize_path};

#[test]
fn defaults_apply_to_empty_document() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.wallpaper_root, PathBuf::from("./wallpapers"));
    assert_eq!(cfg.cache_capacity, 128);
    assert_eq!(cfg.rotation_interval, Duration::from_millis(2500));
    assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
    assert_eq!(cfg.manifest_path, PathBuf::from("wallpapers.json"));
    assert_eq!(cfg.state_path, PathBuf::from("runtime.json"));
    assert_eq!(cfg.extensions, vec!["jpg", "jpeg", "png", "webp"]);
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
wallpaper-root: "/walls"
cache-capacity: 16
rotation-interval: 500ms
refresh-interval: 2m
manifest-path: "/tmp/m.json"
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.wallpaper_root, PathBuf::from("/walls"));
    assert_eq!(cfg.cache_capacity, 16);
    assert_eq!(cfg.rotation_interval, Duration::from_millis(500));
    assert_eq!(cfg.refresh_interval, Duration::from_secs(120));
    assert_eq!(cfg.manifest_path, PathBuf::from("/tmp/m.json"));
    assert_eq!(cfg.state_path, PathBuf::from("runtime.json"));
}

#[test]
fn validation_rejects_zero_capacity() {
    let cfg: Configuration = serde_yaml::from_str("cache-capacity: 0").unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(err.to_string().contains("cache-capacity"));
}

#[test]
fn validation_rejects_zero_interval() {
    let cfg: Configuration = serde_yaml::from_str("rotation-interval: 0s").unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn validation_normalizes_root_and_extensions() {
    let yaml = r#"
wallpaper-root: "walls"
extensions: [".JPG", "Png"]
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert!(cfg.wallpaper_root.is_absolute());
    assert!(cfg.wallpaper_root.ends_with("walls"));
    assert_eq!(cfg.extensions, vec!["jpg", "png"]);
}

#[test]
fn tilde_expands_from_home() {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let resolved = normalize_path(&PathBuf::from("~/pictures")).unwrap();
    assert_eq!(resolved, PathBuf::from(home).join("pictures"));
}

#[test]
fn from_yaml_file_reads_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    std::fs::write(&path, "cache-capacity: 3\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.cache_capacity, 3);
}
