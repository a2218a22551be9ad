//! Loading profiles from disk

use std::fs;

use agroguard_profiles::{ModelProfile, ProfileError, ProfileRegistry};

const BUNDLED: &str = include_str!("../profiles/cucumber_multimodal_v1.json");

#[test]
fn loads_every_json_file_in_directory() {
    let dir = tempfile::tempdir().unwrap();

    let v1 = ModelProfile::from_json(BUNDLED).unwrap();
    let mut v2 = v1.clone();
    v2.version = "v2".to_string();
    v2.model_asset = "cucumber_multimodal_v2.tflite".to_string();

    fs::write(dir.path().join("a.json"), v1.to_json().unwrap()).unwrap();
    fs::write(dir.path().join("b.json"), v2.to_json().unwrap()).unwrap();
    fs::write(dir.path().join("README.txt"), "not a profile").unwrap();

    let registry = ProfileRegistry::new();
    assert_eq!(registry.load_dir(dir.path()).unwrap(), 2);

    let latest = registry.get_latest("cucumber_multimodal").unwrap();
    assert_eq!(latest.model_asset, "cucumber_multimodal_v2.tflite");
}

#[test]
fn broken_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ \"name\": ").unwrap();

    let registry = ProfileRegistry::new();
    assert!(matches!(registry.load_dir(dir.path()), Err(ProfileError::Parse(_))));
}

#[test]
fn missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ProfileRegistry::new();
    assert!(matches!(
        registry.load_dir(dir.path().join("nope")),
        Err(ProfileError::Io(_))
    ));
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(&path, BUNDLED).unwrap();

    let profile = ModelProfile::from_path(&path).unwrap();
    assert_eq!(profile.qualified_name(), "cucumber_multimodal_v1");
}
