use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_env() {
    let cfg = AssistantConfig::from_lookup(lookup_from(&[]));
    assert_eq!(cfg.guest_delay, Duration::from_millis(1000));
    assert_eq!(cfg.storage_dir, default_storage_dir());
}

#[test]
fn reads_overrides() {
    let cfg = AssistantConfig::from_lookup(lookup_from(&[
        ("ASSISTANT_GUEST_DELAY_MS", " 250 "),
        ("ASSISTANT_STORAGE_DIR", "/tmp/healiofy-test"),
    ]));
    assert_eq!(cfg.guest_delay, Duration::from_millis(250));
    assert_eq!(cfg.storage_dir, PathBuf::from("/tmp/healiofy-test"));
}

#[test]
fn bad_delay_and_blank_dir_fall_back() {
    let cfg = AssistantConfig::from_lookup(lookup_from(&[
        ("ASSISTANT_GUEST_DELAY_MS", "soon"),
        ("ASSISTANT_STORAGE_DIR", "  "),
    ]));
    assert_eq!(cfg.guest_delay, DEFAULT_GUEST_DELAY);
    assert_eq!(cfg.storage_dir, default_storage_dir());
}

#[test]
fn default_dir_ends_with_app_name() {
    assert!(default_storage_dir().ends_with(STORAGE_DIR_NAME) || default_storage_dir().ends_with(".healiofy"));
}
