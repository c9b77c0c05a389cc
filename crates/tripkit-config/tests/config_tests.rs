use tempfile::TempDir;

use tripkit_config::{ConfigManager, Preferences, Theme};
use tripkit_domain::{MemberDirectory, MemberProfile, Tag, GENERAL_TAG};

fn manager_with_temp_dir() -> (ConfigManager, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::new(temp.path().join("config")).expect("manager");
    (manager, temp)
}

#[test]
fn absent_records_load_as_defaults() {
    let (manager, _guard) = manager_with_temp_dir();
    assert_eq!(manager.load_preferences().unwrap(), Preferences::default());
    assert!(manager.load_member_directory().unwrap().profiles.is_empty());

    let palette = manager.load_tag_palette().unwrap();
    assert_eq!(palette[0].name, GENERAL_TAG);
}

#[test]
fn preferences_roundtrip() {
    let (manager, _guard) = manager_with_temp_dir();
    let prefs = Preferences {
        theme: Theme::Sunset,
    };
    manager.save_preferences(&prefs).unwrap();
    assert_eq!(manager.load_preferences().unwrap(), prefs);
}

#[test]
fn palette_regains_general_tag_after_bad_save() {
    let (manager, _guard) = manager_with_temp_dir();
    let palette = vec![Tag::new("snacks", "yellow")];
    manager.save_tag_palette(&palette).unwrap();

    let loaded = manager.load_tag_palette().unwrap();
    assert_eq!(loaded[0].name, GENERAL_TAG);
    assert!(loaded.iter().any(|tag| tag.name == "snacks"));
}

#[test]
fn member_directory_roundtrip() {
    let (manager, _guard) = manager_with_temp_dir();
    let mut directory = MemberDirectory::default();
    directory.upsert(
        "Alice",
        MemberProfile {
            note: "window seat".into(),
            avatar: None,
        },
    );
    manager.save_member_directory(&directory).unwrap();

    let loaded = manager.load_member_directory().unwrap();
    assert_eq!(loaded.profile("Alice").unwrap().note, "window seat");
}
