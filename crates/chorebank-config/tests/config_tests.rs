use chorebank_config::{Config, ConfigManager};
use rust_decimal::Decimal;

#[test]
fn load_returns_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.default_points_to_money_rate, Config::default_rate());
    assert!(!config.auto_approve_default);
    assert_eq!(config.backup_retention, 5);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

    let mut config = Config::default();
    config.default_points_to_money_rate = Decimal::new(25, 2);
    config.auto_approve_default = true;
    config.backup_retention = 9;
    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.default_points_to_money_rate, Decimal::new(25, 2));
    assert!(loaded.auto_approve_default);
    assert_eq!(loaded.backup_retention, 9);
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

    manager.save(&Config::default()).unwrap();
    let mut updated = Config::default();
    updated.backup_retention = 2;
    manager.save(&updated).unwrap();

    assert_eq!(manager.load().unwrap().backup_retention, 2);
}

#[test]
fn resolve_data_dir_prefers_explicit_override() {
    let mut config = Config::default();
    config.data_dir = Some(std::path::PathBuf::from("/tmp/chorebank-test"));
    assert_eq!(
        config.resolve_data_dir(),
        std::path::PathBuf::from("/tmp/chorebank-test")
    );
}
