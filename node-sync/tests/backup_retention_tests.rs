//! Integration tests for backup bundles and the retention window

mod common;

use common::fixtures::*;
use node_sync::BackupManager;
use std::fs;
use std::time::Duration;

#[tokio::test]
async fn test_retention_deletes_only_bundles_past_seven_days() {
    let env = TestConfigBuilder::new().build();
    let now = whole_second_now();
    let six_days = write_file_with_age(env.backup_dir(), "backup_20250101_120000.tar.gz", now, 6 * DAY);
    let seven_days = write_file_with_age(env.backup_dir(), "backup_20250102_120000.tar.gz", now, 7 * DAY);
    let eight_days = write_file_with_age(env.backup_dir(), "backup_20250103_120000.tar.gz", now, 8 * DAY);

    let deleted = BackupManager::new(env.config.clone())
        .cleanup_old_backups_at(now)
        .await;

    assert_eq!(deleted, 1);
    assert!(six_days.exists());
    assert!(seven_days.exists(), "exactly seven days old is kept");
    assert!(!eight_days.exists());
}

#[tokio::test]
async fn test_retention_ignores_files_outside_naming_pattern() {
    let env = TestConfigBuilder::new().build();
    let now = whole_second_now();
    let notes = write_file_with_age(env.backup_dir(), "notes.txt", now, 30 * DAY);
    let zip = write_file_with_age(env.backup_dir(), "backup_old.zip", now, 30 * DAY);
    let tar = write_file_with_age(env.backup_dir(), "archive.tar.gz", now, 30 * DAY);

    let deleted = BackupManager::new(env.config.clone())
        .cleanup_old_backups_at(now)
        .await;

    assert_eq!(deleted, 0);
    assert!(notes.exists());
    assert!(zip.exists());
    assert!(tar.exists());
}

#[tokio::test]
async fn test_retention_on_missing_directory_deletes_nothing() {
    let env = TestConfigBuilder::new().build();
    fs::remove_dir_all(env.backup_dir()).unwrap();

    let deleted = BackupManager::new(env.config.clone()).cleanup_old_backups().await;

    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_backup_disabled_is_noop() {
    let env = TestConfigBuilder::new().backup_before_sync(false).build();
    let now = whole_second_now();
    let stale = write_file_with_age(env.backup_dir(), "backup_20240101_000000.tar.gz", now, 30 * DAY);

    let bundle = BackupManager::new(env.config.clone()).backup().await;

    assert!(bundle.is_none());
    // Retention only runs after a successful backup
    assert!(stale.exists());
    assert_eq!(fs::read_dir(env.backup_dir()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_backup_writes_named_bundle_and_prunes() {
    let env = TestConfigBuilder::new().build();
    fs::write(env.data_dir().join("player_data.json"), "{}").unwrap();
    let now = whole_second_now();
    let stale = write_file_with_age(env.backup_dir(), "backup_20240101_000000.tar.gz", now, 30 * DAY);

    let bundle = BackupManager::new(env.config.clone())
        .backup()
        .await
        .expect("tar should produce a bundle");

    let filename = bundle.file_name().unwrap().to_string_lossy().to_string();
    assert!(filename.starts_with("backup_"));
    assert!(filename.ends_with(".tar.gz"));
    assert_eq!(filename.len(), "backup_YYYYMMDD_HHMMSS.tar.gz".len());
    assert!(fs::metadata(&bundle).unwrap().len() > 0);
    assert!(!stale.exists());
}

#[tokio::test]
async fn test_list_backups_newest_first_and_stats() {
    let env = TestConfigBuilder::new().build();
    let now = whole_second_now();
    write_file_with_age(env.backup_dir(), "backup_20250101_120000.tar.gz", now, Duration::ZERO);
    write_file_with_age(env.backup_dir(), "backup_20250103_120000.tar.gz", now, Duration::ZERO);
    write_file_with_age(env.backup_dir(), "backup_20250102_000000.tar.gz", now, Duration::ZERO);
    write_file_with_age(env.backup_dir(), "unrelated.txt", now, Duration::ZERO);

    let manager = BackupManager::new(env.config.clone());
    let backups = manager.list_backups().await.unwrap();

    let names: Vec<&str> = backups.iter().map(|b| b.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "backup_20250103_120000.tar.gz",
            "backup_20250102_000000.tar.gz",
            "backup_20250101_120000.tar.gz",
        ]
    );

    let stats = manager.backup_stats().await.unwrap();
    assert_eq!(stats.total_backups, 3);
    assert_eq!(stats.total_size_bytes, 3 * "bundle".len() as u64);
    assert_eq!(
        stats.oldest_backup.unwrap().to_string(),
        "2025-01-01 12:00:00"
    );
    assert_eq!(
        stats.newest_backup.unwrap().to_string(),
        "2025-01-03 12:00:00"
    );
}

#[tokio::test]
async fn test_stats_on_empty_directory() {
    let env = TestConfigBuilder::new().build();
    let stats = BackupManager::new(env.config.clone()).backup_stats().await.unwrap();

    assert_eq!(stats.total_backups, 0);
    assert_eq!(stats.total_size_bytes, 0);
    assert!(stats.oldest_backup.is_none());
    assert!(stats.newest_backup.is_none());
}
