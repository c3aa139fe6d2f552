// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[test]
fn missing_town_toml_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let document = Config::load_document(&dir.path().join("town.toml")).unwrap();
    assert_eq!(document.queue, EngineConfig::default());
    assert!(document.patrols.is_empty());
}

#[test]
fn town_toml_overrides_queue_limits_and_patrol_cadence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("town.toml");
    std::fs::write(
        &path,
        r#"
        [queue]
        max_concurrent = 8
        batch_size = 2
        spawn_delay_ms = 250

        [patrols.stranded_scan]
        enabled = false
        interval_secs = 60
        "#,
    )
    .unwrap();

    let document = Config::load_document(&path).unwrap();
    assert_eq!(document.queue.max_concurrent, 8);
    assert_eq!(document.queue.batch_size, 2);
    assert_eq!(document.queue.spawn_delay_ms, 250);

    let override_ = document.patrols.get("stranded_scan").unwrap();
    assert!(!override_.enabled);
    assert_eq!(override_.interval_secs, 60);
}

#[test]
fn patrol_falls_back_to_default_interval_when_unconfigured() {
    let document = TownDocument::default();
    let config = Config {
        state_dir: PathBuf::new(),
        socket_path: PathBuf::new(),
        lock_path: PathBuf::new(),
        routing_path: PathBuf::new(),
        town_toml_path: PathBuf::new(),
        document,
    };

    let patrol = config.patrol("event_poll", Duration::from_secs(5));
    assert!(patrol.enabled);
    assert_eq!(patrol.interval_secs, 5);
}
