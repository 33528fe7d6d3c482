use pn_assets::{AssetRegistry, NewPipe, NewStation};
use pn_core::CapacityClass;
use pn_store::*;

fn sample_registry() -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    let a = registry
        .add_pipe(NewPipe {
            name: "Main line west".to_string(),
            length_km: 120.5,
            diameter: CapacityClass::from_mm(1400).unwrap(),
        })
        .unwrap();
    registry
        .add_pipe(NewPipe {
            name: "Spur".to_string(),
            length_km: 3.0,
            diameter: CapacityClass::from_mm(500).unwrap(),
        })
        .unwrap();
    registry.toggle_repair(&[a]).unwrap();
    registry
        .add_station(NewStation {
            name: "Compressor North".to_string(),
            total_workshops: 6,
            working_workshops: 4,
            class: 3,
        })
        .unwrap();
    registry
}

#[test]
fn save_and_load_data_file() {
    let temp_dir = std::env::temp_dir().join("pn_store_test_roundtrip");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let file = DataFile::new(temp_dir.join("pipeline_data.txt"));
    let registry = sample_registry();
    file.save(&registry).unwrap();
    assert!(file.exists());

    let loaded = file.load().unwrap();
    assert_eq!(loaded.pipes().len(), 2);
    assert_eq!(loaded.stations().len(), 1);
    assert_eq!(loaded.pipes()[0].name, "Main line west");
    assert!(loaded.pipes()[0].under_repair);
    assert!((loaded.pipes()[0].length_km() - 120.5).abs() < 1e-9);
    assert_eq!(loaded.stations()[0].working_workshops(), 4);
}

#[test]
fn loaded_registry_continues_identity_sequence() {
    let temp_dir = std::env::temp_dir().join("pn_store_test_ids");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let file = DataFile::new(temp_dir.join("data.txt"));
    file.save(&sample_registry()).unwrap();

    let mut loaded = file.load().unwrap();
    let next = loaded
        .add_pipe(NewPipe {
            name: "New".to_string(),
            length_km: 1.0,
            diameter: CapacityClass::from_mm(700).unwrap(),
        })
        .unwrap();
    assert_eq!(next.get(), 3);
}

#[test]
fn failed_save_keeps_previous_file() {
    let temp_dir = std::env::temp_dir().join("pn_store_test_failed_save");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let file = DataFile::new(temp_dir.join("data.txt"));
    file.save(&sample_registry()).unwrap();
    let before = std::fs::read_to_string(file.path()).unwrap();

    // a directory where the staging file would go makes the write fail
    std::fs::create_dir_all(temp_dir.join("data.txt.tmp")).unwrap();
    assert!(matches!(
        file.save(&AssetRegistry::new()),
        Err(StoreError::Io(_))
    ));
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), before);
    assert_eq!(file.load().unwrap().pipes().len(), 2);
}

#[test]
fn save_leaves_no_staging_file() {
    let temp_dir = std::env::temp_dir().join("pn_store_test_staging");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let file = DataFile::new(temp_dir.join("data.txt"));
    file.save(&sample_registry()).unwrap();
    file.save(&AssetRegistry::new()).unwrap();
    assert!(!temp_dir.join("data.txt.tmp").exists());
    assert!(file.load().unwrap().pipes().is_empty());
}

#[test]
fn missing_data_file() {
    let file = DataFile::new(std::env::temp_dir().join("pn_store_test_missing/none.txt"));
    assert!(matches!(file.load(), Err(StoreError::NotFound { .. })));
}

#[test]
fn activity_log_appends_across_reopen() {
    let temp_dir = std::env::temp_dir().join("pn_store_test_log");
    let _ = std::fs::remove_dir_all(&temp_dir);
    let path = temp_dir.join("pipeline_log.txt");

    {
        let mut log = ActivityLog::open(&path).unwrap();
        log.record("=== Program started ===").unwrap();
    }
    let mut log = ActivityLog::open(&path).unwrap();
    log.record("Added pipe - ID: 1, Name: A").unwrap();

    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with('['));
    assert!(entries[0].ends_with("] === Program started ==="));
    assert!(entries[1].ends_with("] Added pipe - ID: 1, Name: A"));
}
