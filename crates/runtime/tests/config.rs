use std::io::Write;

use runtime::{ConfigError, RuntimeConfig, Simulation, StaticMap};
use game_core::{MapDimensions, TerrainKind, World};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_merges_file_over_defaults() {
    let file = write_config(
        r#"
step_seconds = 0.5
move_tiles_per_step = 2

[game]
detection_threshold = 1.0
vision_angle = 90.0
"#,
    );

    let config = RuntimeConfig::load(file.path()).unwrap();
    assert_eq!(config.step_seconds, 0.5);
    assert_eq!(config.move_tiles_per_step, 2);
    assert_eq!(config.game.detection_threshold, 1.0);
    assert_eq!(config.game.vision_angle, 90.0);

    // Untouched keys keep their defaults.
    assert_eq!(config.game.tile_size, 16);
    assert_eq!(config.game.search_timeout, 5.0);
    assert_eq!(config.idle_wait_seconds, 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = RuntimeConfig::load(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Read { ref path, .. } if path == &missing));
}

#[test]
fn load_reports_malformed_toml() {
    let file = write_config("step_seconds = [not toml");
    let err = RuntimeConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn simulation_rejects_invalid_config() {
    let file = write_config("step_seconds = -1.0\n");
    let config = RuntimeConfig::load(file.path()).unwrap();

    let map = StaticMap::filled(MapDimensions::new(4, 4), TerrainKind::Floor);
    let result = Simulation::new(map, World::new(), config);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "step_seconds",
            ..
        })
    ));
}
