//! Config and scene files
//!
//! Both are plain JSON. Configs round-trip through `write_config` and
//! `load_config`; scenes are read-only descriptions of a starting stage
//! (actor poses and programs) used by the CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::StageConfig;
use super::actor::{Point, Pose};
use super::control::Stage;
use super::error::{Result, StageError, StorageError, StorageResult};
use crate::interpreter::{CommandKind, Param, create_command};

/// Load a config file; missing fields take their defaults
pub fn load_config(path: &Path) -> StorageResult<StageConfig> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a config file as pretty JSON
pub fn write_config(path: &Path, config: &StageConfig) -> StorageResult<()> {
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// One command as written in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCommand {
    /// Command kind
    pub kind: CommandKind,
    /// Parameters, `kind.arity()` long
    pub params: Vec<Param>,
}

/// One actor as written in a scene file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneActor {
    /// Starting position; the grid slot when absent
    #[serde(default)]
    pub position: Option<Point>,
    /// Starting heading in degrees
    #[serde(default)]
    pub heading: f64,
    /// Program in execution order
    #[serde(default)]
    pub program: Vec<SceneCommand>,
}

/// A starting stage: actors in roster order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Actors, assigned pool identities in order
    pub actors: Vec<SceneActor>,
}

/// Read a scene file
pub fn load_scene(path: &Path) -> StorageResult<Scene> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

impl Scene {
    /// Build a stage holding exactly this scene's actors
    pub fn build(&self, config: StageConfig) -> Result<Stage> {
        let config = StageConfig {
            initial_actors: self.actors.len(),
            ..config
        };
        let stage = Stage::new(config)?;

        for (id, actor) in stage.table().ids().into_iter().zip(&self.actors) {
            for (index, entry) in actor.program.iter().enumerate() {
                let command = create_command(entry.kind, &entry.params).map_err(|err| {
                    StageError::Storage(StorageError::InvalidScene(format!(
                        "{} command {}: {}",
                        id, index, err
                    )))
                })?;
                stage.append_command_to(id, command)?;
            }
            if let Some(position) = actor.position {
                stage.place(
                    id,
                    Pose {
                        position,
                        heading: actor.heading,
                    },
                )?;
            } else if actor.heading != 0.0 {
                let position = stage
                    .actor(id)
                    .map(|a| a.position)
                    .unwrap_or(stage.config().spawn_position);
                stage.place(
                    id,
                    Pose {
                        position,
                        heading: actor.heading,
                    },
                )?;
            }
        }
        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ids::ActorId;
    use tempfile::TempDir;

    #[test]
    fn config_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stage.json");
        let config = StageConfig {
            step_delay_ms: 100,
            reversal_message: "Bonk!".to_string(),
            ..StageConfig::default()
        };
        write_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn missing_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");
        assert!(matches!(load_config(&path), Err(StorageError::PathNotFound(_))));
    }

    #[test]
    fn scene_builds_stage() {
        let scene: Scene = serde_json::from_str(
            r#"{ "actors": [
                { "program": [ { "kind": "move", "params": [50] } ] },
                { "position": { "x": 400, "y": 90 }, "heading": 180,
                  "program": [ { "kind": "say", "params": ["Hi", 1] } ] }
            ] }"#,
        )
        .unwrap();
        let stage = scene.build(StageConfig::default()).unwrap();
        let actors = stage.actors();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].program.len(), 1);
        assert_eq!(actors[1].id, ActorId(2));
        assert_eq!(actors[1].position, Point::new(400.0, 90.0));
        assert_eq!(actors[1].heading, 180.0);
    }

    #[test]
    fn scene_with_bad_arity_is_invalid() {
        let scene: Scene = serde_json::from_str(
            r#"{ "actors": [ { "program": [ { "kind": "goto", "params": [1] } ] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            scene.build(StageConfig::default()),
            Err(StageError::Storage(StorageError::InvalidScene(_)))
        ));
    }
}
