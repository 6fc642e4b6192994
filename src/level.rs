/// Level data — the one structured external artifact.  A level file is a
/// JSON object with four named arrays of spawn rectangles; anything
/// malformed is a fatal startup condition, never a partial load.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

/// Integer spawn rectangle, exactly as written in the level file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SpawnRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// The four entry lists a level provides.  All keys are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LevelData {
    pub terrain: Vec<SpawnRect>,
    pub patrollers: Vec<SpawnRect>,
    pub power_ups: Vec<SpawnRect>,
    pub walkers: Vec<SpawnRect>,
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("cannot read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse level data from a JSON string.
pub fn parse(text: &str) -> Result<LevelData, LevelError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a level file.
pub fn load(path: impl AsRef<Path>) -> Result<LevelData, LevelError> {
    let path = path.as_ref();
    let data = parse(&fs::read_to_string(path)?)?;
    info!(
        "loaded level {}: {} terrain, {} patrollers, {} power-ups, {} walkers",
        path.display(),
        data.terrain.len(),
        data.patrollers.len(),
        data.power_ups.len(),
        data.walkers.len()
    );
    Ok(data)
}
