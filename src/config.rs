// src/config.rs

use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
pub struct RunConfig {
    pub coil: CoilConfig,
    pub grid: GridConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct CoilConfig {
    pub side_length: f64,
    pub separation: f64,
    pub current: f64,
}

#[derive(Serialize)]
pub struct GridConfig {
    pub component: String,
    pub plane: String,
    pub n: usize,
    pub extent: f64,
    pub offset: f64,
    pub profile_axis: String,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    pub run_id: String,

    // Optional provenance (can be filled later)
    pub timestamp_utc: Option<String>,
}

impl RunConfig {
    pub fn write_to_dir(&self, out_dir: &Path) -> std::io::Result<()> {
        let path = out_dir.join("config.json");
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
