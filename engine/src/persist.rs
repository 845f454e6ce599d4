use crate::catalog::{Catalog, Movie};
use crate::recommend::EngineError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub num_movies: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct SnapshotPaths {
    pub root: PathBuf,
}

impl SnapshotPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn catalog(&self) -> PathBuf {
        self.root.join("catalog.bin")
    }

    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// Writes the movie table (with derived tags) as the snapshot blob.
pub fn save_catalog(paths: &SnapshotPaths, catalog: &Catalog) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.catalog())?;
    let bytes = bincode::serialize(catalog.movies())?;
    f.write_all(&bytes)?;
    Ok(())
}

/// Loads the snapshot blob. Any failure (missing file, truncated or
/// malformed bytes) is `SnapshotUnavailable`: the engine must not
/// initialize from a partial catalog.
pub fn load_catalog(paths: &SnapshotPaths) -> Result<Catalog, EngineError> {
    let mut f = File::open(paths.catalog())
        .map_err(|e| EngineError::SnapshotUnavailable(format!("{}: {e}", paths.catalog().display())))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)
        .map_err(|e| EngineError::SnapshotUnavailable(e.to_string()))?;
    let movies: Vec<Movie> = bincode::deserialize(&buf)
        .map_err(|e| EngineError::SnapshotUnavailable(format!("malformed catalog: {e}")))?;
    Ok(Catalog::new(movies))
}

pub fn save_meta(paths: &SnapshotPaths, meta: &SnapshotMeta) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &SnapshotPaths) -> Result<SnapshotMeta> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: SnapshotMeta = serde_json::from_str(&buf)?;
    Ok(meta)
}
