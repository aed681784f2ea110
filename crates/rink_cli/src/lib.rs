//! Rink CLI Library
//!
//! File plumbing around `rink_core`: config and game-feed loading, a
//! directory-backed game source, and compact report export
//! (JSON → MessagePack → LZ4, SHA-256 checksum).

use anyhow::{Context, Result};
use rink_core::analysis::metrics::MovementSample;
use rink_core::config::AnalyticsConfig;
use rink_core::error::SourceError;
use rink_core::models::{GameFeed, GameId};
use rink_core::pipeline::GameSource;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Export schema written into the metadata.
pub const EXPORT_SCHEMA_VERSION: u8 = rink_core::SCHEMA_VERSION;

/// Load an `AnalyticsConfig` from YAML (`.yaml` / `.yml`) or JSON.
///
/// Missing sections fall back to defaults; the result is validated.
pub fn load_config(path: &Path) -> Result<AnalyticsConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config: AnalyticsConfig = if is_yaml {
        serde_yaml::from_str(&text).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(&text).context("Failed to parse JSON config")?
    };

    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

pub fn load_game_feed(path: &Path) -> Result<GameFeed> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read game file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse game file: {}", path.display()))
}

pub fn load_samples(path: &Path) -> Result<Vec<MovementSample>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse samples file: {}", path.display()))
}

/// Games stored as `<dir>/<game_id>.json`.
#[derive(Debug, Clone)]
pub struct FileGameSource {
    dir: PathBuf,
}

impl FileGameSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, game_id: GameId) -> PathBuf {
        self.dir.join(format!("{game_id}.json"))
    }

    /// Every game id in the directory, ascending.
    pub fn game_ids(&self) -> Result<Vec<GameId>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read game directory: {}", self.dir.display()))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()).map(str::parse::<GameId>) {
                Some(Ok(id)) => ids.push(id),
                _ => log::debug!("ignoring {}", path.display()),
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

impl GameSource for FileGameSource {
    fn fetch_game(&self, game_id: GameId) -> std::result::Result<GameFeed, SourceError> {
        let text = fs::read_to_string(self.path_for(game_id)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::NotFound { game_id }
            } else {
                SourceError::Io(e)
            }
        })?;
        let feed: GameFeed = serde_json::from_str(&text)?;
        if feed.game_id != game_id {
            return Err(SourceError::Unavailable {
                game_id,
                reason: format!("file contains game {}", feed.game_id),
            });
        }
        Ok(feed)
    }
}

/// Export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub schema_version: u8,
    /// SHA256 of the compressed bytes (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// JSON size in bytes
    pub original_size: u64,
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write any serializable report as MessagePack+LZ4.
pub fn export_report<T: Serialize>(report: &T, output: &Path) -> Result<ExportMetadata> {
    let value = serde_json::to_value(report).context("Failed to convert report to JSON")?;
    let original_size = serde_json::to_vec(&value)?.len() as u64;

    let msgpack_bytes = rmp_serde::to_vec(&value).context("Failed to serialize to MessagePack")?;
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }
    fs::write(output, &compressed)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    Ok(ExportMetadata {
        schema_version: EXPORT_SCHEMA_VERSION,
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size.max(1) as f64,
    })
}

/// Re-export a JSON report file.
pub fn export_json_file(input: &Path, output: &Path) -> Result<ExportMetadata> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read report file: {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text).context("Failed to parse report JSON")?;
    export_report(&value, output)
}

pub fn verify_export(file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(file).with_context(|| format!("Failed to read export file: {}", file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

pub fn load_export(file: &Path) -> Result<serde_json::Value> {
    let compressed = fs::read(file).with_context(|| format!("Failed to read export file: {}", file.display()))?;
    let msgpack_bytes = lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;
    let value: serde_json::Value =
        rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")?;
    Ok(value)
}

pub fn save_metadata(path: &Path, meta: &ExportMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(path, json).with_context(|| format!("Failed to write metadata: {}", path.display()))?;
    Ok(())
}
