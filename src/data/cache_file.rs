use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::debug::PRINT_SERDE;
use crate::config::{FACTOR_DATA_PATH, FACTOR_DATA_VERSION, factor_cache_filename};
use crate::data::collection::FactorCollection;
use crate::utils::time_utils::how_many_seconds_ago;

/// On-disk encodings for a factor collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Bincode,
}

impl DataFormat {
    /// Pick a format from the file extension (`.json`, `.bin`)
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DataFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Ok(DataFormat::Bincode),
            other => bail!(
                "Unsupported factor data extension {:?} for {:?} (expected .json or .bin)",
                other,
                path
            ),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Bincode => "bin",
        }
    }
}

/// Serialized wrapper around a collection with version and creation stamp.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub data: FactorCollection,
}

impl CacheFile {
    pub fn new(data: FactorCollection) -> Self {
        Self {
            version: FACTOR_DATA_VERSION,
            timestamp_ms: Utc::now().timestamp_millis(),
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path)?;
        let file = File::open(path).context(format!("Failed to open factor file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: CacheFile = match format {
            DataFormat::Json => serde_json::from_reader(&mut reader)
                .context(format!("Failed to parse JSON factor file: {:?}", path))?,
            DataFormat::Bincode => bincode::deserialize_from(&mut reader)
                .context(format!("Failed to deserialize factor cache: {:?}", path))?,
        };

        if cache.version != FACTOR_DATA_VERSION {
            bail!(
                "Factor data version mismatch: file v{} vs required v{}",
                cache.version,
                FACTOR_DATA_VERSION
            );
        }

        if PRINT_SERDE {
            log::info!(
                "Loaded {} series from {:?} ({}s old)",
                cache.data.len(),
                path,
                how_many_seconds_ago(cache.timestamp_ms)
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let format = DataFormat::from_path(path)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        match format {
            DataFormat::Json => serde_json::to_writer_pretty(&mut writer, self)
                .context(format!("Failed to write JSON to: {}", path.display())),
            DataFormat::Bincode => bincode::serialize_into(&mut writer, self)
                .context(format!("Failed to serialize cache to: {}", path.display())),
        }
    }

    pub fn default_cache_path(format: DataFormat) -> PathBuf {
        PathBuf::from(FACTOR_DATA_PATH).join(factor_cache_filename(format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FactorSeries;

    fn scratch_path(file_name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("factor_correlation_test_{}", std::process::id()))
            .join(file_name)
    }

    fn sample_collection() -> FactorCollection {
        FactorCollection::new(
            "sample",
            FACTOR_DATA_VERSION,
            vec![
                FactorSeries::new("Oil", vec![80.1, 81.4, 79.9]),
                FactorSeries::new("CPI", vec![3.1, 3.2, 3.2]),
            ],
        )
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/b.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("b.BIN")).unwrap(), DataFormat::Bincode);
        assert!(DataFormat::from_path(Path::new("b.csv")).is_err());
        assert!(DataFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_save_and_load_both_formats() {
        for name in ["roundtrip.json", "roundtrip.bin"] {
            let path = scratch_path(name);
            CacheFile::new(sample_collection()).save_to_path(&path).unwrap();
            let loaded = CacheFile::load_from_path(&path).unwrap();
            assert_eq!(loaded.data, sample_collection());
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let path = scratch_path("old_version.json");
        let mut cache = CacheFile::new(sample_collection());
        cache.version = FACTOR_DATA_VERSION + 1.0;
        cache.save_to_path(&path).unwrap();

        let err = CacheFile::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
        let _ = std::fs::remove_file(&path);
    }
}
