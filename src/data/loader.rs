use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::data::cache_file::CacheFile;
use crate::data::collection::FactorCollection;
use crate::data::synthetic::{SyntheticConfig, generate_synthetic_collection};

pub trait LoadFactorData {
    // Either produce a collection OR return an anyhow::error
    fn load_factor_data(&self) -> Result<FactorCollection>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Factor file on disk (`.json` or `.bin`)
pub struct FileSource {
    pub path: PathBuf,
}

impl LoadFactorData for FileSource {
    fn load_factor_data(&self) -> Result<FactorCollection> {
        Ok(CacheFile::load_from_path(&self.path)?.data)
    }

    fn signature(&self) -> &'static str {
        "Factor file"
    }
}

/// Seeded synthetic generator
pub struct SyntheticSource {
    pub config: SyntheticConfig,
}

impl LoadFactorData for SyntheticSource {
    fn load_factor_data(&self) -> Result<FactorCollection> {
        generate_synthetic_collection(&self.config)
    }

    fn signature(&self) -> &'static str {
        "Synthetic generator"
    }
}

/// Try each provider in order and return the first collection produced
pub fn load_first_available(
    providers: &[Box<dyn LoadFactorData>],
) -> Result<(FactorCollection, &'static str)> {
    for provider in providers {
        match provider.load_factor_data() {
            Ok(data) => {
                let signature = provider.signature();
                log::info!("Loaded {} factor series via {}", data.len(), signature);
                return Ok((data, signature));
            }
            Err(e) => {
                log::warn!("{} failed: {:#}", provider.signature(), e);
                // Continue to the next provider
            }
        }
    }
    Err(anyhow!("All factor data providers failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_next_provider() {
        let providers: Vec<Box<dyn LoadFactorData>> = vec![
            Box::new(FileSource {
                path: PathBuf::from("definitely/not/here.json"),
            }),
            Box::new(SyntheticSource {
                config: SyntheticConfig::demo().unwrap(),
            }),
        ];
        let (data, signature) = load_first_available(&providers).unwrap();
        assert_eq!(signature, "Synthetic generator");
        assert!(!data.is_empty());
    }

    #[test]
    fn test_all_failing_is_an_error() {
        let providers: Vec<Box<dyn LoadFactorData>> = vec![Box::new(FileSource {
            path: PathBuf::from("missing.bin"),
        })];
        assert!(load_first_available(&providers).is_err());
    }
}
