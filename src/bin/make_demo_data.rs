use anyhow::{Context, Result};
use factor_correlation::data::{
    CacheFile, DataFormat, SyntheticConfig, generate_synthetic_collection,
};

fn main() -> Result<()> {
    build_demo_data()
}

/// Write the synthetic demo factors in both on-disk formats
fn build_demo_data() -> Result<()> {
    let config = SyntheticConfig::demo()?;
    let collection = generate_synthetic_collection(&config)
        .context("Failed to generate synthetic demo factors")?;

    println!(
        "Generated {} factors x {} observations (seed {})",
        collection.len(),
        config.observations,
        config.seed
    );

    let cache = CacheFile::new(collection);
    for format in [DataFormat::Json, DataFormat::Bincode] {
        let output_path = CacheFile::default_cache_path(format);
        cache.save_to_path(&output_path)?;
        println!("✅ Demo data written to {:?}", output_path);
    }
    Ok(())
}
