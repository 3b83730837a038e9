//! File persistence and serialization configuration

/// Directory path for storing factor data
pub const FACTOR_DATA_PATH: &str = "factor_data";

/// Base filename for factor data files (without extension)
pub const FACTOR_FILENAME_WITHOUT_EXT: &str = "factors";

/// Current version of the factor collection serialization format
pub const FACTOR_DATA_VERSION: f64 = 1.0;

/// Generate the cache filename for a given format extension
/// Example: "factors_v1.bin" or "factors_v1.json"
pub fn factor_cache_filename(extension: &str) -> String {
    format!(
        "{}_v{}.{}",
        FACTOR_FILENAME_WITHOUT_EXT, FACTOR_DATA_VERSION, extension
    )
}
