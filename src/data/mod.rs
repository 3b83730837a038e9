// Data loading, caching, and synthetic generation
pub mod cache_file;
pub mod collection;
pub mod loader;
pub mod synthetic;

// Re-export commonly used types
pub use cache_file::{CacheFile, DataFormat};
pub use collection::FactorCollection;
pub use loader::{FileSource, LoadFactorData, SyntheticSource, load_first_available};
pub use synthetic::{SyntheticConfig, SyntheticFactor, generate_synthetic_collection};
