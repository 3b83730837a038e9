// Domain types and value objects
pub mod classification;
pub mod factor_series;
pub mod time_range;

// Re-export commonly used types
pub use classification::{Relationship, Significance, Strength};
pub use factor_series::{FactorSeries, SeriesDefect};
pub use time_range::TimeRange;
