//! Synthetic demo data configuration.
//!
//! The dashboard generates its factor series client side. These knobs keep
//! that generation deterministic so demo runs and tests are reproducible.

/// A synthetic factor: name plus its loading on the shared latent driver.
/// Negative loadings produce inversely related factors.
pub struct DemoFactor {
    pub name: &'static str,
    pub loading: f64,
    pub base_level: f64,
}

/// The Master Demo Configuration
pub struct DemoConfig {
    pub seed: u64,
    /// Observations per factor (one per day)
    pub observations: usize,
    /// Std-dev of the idiosyncratic noise added on top of the latent driver
    pub noise_scale: f64,
    pub first_date: (i32, u32, u32),
    pub factors: &'static [DemoFactor],
}

pub const DEMO: DemoConfig = DemoConfig {
    seed: 42,
    observations: 365,
    noise_scale: 0.6,
    first_date: (2024, 1, 1),
    factors: &[
        DemoFactor { name: "Oil Prices", loading: 0.9, base_level: 80.0 },
        DemoFactor { name: "Inflation Rate", loading: 0.7, base_level: 3.2 },
        DemoFactor { name: "Interest Rates", loading: 0.5, base_level: 5.25 },
        DemoFactor { name: "GDP Growth", loading: -0.4, base_level: 2.1 },
        DemoFactor { name: "Market Volatility", loading: -0.8, base_level: 18.0 },
        DemoFactor { name: "Consumer Confidence", loading: 0.0, base_level: 100.0 },
    ],
};
