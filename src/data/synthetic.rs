//! Seeded synthetic factor data for demos and tests.
//!
//! Every factor is `base · (1 + 1% · (loading · latent + noise · ε))` where `latent`
//! is a shared Gaussian random walk and `ε` is i.i.d. standard normal.

use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use crate::config::{DEMO, FACTOR_DATA_VERSION};
use crate::data::collection::FactorCollection;
use crate::domain::FactorSeries;
use crate::utils::time_utils::daily_dates;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFactor {
    pub name: String,
    pub loading: f64,
    pub base_level: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub observations: usize,
    pub noise_scale: f64,
    pub first_date: NaiveDate,
    pub factors: Vec<SyntheticFactor>,
}

impl SyntheticConfig {
    /// The demo configuration from `config::demo`
    pub fn demo() -> Result<Self> {
        let (y, m, d) = DEMO.first_date;
        let first_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| anyhow!("Invalid demo start date {}-{}-{}", y, m, d))?;
        Ok(Self {
            seed: DEMO.seed,
            observations: DEMO.observations,
            noise_scale: DEMO.noise_scale,
            first_date,
            factors: DEMO
                .factors
                .iter()
                .map(|f| SyntheticFactor {
                    name: f.name.to_string(),
                    loading: f.loading,
                    base_level: f.base_level,
                })
                .collect(),
        })
    }
}

pub fn generate_synthetic_collection(config: &SyntheticConfig) -> Result<FactorCollection> {
    if config.factors.is_empty() {
        bail!("Synthetic config lists no factors");
    }
    if !config.noise_scale.is_finite() || config.noise_scale < 0.0 {
        bail!("Synthetic noise scale must be finite and non-negative");
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.observations;

    let mut latent = Vec::with_capacity(n);
    let mut level = 0.0f64;
    for _ in 0..n {
        let step: f64 = StandardNormal.sample(&mut rng);
        level += step;
        latent.push(level);
    }

    let dates = daily_dates(config.first_date, n);
    let series = config
        .factors
        .iter()
        .map(|factor| {
            let values = latent
                .iter()
                .map(|driver| {
                    let eps: f64 = StandardNormal.sample(&mut rng);
                    let shock = factor.loading * driver + config.noise_scale * eps;
                    factor.base_level * (1.0 + 0.01 * shock)
                })
                .collect();
            FactorSeries::with_dates(factor.name.clone(), values, dates.clone())
        })
        .collect();

    Ok(FactorCollection::new(
        "Macro factors (synthetic)",
        FACTOR_DATA_VERSION,
        series,
    ))
}
