//! Trait sampling ranges for agent creation.
//!
//! Every trait is drawn once from a uniform distribution when the agent is
//! created and never changes afterwards (the one exception is the
//! engineer's knowledge level, which the engineer grows itself). The
//! [`TraitConfig`] bundles every range so tests can pin traits to a single
//! value by using a degenerate range.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Closed interval `[low, high]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

impl TraitRange {
    /// Create a range from its bounds.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A degenerate range that always samples `value`.
    pub const fn fixed(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Draw one value from the range.
    ///
    /// The range must have passed [`TraitRange::check`]; an inverted or
    /// unbounded range would make the underlying sampler panic.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.random_range(self.low..=self.high)
    }

    /// Reject inverted bounds and bounds outside `[0, 1]`.
    ///
    /// NaN fails every comparison, so it is rejected too.
    pub fn check(&self, name: &'static str) -> Result<(), AgentError> {
        if 0.0 <= self.low && self.low <= self.high && self.high <= 1.0 {
            Ok(())
        } else {
            Err(AgentError::InvalidTraitRange {
                name,
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Sampling ranges for every agent trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitConfig {
    /// Worker participation (default: `[0, 1]`).
    pub worker_participation: TraitRange,
    /// Worker data quality when participation is high (default: `[0.7, 1.0]`).
    pub high_data_quality: TraitRange,
    /// Worker data quality when participation is low (default: `[0.1, 0.6]`).
    pub low_data_quality: TraitRange,
    /// Engineer starting knowledge level (default: `[0.5, 1.0]`).
    pub engineer_knowledge: TraitRange,
    /// Engineer data sensitivity (default: `[0.3, 0.8]`).
    pub engineer_data_sensitivity: TraitRange,
    /// Manager control preference (default: `[0.5, 1.0]`).
    pub manager_control_preference: TraitRange,
    /// Manager feedback acceptance (default: `[0.2, 0.8]`).
    pub manager_feedback_acceptance: TraitRange,
    /// Algorithmic system transparency (default: `[0.2, 0.8]`).
    pub system_transparency: TraitRange,
    /// Data scientist analytic rigor (default: `[0.4, 0.9]`).
    pub data_scientist_rigor: TraitRange,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            worker_participation: TraitRange::new(0.0, 1.0),
            high_data_quality: TraitRange::new(0.7, 1.0),
            low_data_quality: TraitRange::new(0.1, 0.6),
            engineer_knowledge: TraitRange::new(0.5, 1.0),
            engineer_data_sensitivity: TraitRange::new(0.3, 0.8),
            manager_control_preference: TraitRange::new(0.5, 1.0),
            manager_feedback_acceptance: TraitRange::new(0.2, 0.8),
            system_transparency: TraitRange::new(0.2, 0.8),
            data_scientist_rigor: TraitRange::new(0.4, 0.9),
        }
    }
}

impl TraitConfig {
    /// Validate every range.
    pub fn validate(&self) -> Result<(), AgentError> {
        self.worker_participation.check("worker_participation")?;
        self.high_data_quality.check("high_data_quality")?;
        self.low_data_quality.check("low_data_quality")?;
        self.engineer_knowledge.check("engineer_knowledge")?;
        self.engineer_data_sensitivity
            .check("engineer_data_sensitivity")?;
        self.manager_control_preference
            .check("manager_control_preference")?;
        self.manager_feedback_acceptance
            .check("manager_feedback_acceptance")?;
        self.system_transparency.check("system_transparency")?;
        self.data_scientist_rigor.check("data_scientist_rigor")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TraitConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = TraitConfig {
            system_transparency: TraitRange::new(0.8, 0.2),
            ..TraitConfig::default()
        };
        let err = config.validate();
        assert!(matches!(
            err,
            Err(AgentError::InvalidTraitRange {
                name: "system_transparency",
                ..
            })
        ));
    }

    #[test]
    fn nan_bound_is_rejected() {
        assert!(TraitRange::new(f64::NAN, 1.0).check("x").is_err());
    }

    #[test]
    fn bound_outside_unit_interval_is_rejected() {
        let config = TraitConfig {
            worker_participation: TraitRange::new(-5.0, 7.0),
            ..TraitConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentError::InvalidTraitRange {
                name: "worker_participation",
                ..
            })
        ));
        assert!(TraitRange::new(0.5, 1.5).check("x").is_err());
        assert!(TraitRange::new(-0.1, 0.5).check("x").is_err());
    }

    #[test]
    fn full_float_span_is_rejected() {
        let range = TraitRange::new(-f64::MAX, f64::MAX);
        assert!(range.check("x").is_err());
        assert!(TraitRange::new(f64::NEG_INFINITY, 1.0).check("x").is_err());
    }

    #[test]
    fn unit_interval_edges_are_accepted() {
        assert!(TraitRange::new(0.0, 1.0).check("x").is_ok());
        assert!(TraitRange::fixed(0.0).check("x").is_ok());
        assert!(TraitRange::fixed(1.0).check("x").is_ok());
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let range = TraitRange::new(0.3, 0.8);
        for _ in 0..500 {
            let value = range.sample(&mut rng);
            assert!((0.3..=0.8).contains(&value));
        }
    }

    #[test]
    fn fixed_range_always_returns_value() {
        let mut rng = SmallRng::seed_from_u64(1);
        let value = TraitRange::fixed(0.42).sample(&mut rng);
        assert!((value - 0.42).abs() < f64::EPSILON);
    }
}
