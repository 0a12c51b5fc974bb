// ABOUTME: Reconciliation thresholds grouped by pipeline stage
// ABOUTME: Defaults, RECONCILE_* environment overrides, ordering validation and OnceLock global
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reconcile_core::constants::{limits, pool};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use super::ConfigError;

/// Global configuration singleton
static RECONCILE_CONFIG: OnceLock<ReconcileConfig> = OnceLock::new();

/// Sample normalizer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Heart rates at or below this are discarded (BPM)
    pub heart_rate_min_bpm: f64,
    /// Heart rates at or above this are discarded (BPM)
    pub heart_rate_max_bpm: f64,
    /// Speeds below this are stationary noise (m/s)
    pub stationary_speed_mps: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            heart_rate_min_bpm: limits::HEART_RATE_MIN_BPM,
            heart_rate_max_bpm: limits::HEART_RATE_MAX_BPM,
            stationary_speed_mps: limits::STATIONARY_SPEED_MPS,
        }
    }
}

impl SampleConfig {
    /// Whether a heart rate lies strictly inside the plausible range
    #[must_use]
    pub fn is_plausible_heart_rate(&self, bpm: f64) -> bool {
        bpm.is_finite() && bpm > self.heart_rate_min_bpm && bpm < self.heart_rate_max_bpm
    }

    /// Whether a speed is fast enough to count as movement
    #[must_use]
    pub fn is_moving_speed(&self, meters_per_second: f64) -> bool {
        meters_per_second.is_finite() && meters_per_second >= self.stationary_speed_mps
    }
}

/// Distance accumulator thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    /// Time gaps at or above this are clock jumps and never speed-integrated (seconds)
    pub max_speed_integration_gap_seconds: f64,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_speed_integration_gap_seconds: limits::MAX_SPEED_INTEGRATION_GAP_SECONDS,
        }
    }
}

/// Step segmenter thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Largest gap between leading samples treated as GPS-lock idle (seconds)
    pub idle_trim_max_gap_seconds: f64,
    /// Largest distance change between leading samples treated as idle (meters)
    pub idle_trim_max_drift_meters: f64,
    /// Slices shorter than this report the planned duration instead (seconds)
    pub min_reportable_duration_seconds: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            idle_trim_max_gap_seconds: 5.0,
            idle_trim_max_drift_meters: 10.0,
            min_reportable_duration_seconds: 5.0,
        }
    }
}

/// Metric aggregator thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Leading seconds of a warm-up slice excluded from the HR mean
    pub warmup_hr_settle_seconds: f64,
    /// Relative deviation from the slice median above which an HR value is rejected
    pub hr_outlier_fraction: f64,
    /// Minimum plausible HR values before median rejection applies
    pub hr_outlier_min_samples: usize,
    /// Shortest plausible single interval (miles)
    pub plausible_interval_min_miles: f64,
    /// Longest plausible single interval (miles)
    pub plausible_interval_max_miles: f64,
    /// Fastest accepted speed-derived rest pace (seconds per mile)
    pub rest_pace_fastest_seconds_per_mile: f64,
    /// Slowest accepted speed-derived rest pace (seconds per mile)
    pub rest_pace_slowest_seconds_per_mile: f64,
    /// Speeds at or above this are implausible for a rest segment (m/s)
    pub rest_max_speed_mps: f64,
    /// Pace adherence tolerance around a single target (seconds per mile)
    pub pace_tolerance_seconds_per_mile: f64,
    /// Power adherence tolerance around a single target (fraction of target)
    pub power_tolerance_fraction: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            warmup_hr_settle_seconds: 5.0,
            hr_outlier_fraction: 0.35,
            hr_outlier_min_samples: 3,
            plausible_interval_min_miles: 0.03,
            plausible_interval_max_miles: 5.0,
            rest_pace_fastest_seconds_per_mile: limits::PACE_FASTEST_SECONDS_PER_MILE,
            rest_pace_slowest_seconds_per_mile: limits::PACE_SLOWEST_SECONDS_PER_MILE,
            rest_max_speed_mps: limits::REST_MAX_SPEED_MPS,
            pace_tolerance_seconds_per_mile: 10.0,
            power_tolerance_fraction: 0.05,
        }
    }
}

/// Planned-step resolver thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Plans with fewer structured steps than this are treated as unstructured
    pub structured_step_minimum: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            structured_step_minimum: 3,
        }
    }
}

/// Pool-length inference tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Match window around a 25-yard pool (meters)
    pub yard_tolerance_meters: f64,
    /// Match window around 25/33.33/50 m pools (meters)
    pub meter_tolerance_meters: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            yard_tolerance_meters: pool::YARD_POOL_TOLERANCE_METERS,
            meter_tolerance_meters: pool::METER_POOL_TOLERANCE_METERS,
        }
    }
}

/// All reconciliation thresholds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Sample normalizer
    pub samples: SampleConfig,
    /// Distance accumulator
    pub accumulator: AccumulatorConfig,
    /// Step segmenter
    pub segmenter: SegmenterConfig,
    /// Metric aggregator
    pub aggregator: AggregatorConfig,
    /// Planned-step resolver
    pub resolver: ResolverConfig,
    /// Pool inference
    pub pool: PoolConfig,
}

impl ReconcileConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        RECONCILE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load reconcile config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load defaults, apply environment overrides, then validate
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check ordering and range constraints
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let samples = &self.samples;
        if samples.heart_rate_min_bpm >= samples.heart_rate_max_bpm {
            return Err(ConfigError::InvalidRange(
                "heart_rate_min_bpm must be < heart_rate_max_bpm",
            ));
        }
        if samples.stationary_speed_mps < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "stationary_speed_mps must be >= 0",
            ));
        }
        if self.accumulator.max_speed_integration_gap_seconds <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_speed_integration_gap_seconds must be > 0",
            ));
        }

        let segmenter = &self.segmenter;
        if segmenter.idle_trim_max_gap_seconds < 0.0
            || segmenter.idle_trim_max_drift_meters < 0.0
            || segmenter.min_reportable_duration_seconds < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "segmenter thresholds must be >= 0",
            ));
        }

        self.validate_aggregator()?;

        if self.resolver.structured_step_minimum == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "structured_step_minimum must be >= 1",
            ));
        }

        let gap_between_pools = pool::METER_POOL_LENGTHS[0] - pool::YARD_POOL_METERS;
        if self.pool.yard_tolerance_meters <= 0.0 || self.pool.meter_tolerance_meters <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "pool tolerances must be > 0",
            ));
        }
        if self.pool.yard_tolerance_meters + self.pool.meter_tolerance_meters >= gap_between_pools
        {
            return Err(ConfigError::InvalidRange(
                "yard and meter pool tolerance windows must not overlap",
            ));
        }

        Ok(())
    }

    fn validate_aggregator(&self) -> Result<(), ConfigError> {
        let agg = &self.aggregator;
        if agg.plausible_interval_min_miles >= agg.plausible_interval_max_miles {
            return Err(ConfigError::InvalidRange(
                "plausible_interval_min_miles must be < plausible_interval_max_miles",
            ));
        }
        if agg.rest_pace_fastest_seconds_per_mile >= agg.rest_pace_slowest_seconds_per_mile {
            return Err(ConfigError::InvalidRange(
                "rest_pace_fastest_seconds_per_mile must be < rest_pace_slowest_seconds_per_mile",
            ));
        }
        if !(agg.hr_outlier_fraction > 0.0 && agg.hr_outlier_fraction < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "hr_outlier_fraction must be in (0, 1)",
            ));
        }
        if !(0.0..1.0).contains(&agg.power_tolerance_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "power_tolerance_fraction must be in [0, 1)",
            ));
        }
        if agg.pace_tolerance_seconds_per_mile < 0.0
            || agg.warmup_hr_settle_seconds < 0.0
            || agg.rest_max_speed_mps <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "aggregator tolerances must be non-negative",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply `RECONCILE_*` environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Samples
        Self::apply_env_var("RECONCILE_HR_MIN_BPM", &mut self.samples.heart_rate_min_bpm)?;
        Self::apply_env_var("RECONCILE_HR_MAX_BPM", &mut self.samples.heart_rate_max_bpm)?;
        Self::apply_env_var(
            "RECONCILE_STATIONARY_SPEED_MPS",
            &mut self.samples.stationary_speed_mps,
        )?;

        // Accumulator
        Self::apply_env_var(
            "RECONCILE_MAX_SPEED_GAP_SECONDS",
            &mut self.accumulator.max_speed_integration_gap_seconds,
        )?;

        // Segmenter
        Self::apply_env_var(
            "RECONCILE_IDLE_TRIM_GAP_SECONDS",
            &mut self.segmenter.idle_trim_max_gap_seconds,
        )?;
        Self::apply_env_var(
            "RECONCILE_IDLE_TRIM_DRIFT_METERS",
            &mut self.segmenter.idle_trim_max_drift_meters,
        )?;
        Self::apply_env_var(
            "RECONCILE_MIN_DURATION_SECONDS",
            &mut self.segmenter.min_reportable_duration_seconds,
        )?;

        // Aggregator
        Self::apply_env_var(
            "RECONCILE_WARMUP_HR_SETTLE_SECONDS",
            &mut self.aggregator.warmup_hr_settle_seconds,
        )?;
        Self::apply_env_var(
            "RECONCILE_HR_OUTLIER_FRACTION",
            &mut self.aggregator.hr_outlier_fraction,
        )?;
        Self::apply_env_var(
            "RECONCILE_PACE_TOLERANCE_SECONDS",
            &mut self.aggregator.pace_tolerance_seconds_per_mile,
        )?;
        Self::apply_env_var(
            "RECONCILE_POWER_TOLERANCE_FRACTION",
            &mut self.aggregator.power_tolerance_fraction,
        )?;

        // Resolver
        Self::apply_env_var(
            "RECONCILE_STRUCTURED_STEP_MINIMUM",
            &mut self.resolver.structured_step_minimum,
        )?;

        // Pool
        Self::apply_env_var(
            "RECONCILE_YARD_POOL_TOLERANCE_METERS",
            &mut self.pool.yard_tolerance_meters,
        )?;
        Self::apply_env_var(
            "RECONCILE_METER_POOL_TOLERANCE_METERS",
            &mut self.pool.meter_tolerance_meters,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ReconcileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_heart_rate_bounds_are_exclusive() {
        let samples = SampleConfig::default();
        assert!(!samples.is_plausible_heart_rate(40.0));
        assert!(samples.is_plausible_heart_rate(41.0));
        assert!(!samples.is_plausible_heart_rate(230.0));
        assert!(!samples.is_plausible_heart_rate(f64::NAN));
    }

    #[test]
    fn test_overlapping_pool_windows_rejected() {
        let mut config = ReconcileConfig::default();
        config.pool.yard_tolerance_meters = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange(
                "yard and meter pool tolerance windows must not overlap"
            ))
        );
    }
}
