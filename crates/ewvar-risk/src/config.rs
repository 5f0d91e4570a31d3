//! VaR estimation configuration.

use std::path::Path;

use ewvar_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Trading days per calendar year, used to size the fetch window.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Parameters of a single VaR estimate.
///
/// Every field has a default, so a TOML file only needs the values it changes:
///
/// ```toml
/// confidence = 0.95
/// decay_lambda = 0.97
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarConfig {
    /// Confidence level in (0, 1)
    pub confidence: f64,

    /// Number of log returns in the estimation window; also the degrees of
    /// freedom of the t quantile
    pub sample_count: usize,

    /// EWMA decay in (0, 1)
    pub decay_lambda: f64,

    /// EWMA weighting when true, plain sample statistics otherwise
    pub use_ewma: bool,

    /// Calendar days added to the fetch window on top of the trading-day estimate
    pub lookback_buffer_days: u32,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            confidence: 0.99,
            sample_count: 252,
            decay_lambda: 0.94,
            use_ewma: true,
            lookback_buffer_days: 30,
        }
    }
}

impl VarConfig {
    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the sample count.
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the EWMA decay.
    #[must_use]
    pub fn with_decay_lambda(mut self, decay_lambda: f64) -> Self {
        self.decay_lambda = decay_lambda;
        self
    }

    /// Switches between EWMA and sample estimation.
    #[must_use]
    pub fn with_ewma(mut self, use_ewma: bool) -> Self {
        self.use_ewma = use_ewma;
        self
    }

    /// Sets the calendar-day padding of the fetch window.
    #[must_use]
    pub fn with_lookback_buffer_days(mut self, days: u32) -> Self {
        self.lookback_buffer_days = days;
        self
    }

    /// Checks every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// `NumericalDegenerate` for a confidence of exactly 0 or 1, where the
    /// quantile is undefined. `InvalidInput` for any other out-of-range value.
    pub fn validate(&self) -> RiskResult<()> {
        if self.confidence == 0.0 || self.confidence == 1.0 {
            return Err(RiskError::degenerate(format!(
                "quantile undefined at confidence {}",
                self.confidence
            )));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(RiskError::invalid_input(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        if !(self.decay_lambda > 0.0 && self.decay_lambda < 1.0) {
            return Err(RiskError::invalid_input(format!(
                "decay lambda must be in (0, 1), got {}",
                self.decay_lambda
            )));
        }
        if self.sample_count == 0 {
            return Err(RiskError::invalid_input("sample count must be positive"));
        }
        Ok(())
    }

    /// Calendar days of history requested to cover `sample_count + 1` prices.
    ///
    /// Saturates at `i64::MAX` for sample counts no calendar can hold.
    #[must_use]
    pub fn lookback_days(&self) -> i64 {
        let trading_days = self.sample_count as f64 + 1.0;
        let calendar = (trading_days * 365.0 / TRADING_DAYS_PER_YEAR).ceil() as i64;
        calendar.saturating_add(i64::from(self.lookback_buffer_days))
    }

    /// Inclusive `(start, end)` fetch range ending at `as_of`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the window would start before the earliest
    /// representable date.
    pub fn fetch_window(&self, as_of: Date) -> RiskResult<(Date, Date)> {
        let lookback = self.lookback_days();
        let start = as_of.checked_sub_days(lookback).ok_or_else(|| {
            RiskError::invalid_input(format!(
                "sample count {} needs {lookback} calendar days before {as_of}",
                self.sample_count
            ))
        })?;
        Ok((start, as_of))
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// `RiskError::Config` if the text is not valid TOML for this struct.
    pub fn from_toml_str(content: &str) -> RiskResult<Self> {
        toml::from_str(content).map_err(|e| RiskError::Config(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// `RiskError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> RiskResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RiskError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = VarConfig::default();
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.sample_count, 252);
        assert_eq!(config.decay_lambda, 0.94);
        assert!(config.use_ewma);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_confidence_boundaries_are_degenerate() {
        for confidence in [0.0, 1.0] {
            let err = VarConfig::default()
                .with_confidence(confidence)
                .validate()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NumericalDegenerate);
        }
    }

    #[test]
    fn test_out_of_range_is_invalid_input() {
        let cases = [
            VarConfig::default().with_confidence(1.5),
            VarConfig::default().with_confidence(-0.1),
            VarConfig::default().with_confidence(f64::NAN),
            VarConfig::default().with_decay_lambda(0.0),
            VarConfig::default().with_decay_lambda(1.0),
            VarConfig::default().with_decay_lambda(f64::NAN),
            VarConfig::default().with_sample_count(0),
        ];
        for config in cases {
            assert_eq!(
                config.validate().unwrap_err().kind(),
                ErrorKind::InvalidInput,
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_fetch_window() {
        let config = VarConfig::default().with_sample_count(252);
        // ceil(253 * 365 / 252) = 367, plus 30 days of padding
        assert_eq!(config.lookback_days(), 397);

        let as_of = Date::from_ymd(2024, 6, 28).unwrap();
        let (start, end) = config.fetch_window(as_of).unwrap();
        assert_eq!(end, as_of);
        assert_eq!(start.days_between(&end), 397);
    }

    #[test]
    fn test_fetch_window_out_of_calendar_is_invalid_input() {
        let as_of = Date::from_ymd(2024, 6, 28).unwrap();
        for sample_count in [1_000_000_000, usize::MAX] {
            let config = VarConfig::default().with_sample_count(sample_count);
            assert!(config.validate().is_ok());
            assert_eq!(
                config.fetch_window(as_of).unwrap_err().kind(),
                ErrorKind::InvalidInput
            );
        }
        assert_eq!(
            VarConfig::default().with_sample_count(usize::MAX).lookback_days(),
            i64::MAX
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = VarConfig::from_toml_str("confidence = 0.95\nuse_ewma = false\n").unwrap();
        assert_eq!(config.confidence, 0.95);
        assert!(!config.use_ewma);
        assert_eq!(config.sample_count, 252);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = VarConfig::from_toml_str("confidence = \"high\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sample_count = 100\ndecay_lambda = 0.97").unwrap();

        let config = VarConfig::from_file(file.path()).unwrap();
        assert_eq!(config.sample_count, 100);
        assert_eq!(config.decay_lambda, 0.97);

        let missing = VarConfig::from_file("/nonexistent/var.toml").unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Config);
    }
}
