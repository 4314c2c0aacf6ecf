//! Benchmark run configuration.

use std::fmt;
use std::str::FromStr;

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Cases measured when none are given on the command line.
const DEFAULT_CASES: [&str; 6] = [
    "100:100",
    "100:1000",
    "100:10000",
    "500:100000",
    "1000:500000",
    "1000:1000000",
];

/// One benchmark case: a table of `total` rows drained `page_size` rows at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchCase {
    pub page_size: i64,
    pub total: i64,
}

impl BenchCase {
    /// Creates a new case.
    pub const fn new(page_size: i64, total: i64) -> Self {
        Self { page_size, total }
    }
}

impl fmt::Display for BenchCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_size, self.total)
    }
}

/// Error returned when a `PAGE_SIZE:TOTAL` case fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BenchCaseError {
    #[error("expected PAGE_SIZE:TOTAL, got '{0}'")]
    Format(String),
    #[error("'{0}' is not a number")]
    Number(String),
    #[error("page size must be positive, got {0}")]
    PageSize(i64),
    #[error("total must not be negative, got {0}")]
    Total(i64),
}

impl FromStr for BenchCase {
    type Err = BenchCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (page_size, total) = s
            .split_once(':')
            .ok_or_else(|| BenchCaseError::Format(s.to_owned()))?;

        let number = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| BenchCaseError::Number(part.to_owned()))
        };

        let case = Self::new(number(page_size)?, number(total)?);
        if case.page_size <= 0 {
            return Err(BenchCaseError::PageSize(case.page_size));
        }
        if case.total < 0 {
            return Err(BenchCaseError::Total(case.total));
        }

        Ok(case)
    }
}

/// Format of the command output on stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned, human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments of `bench`.
#[derive(Debug, Clone, Args)]
pub struct BenchConfig {
    /// Case to measure as PAGE_SIZE:TOTAL; repeat for several cases.
    #[arg(long = "case", value_name = "PAGE_SIZE:TOTAL", default_values = DEFAULT_CASES)]
    pub cases: Vec<BenchCase>,

    /// Timed drains per engine and case.
    #[arg(long, default_value_t = 3)]
    pub iterations: u32,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl BenchConfig {
    /// Validates the run parameters.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cases.is_empty() {
            anyhow::bail!("at least one case is required");
        }

        if !(1..=100).contains(&self.iterations) {
            anyhow::bail!(
                "iterations must be between 1 and 100, got {}",
                self.iterations
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_cases() {
        assert_eq!("100:1000".parse(), Ok(BenchCase::new(100, 1000)));
        assert_eq!(" 5 : 0 ".parse(), Ok(BenchCase::new(5, 0)));
        assert_eq!(BenchCase::new(500, 100_000).to_string(), "500:100000");
    }

    #[test]
    fn test_rejects_malformed_cases() {
        assert!(matches!(
            "100".parse::<BenchCase>(),
            Err(BenchCaseError::Format(_))
        ));
        assert!(matches!(
            "a:10".parse::<BenchCase>(),
            Err(BenchCaseError::Number(_))
        ));
        assert_eq!("0:10".parse::<BenchCase>(), Err(BenchCaseError::PageSize(0)));
        assert_eq!("10:-1".parse::<BenchCase>(), Err(BenchCaseError::Total(-1)));
    }

    #[test]
    fn test_default_cases_parse() {
        let cases: Vec<BenchCase> = DEFAULT_CASES
            .iter()
            .map(|case| case.parse().unwrap())
            .collect();
        assert_eq!(cases.first(), Some(&BenchCase::new(100, 100)));
        assert_eq!(cases.last(), Some(&BenchCase::new(1000, 1_000_000)));
    }

    #[test]
    fn test_validation() {
        let config = BenchConfig {
            cases: vec![BenchCase::new(10, 100)],
            iterations: 3,
            format: OutputFormat::Text,
        };
        assert!(config.validate().is_ok());

        let no_cases = BenchConfig {
            cases: Vec::new(),
            ..config.clone()
        };
        assert!(no_cases.validate().is_err());

        let no_iterations = BenchConfig {
            iterations: 0,
            ..config
        };
        assert!(no_iterations.validate().is_err());
    }
}
