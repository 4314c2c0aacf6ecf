//! Benchmark and drain reports.

use std::fmt::Write as _;
use std::time::Duration;

use paging_core::Strategy;
use serde::{Serialize, Serializer};

use crate::config::{BenchCase, OutputFormat};

/// Timing summary over the iterations of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationStats {
    #[serde(rename = "min_ms", serialize_with = "as_millis")]
    pub min: Duration,
    #[serde(rename = "mean_ms", serialize_with = "as_millis")]
    pub mean: Duration,
    #[serde(rename = "max_ms", serialize_with = "as_millis")]
    pub max: Duration,
}

impl DurationStats {
    /// Summarizes the given samples; `None` when there are none.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = samples.iter().min().copied()?;
        let max = samples.iter().max().copied()?;
        let total: Duration = samples.iter().sum();
        let mean = total / u32::try_from(samples.len()).ok()?;

        Some(Self { min, mean, max })
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(millis(*duration))
}

fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Result of timing one engine on one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineReport {
    pub strategy: Strategy,
    pub rows: usize,
    #[serde(flatten)]
    pub stats: DurationStats,
}

/// Result of one benchmark case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub page_size: i64,
    pub total: i64,
    pub iterations: u32,
    pub engines: Vec<EngineReport>,
    /// Whether every engine returned the same rows in the same order.
    pub identical: bool,
}

impl CaseReport {
    /// Creates an empty report for `case`.
    pub fn new(case: BenchCase, iterations: u32) -> Self {
        Self {
            page_size: case.page_size,
            total: case.total,
            iterations,
            engines: Vec::new(),
            identical: true,
        }
    }
}

/// Report of a complete `bench` run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchReport {
    pub cases: Vec<CaseReport>,
}

impl BenchReport {
    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = format!(
            "{:>9} {:>9} {:<8} {:>9} {:>12} {:>12} {:>12} {:>9}\n",
            "page_size", "total", "strategy", "rows", "min_ms", "mean_ms", "max_ms", "identical"
        );

        for case in &self.cases {
            for engine in &case.engines {
                let _ = writeln!(
                    out,
                    "{:>9} {:>9} {:<8} {:>9} {:>12.3} {:>12.3} {:>12.3} {:>9}",
                    case.page_size,
                    case.total,
                    engine.strategy,
                    engine.rows,
                    millis(engine.stats.min),
                    millis(engine.stats.mean),
                    millis(engine.stats.max),
                    case.identical,
                );
            }
        }

        out
    }
}

/// Summary of a single `drain` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrainReport {
    pub strategy: Strategy,
    pub page_size: i64,
    pub rows: usize,
    pub first_id: Option<i64>,
    pub last_id: Option<i64>,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl DrainReport {
    /// Renders the summary in the requested format.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(format!(
                "strategy={} page_size={} rows={} ids={}..{} elapsed_ms={:.3}",
                self.strategy,
                self.page_size,
                self.rows,
                self.first_id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
                self.last_id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
                millis(self.elapsed),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sample_report() -> BenchReport {
        let stats = DurationStats::from_samples(&[ms(10), ms(20), ms(30)]).unwrap();
        let mut case = CaseReport::new(BenchCase::new(100, 1000), 3);
        case.engines.push(EngineReport {
            strategy: Strategy::Offset,
            rows: 1000,
            stats,
        });
        case.engines.push(EngineReport {
            strategy: Strategy::Cursor,
            rows: 1000,
            stats,
        });

        BenchReport { cases: vec![case] }
    }

    #[test]
    fn test_duration_stats() {
        let stats = DurationStats::from_samples(&[ms(30), ms(10), ms(20)]).unwrap();
        assert_eq!(stats.min, ms(10));
        assert_eq!(stats.mean, ms(20));
        assert_eq!(stats.max, ms(30));

        assert!(DurationStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_text_report_has_a_row_per_engine() {
        let text = sample_report().render(OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("mean_ms"));
        assert!(lines[1].contains("offset"));
        assert!(lines[2].contains("cursor"));
        assert!(lines[2].contains("20.000"));
    }

    #[test]
    fn test_json_report() {
        let json = sample_report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let case = &value["cases"][0];
        assert_eq!(case["page_size"], 100);
        assert_eq!(case["identical"], true);
        assert_eq!(case["engines"][1]["strategy"], "cursor");
        assert_eq!(case["engines"][0]["max_ms"], 30.0);
    }

    #[test]
    fn test_drain_summary() {
        let report = DrainReport {
            strategy: Strategy::Cursor,
            page_size: 10,
            rows: 0,
            first_id: None,
            last_id: None,
            elapsed: ms(2),
        };

        assert_eq!(
            report.render(OutputFormat::Text).unwrap(),
            "strategy=cursor page_size=10 rows=0 ids=-..- elapsed_ms=2.000"
        );
    }
}
