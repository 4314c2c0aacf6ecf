//! `bench`: times full drains of both engines over a series of table sizes.

use std::time::{Duration, Instant};

use anyhow::Context;
use paging_core::{CancellationToken, CursorPaging, DrainPages, OffsetPaging, PagingConfig};
use paging_postgres::prelude::*;

use super::seed::reseed;
use crate::TRACING_TARGET_BENCH;
use crate::config::{BenchCase, BenchConfig};
use crate::report::{BenchReport, CaseReport, DurationStats, EngineReport};

pub(super) async fn run(
    client: &PgClient,
    paging: PagingConfig,
    config: &BenchConfig,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let mut report = BenchReport::default();

    for &case in &config.cases {
        let result = run_case(client, paging, case, config.iterations, cancel)
            .await
            .with_context(|| format!("case {case} failed"))?;
        report.cases.push(result);
    }

    println!("{}", report.render(config.format)?);
    Ok(())
}

/// Seeds the table for `case`, then drains it `iterations` times per engine.
async fn run_case(
    client: &PgClient,
    paging: PagingConfig,
    case: BenchCase,
    iterations: u32,
    cancel: &CancellationToken,
) -> anyhow::Result<CaseReport> {
    reseed(client, case.total, cancel).await?;

    let offset = OffsetPaging::with_config(client.clone(), paging);
    let cursor = CursorPaging::with_config(client.clone(), paging);

    let mut report = CaseReport::new(case, iterations);
    let (offset_report, by_offset) = measure(&offset, case, iterations, cancel).await?;
    let (cursor_report, by_cursor) = measure(&cursor, case, iterations, cancel).await?;
    report.engines.extend([offset_report, cursor_report]);
    report.identical = by_offset == by_cursor;

    if !report.identical {
        tracing::warn!(
            target: TRACING_TARGET_BENCH,
            %case,
            offset_rows = by_offset.len(),
            cursor_rows = by_cursor.len(),
            "Engines returned different rows"
        );
    }

    Ok(report)
}

/// Drains the table `iterations` times and returns the timings and the rows
/// of the last drain.
async fn measure<D>(
    engine: &D,
    case: BenchCase,
    iterations: u32,
    cancel: &CancellationToken,
) -> anyhow::Result<(EngineReport, Vec<User>)>
where
    D: DrainPages<Row = User>,
{
    let strategy = engine.strategy();
    let mut samples = Vec::<Duration>::with_capacity(iterations as usize);
    let mut users = Vec::new();

    for iteration in 1..=iterations {
        let started = Instant::now();
        users = engine
            .select_all(case.page_size, cancel)
            .await
            .with_context(|| format!("{strategy} drain failed"))?;
        let elapsed = started.elapsed();
        samples.push(elapsed);

        tracing::info!(
            target: TRACING_TARGET_BENCH,
            %case,
            %strategy,
            iteration,
            rows = users.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Drain timed"
        );
    }

    let stats = DurationStats::from_samples(&samples).context("no iterations were run")?;
    let report = EngineReport {
        strategy,
        rows: users.len(),
        stats,
    };

    Ok((report, users))
}
