use std::path::Path;

use tracing::warn;

use crate::compare::{
    ComparisonKind, HistoricalTrend, TrendPoint, compare, compare_only,
};
use crate::error::{AppError, AppResult};
use crate::store::{RecordId, ResultStore, StoredRun};

/// Prior records shown in the trend next to the current run.
const TREND_PRIOR: usize = 4;
const CURRENT_LABEL: &str = "current";

pub(super) fn resolve_store(results_dir: Option<&str>) -> ResultStore {
    results_dir.map_or_else(ResultStore::resolve_default, ResultStore::new)
}

/// Baseline comparison, then previous-run comparison and trend.
pub(super) fn compare_with_history(
    store: &ResultStore,
    run: &StoredRun,
    explicit_baseline: Option<&Path>,
    saved: Option<&RecordId>,
) {
    compare_with_baseline(store, run, explicit_baseline, saved);

    let prior: Vec<RecordId> = match store.list_records() {
        Ok(ids) => ids
            .into_iter()
            .filter(|id| Some(id) != saved)
            .collect(),
        Err(err) => {
            warn!("Failed to read result index: {}", err);
            Vec::new()
        }
    };
    let Some(latest) = prior.last() else {
        println!("\n📊 No previous results to compare with.");
        return;
    };

    match store.load(latest) {
        Ok(previous) => {
            let report = compare(
                &run.performance_summary,
                &previous.performance_summary,
                ComparisonKind::Previous,
            )
            .with_labels(latest.file_name(), current_label(saved));
            println!("\n{}", report);
        }
        Err(err) => println!("\n⚠️  Could not compare with {}: {}", latest.file_name(), err),
    }

    let skip = prior.len().saturating_sub(TREND_PRIOR);
    let points: Vec<TrendPoint> = prior
        .iter()
        .skip(skip)
        .filter_map(|id| match store.load(id) {
            Ok(stored) => Some(TrendPoint {
                label: id.stamp().to_owned(),
                metrics: stored.performance_summary,
            }),
            Err(err) => {
                warn!("Skipping {} in trend: {}", id, err);
                None
            }
        })
        .collect();
    let current = TrendPoint {
        label: saved.map_or_else(|| CURRENT_LABEL.to_owned(), |id| id.stamp().to_owned()),
        metrics: run.performance_summary,
    };
    let trend = HistoricalTrend::from_points(&points, current);
    if !trend.series.is_empty() {
        println!("\n{}", trend);
    }
}

fn compare_with_baseline(
    store: &ResultStore,
    run: &StoredRun,
    explicit_baseline: Option<&Path>,
    saved: Option<&RecordId>,
) {
    let Some(path) = store.find_baseline(explicit_baseline) else {
        println!("\n📊 No baseline found. Checked locations:");
        for location in store.baseline_candidates(explicit_baseline) {
            println!("   - {}", location.display());
        }
        println!("   Tip: Create a baseline with one of:");
        println!(
            "   cp {}/benchmark_YYYYMMDD_HHMMSS.json benchmark_baseline.json",
            store.dir().display()
        );
        println!(
            "   cp {}/benchmark_YYYYMMDD_HHMMSS.json server/benchmark_baseline.json",
            store.dir().display()
        );
        return;
    };

    match ResultStore::load_path(&path) {
        Ok(baseline) => {
            let report = compare(
                &run.performance_summary,
                &baseline.performance_summary,
                ComparisonKind::Baseline,
            )
            .with_labels(file_label(&path), current_label(saved));
            println!("\n{}", report);
        }
        Err(err) => println!("\n⚠️  Could not compare with {}: {}", file_label(&path), err),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn current_label(saved: Option<&RecordId>) -> String {
    saved.map_or_else(|| CURRENT_LABEL.to_owned(), RecordId::file_name)
}

/// Prints the recent-history table without issuing any requests.
///
/// # Errors
///
/// Returns an error when fewer than two records exist or the index cannot
/// be read.
pub(crate) fn run_compare_only(results_dir: Option<&str>) -> AppResult<()> {
    let store = resolve_store(results_dir);
    let report = compare_only(&store).map_err(AppError::compare)?;
    println!("{}", report);
    Ok(())
}
