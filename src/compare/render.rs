use std::fmt;

use super::{
    Assessment, ComparisonKind, ComparisonReport, CompareOnlyReport, HistoricalTrend, Verdict,
};

const RULE_WIDTH: usize = 70;
const BAR_BLOCK: &str = "█";

fn rule(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(RULE_WIDTH))
}

const fn assessment_mark(assessment: Assessment) -> &'static str {
    match assessment {
        Assessment::Improved => "✅",
        Assessment::Regressed => "❌",
        Assessment::Unchanged => "➖",
    }
}

fn arrow(change_pct: f64) -> &'static str {
    if change_pct < 0.0 {
        "↓"
    } else if change_pct > 0.0 {
        "↑"
    } else {
        "→"
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |value| format!("{:.2}", value))
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=')?;
        match self.kind {
            ComparisonKind::Baseline => writeln!(f, "COMPARISON WITH BASELINE")?,
            ComparisonKind::Previous => writeln!(f, "COMPARISON WITH PREVIOUS RUN")?,
        }
        rule(f, '=')?;
        if let Some(previous) = self.previous_label.as_deref() {
            writeln!(f, "{:10}: {}", self.kind.label(), previous)?;
        }
        if let Some(current) = self.current_label.as_deref() {
            writeln!(f, "{:10}: {}", "Current", current)?;
        }
        rule(f, '-')?;
        for delta in &self.deltas {
            let unit = delta.metric.unit();
            writeln!(
                f,
                "  {} {:15} {:8.2}{} → {:8.2}{} ({} {:5.1}%)",
                assessment_mark(delta.assessment),
                delta.metric.name(),
                delta.previous,
                unit,
                delta.current,
                unit,
                arrow(delta.change_pct),
                delta.change_pct.abs()
            )?;
        }
        match self.verdict {
            Some(Verdict::Regression) => {
                writeln!(f, "\n⚠️  PERFORMANCE REGRESSION vs baseline detected!")?;
            }
            Some(Verdict::Improvement) => writeln!(f, "\n✅ PERFORMANCE IMPROVEMENT vs baseline!")?,
            Some(Verdict::Similar) => writeln!(f, "\n➖ Performance similar to baseline")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for HistoricalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '-')?;
        writeln!(f, "HISTORICAL TREND (Last 5 runs):")?;
        for trend in &self.series {
            writeln!(f, "\n{} Trend:", trend.metric.name())?;
            for bar in &trend.bars {
                writeln!(
                    f,
                    "  {}: {} {:.1}{}",
                    bar.label,
                    BAR_BLOCK.repeat(bar.length),
                    bar.value,
                    trend.metric.unit()
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CompareOnlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '=')?;
        writeln!(f, "BENCHMARK RESULTS COMPARISON")?;
        rule(f, '=')?;
        writeln!(f, "\nRecent benchmark results:")?;
        rule(f, '-')?;
        writeln!(
            f,
            "{:<20} {:<8} {:<6} {:<10} {:<10} {:<10}",
            "Timestamp", "Mode", "Reqs", "P99(ms)", "Mean(ms)", "RPS"
        )?;
        rule(f, '-')?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} {:<8} {:<6} {:<10} {:<10} {:<10}",
                row.id.stamp(),
                row.mode.as_str(),
                row.requests,
                optional(row.p99_latency_ms),
                optional(row.mean_latency_ms),
                optional(row.requests_per_sec)
            )?;
        }
        if let Some(change) = self.last_change.as_ref() {
            writeln!(f)?;
            rule(f, '-')?;
            writeln!(f, "Performance change (last vs previous):")?;
            for delta in &change.deltas {
                writeln!(
                    f,
                    "  {} {}: {:+.1}%",
                    assessment_mark(delta.assessment),
                    delta.metric.name(),
                    delta.change_pct
                )?;
            }
        }
        rule(f, '=')
    }
}
