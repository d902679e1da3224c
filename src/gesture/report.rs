//! Structured and human-readable session reports plus their persistence.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::gesture::cursor_metrics::{
    CursorTestTracker, Rating, EDGE_BANDS, PRECISION_BANDS, RAPID_BANDS, SMOOTHNESS_BANDS,
};
use crate::gesture::metrics::{FpsStats, GestureMetrics, LabelTotals, ResponseTimeStats};
use crate::gesture::types::GestureKind;

const RULE_WIDTH: usize = 80;
/// Kinds with a non-zero accuracy below this are flagged for improvement.
const WEAK_ACCURACY_PERCENT: f64 = 75.0;
const TARGET_FPS: f64 = 20.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSummary {
    pub detected: u64,
    pub true_positive: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub accuracy_percent: f64,
    pub response_time: ResponseTimeStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureReport {
    pub session_id: Uuid,
    pub test_timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    pub overall_accuracy_percent: f64,
    pub overall_mean_response_time_ms: f64,
    pub mean_frame_processing_time_ms: f64,
    #[serde(default)]
    pub fps: FpsStats,
    pub gestures: BTreeMap<GestureKind, GestureSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceBand {
    pub fn from_accuracy(accuracy_percent: f64) -> Self {
        if accuracy_percent >= 90.0 {
            PerformanceBand::VeryGood
        } else if accuracy_percent >= 80.0 {
            PerformanceBand::Good
        } else if accuracy_percent >= 70.0 {
            PerformanceBand::Fair
        } else {
            PerformanceBand::NeedsImprovement
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            PerformanceBand::VeryGood => "VERY GOOD, accuracy at or above 90%",
            PerformanceBand::Good => "GOOD, accuracy at or above 80%",
            PerformanceBand::Fair => "FAIR, accuracy at or above 70%",
            PerformanceBand::NeedsImprovement => "NEEDS IMPROVEMENT, accuracy below 70%",
        }
    }
}

impl GestureReport {
    pub fn from_metrics(metrics: &GestureMetrics, elapsed: Duration) -> Self {
        let gestures = metrics
            .records()
            .map(|(kind, record)| {
                let summary = GestureSummary {
                    detected: record.detected,
                    true_positive: record.true_positive,
                    false_positive: record.false_positive,
                    false_negative: record.false_negative,
                    accuracy_percent: metrics.accuracy(kind),
                    response_time: metrics.response_time_stats(kind),
                };
                (kind, summary)
            })
            .collect();

        Self {
            session_id: metrics.session_id(),
            test_timestamp: Utc::now(),
            duration_seconds: elapsed.as_secs_f64(),
            overall_accuracy_percent: metrics.overall_accuracy(),
            overall_mean_response_time_ms: metrics.overall_mean_response_time(),
            mean_frame_processing_time_ms: metrics.mean_frame_processing_time(),
            fps: metrics.fps_stats(),
            gestures,
        }
    }

    pub fn totals(&self) -> LabelTotals {
        self.gestures.values().fold(LabelTotals::default(), |mut acc, g| {
            acc.detected += g.detected;
            acc.true_positive += g.true_positive;
            acc.false_positive += g.false_positive;
            acc.false_negative += g.false_negative;
            acc
        })
    }

    /// Pooled accuracy recomputed from the per-kind counters.
    pub fn recompute_overall_accuracy(&self) -> f64 {
        let t = self.totals();
        let denom = t.true_positive + t.false_positive + t.false_negative;
        if denom == 0 {
            0.0
        } else {
            t.true_positive as f64 / denom as f64 * 100.0
        }
    }

    /// Sample-weighted mean of the per-kind response-time means.
    pub fn recompute_mean_response_time(&self) -> f64 {
        let (sum, count) = self.gestures.values().fold((0.0, 0usize), |(sum, count), g| {
            (
                sum + g.response_time.mean_ms * g.response_time.sample_count as f64,
                count + g.response_time.sample_count,
            )
        });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn meets_fps_target(&self) -> bool {
        self.fps.average > TARGET_FPS
    }

    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_accuracy(self.overall_accuracy_percent)
    }

    fn ordered(&self) -> impl Iterator<Item = (GestureKind, &GestureSummary)> {
        GestureKind::TRACKED
            .into_iter()
            .filter_map(|kind| self.gestures.get(&kind).map(|g| (kind, g)))
    }

    pub fn best_accuracy(&self) -> Option<(GestureKind, f64)> {
        self.ordered()
            .filter(|(_, g)| g.accuracy_percent > 0.0)
            .fold(None, |best: Option<(GestureKind, f64)>, (kind, g)| match best {
                Some((_, acc)) if acc >= g.accuracy_percent => best,
                _ => Some((kind, g.accuracy_percent)),
            })
    }

    /// Lowest accuracy among kinds that received at least one label.
    pub fn worst_accuracy(&self) -> Option<(GestureKind, f64)> {
        self.ordered()
            .filter(|(_, g)| g.true_positive + g.false_positive + g.false_negative > 0)
            .fold(None, |worst: Option<(GestureKind, f64)>, (kind, g)| match worst {
                Some((_, acc)) if acc <= g.accuracy_percent => worst,
                _ => Some((kind, g.accuracy_percent)),
            })
    }

    pub fn best_response_time(&self) -> Option<(GestureKind, f64)> {
        self.ordered()
            .filter(|(_, g)| g.response_time.sample_count > 0)
            .fold(None, |best: Option<(GestureKind, f64)>, (kind, g)| match best {
                Some((_, rt)) if rt <= g.response_time.mean_ms => best,
                _ => Some((kind, g.response_time.mean_ms)),
            })
    }

    pub fn needs_improvement(&self) -> Vec<(GestureKind, f64)> {
        self.ordered()
            .filter(|(_, g)| g.accuracy_percent > 0.0 && g.accuracy_percent < WEAK_ACCURACY_PERCENT)
            .map(|(kind, g)| (kind, g.accuracy_percent))
            .collect()
    }

    /// Fixed-width table used for both the terminal summary and the text report.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<16} {:>8} {:>5} {:>5} {:>5} {:>9} {:>10} {:>10} {:>10}",
            "Gesture", "Detected", "TP", "FP", "FN", "Accuracy", "Mean ms", "Min ms", "Max ms"
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for (kind, g) in self.ordered() {
            let _ = writeln!(
                out,
                "{:<16} {:>8} {:>5} {:>5} {:>5} {:>8.2}% {:>10.2} {:>10.2} {:>10.2}",
                kind.display_name(),
                g.detected,
                g.true_positive,
                g.false_positive,
                g.false_negative,
                g.accuracy_percent,
                g.response_time.mean_ms,
                g.response_time.min_ms,
                g.response_time.max_ms,
            );
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let totals = self.totals();
        let _ = writeln!(
            out,
            "{:<16} {:>8} {:>5} {:>5} {:>5} {:>8.2}% {:>10.2}",
            "Overall",
            totals.detected,
            totals.true_positive,
            totals.false_positive,
            totals.false_negative,
            self.overall_accuracy_percent,
            self.overall_mean_response_time_ms,
        );
        out
    }

    pub fn render_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);
        let totals = self.totals();
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "GESTURE MOUSE TEST REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Session    : {}", self.session_id);
        let _ = writeln!(
            out,
            "Test time  : {}",
            self.test_timestamp.format("%d %B %Y, %H:%M:%S UTC")
        );
        let _ = writeln!(
            out,
            "Duration   : {:.2} s ({:.2} min)\n",
            self.duration_seconds,
            self.duration_seconds / 60.0
        );

        let _ = writeln!(out, "RESULTS PER GESTURE");
        let _ = writeln!(out, "{thin}");
        out.push_str(&self.render_table());
        out.push('\n');

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "{thin}");
        let _ = writeln!(out, "Total true positive    : {}", totals.true_positive);
        let _ = writeln!(out, "Total false positive   : {}", totals.false_positive);
        let _ = writeln!(out, "Total false negative   : {}", totals.false_negative);
        let _ = writeln!(out, "System accuracy        : {:.2}%", self.overall_accuracy_percent);
        let _ = writeln!(out, "Precision              : {:.2}%", totals.precision());
        let _ = writeln!(out, "Recall                 : {:.2}%", totals.recall());
        let _ = writeln!(out, "F1 score               : {:.2}", totals.f1());
        let _ = writeln!(
            out,
            "Mean response time     : {:.2} ms",
            self.overall_mean_response_time_ms
        );
        let _ = writeln!(
            out,
            "Mean frame processing  : {:.2} ms",
            self.mean_frame_processing_time_ms
        );
        let _ = writeln!(out, "{rule}\n");

        let _ = writeln!(out, "FRAME RATE");
        let _ = writeln!(out, "{thin}");
        let _ = writeln!(out, "Average : {:.2} fps", self.fps.average);
        let _ = writeln!(out, "Minimum : {:.2} fps", self.fps.min);
        let _ = writeln!(out, "Maximum : {:.2} fps", self.fps.max);
        let _ = writeln!(
            out,
            "Target  : >{TARGET_FPS:.0} fps ({})\n",
            if self.meets_fps_target() { "met" } else { "not met" }
        );

        let _ = writeln!(out, "ANALYSIS");
        let _ = writeln!(out, "{thin}");
        let _ = writeln!(out, "Overall performance: {}.\n", self.band().describe());

        if let Some((kind, acc)) = self.best_accuracy() {
            let _ = writeln!(out, "Best accuracy:\n  - {}: {acc:.2}%\n", kind.display_name());
        }
        if let Some((kind, acc)) = self.worst_accuracy() {
            let _ = writeln!(out, "Lowest accuracy:\n  - {}: {acc:.2}%\n", kind.display_name());
        }
        if let Some((kind, rt)) = self.best_response_time() {
            let _ = writeln!(
                out,
                "Fastest response time:\n  - {}: {rt:.2} ms\n",
                kind.display_name()
            );
        }
        let weak = self.needs_improvement();
        if !weak.is_empty() {
            let _ = writeln!(out, "Gestures that need improvement:");
            for (kind, acc) in weak {
                let _ = writeln!(out, "  - {}: {acc:.2}%", kind.display_name());
            }
        }
        out
    }
}

fn section(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n{title}\n{rule}\n");
}

pub fn render_cursor_text(tracker: &CursorTestTracker, generated_at: DateTime<Utc>) -> String {
    let precision = tracker.precision_stats();
    let smoothness = tracker.smoothness_stats();
    let edge = tracker.edge_stats();
    let rapid = tracker.rapid_stats();
    let speed = tracker.speed_stats();
    let mut out = String::new();

    section(&mut out, "CURSOR CONTROL TEST REPORT");
    let _ = writeln!(
        out,
        "Test time: {}\n",
        generated_at.format("%d %B %Y, %H:%M:%S UTC")
    );
    let _ = writeln!(out, "THRESHOLDS:");
    let _ = writeln!(out, "  - Rapid movement time     : < {} ms", rapid.thresholds.time_ms);
    let _ = writeln!(out, "  - Rapid movement distance : > {} px", rapid.thresholds.distance_px);
    let _ = writeln!(out, "  - Precision hit radius    : < {} px", tracker.precision_hit_radius());
    let _ = writeln!(out, "  - Edge detection range    : < {} px\n", tracker.edge_margin());

    section(&mut out, "1. PRECISION POINTING");
    if precision.count > 0 {
        let _ = writeln!(out, "Tests              : {} points", precision.count);
        let _ = writeln!(out, "Accuracy           : {:.2}%", precision.accuracy_percent);
        let _ = writeln!(out, "Mean latency       : {:.2} ms", precision.mean_latency_ms);
        let _ = writeln!(out, "Mean deviation     : {:.2} px", precision.mean_deviation_px);
        let _ = writeln!(out, "Min deviation      : {:.2} px", precision.min_deviation_px);
        let _ = writeln!(out, "Max deviation      : {:.2} px", precision.max_deviation_px);
        let _ = writeln!(out, "Target hits        : {}/{}", precision.hits, precision.count);
        let _ = writeln!(
            out,
            "Rating             : {}\n",
            Rating::from_score(precision.accuracy_percent, PRECISION_BANDS)
        );
        for (i, t) in tracker.precision_tests().iter().enumerate() {
            let _ = writeln!(
                out,
                "  Target {}: ({}, {}) -> cursor ({}, {}) deviation {:.2} px",
                i + 1,
                t.target.x,
                t.target.y,
                t.cursor.x,
                t.cursor.y,
                t.deviation_px
            );
        }
        out.push('\n');
    } else {
        let _ = writeln!(out, "No test data.\n");
    }

    section(&mut out, "2. CURSOR SMOOTHNESS");
    if smoothness.sample_count >= 3 {
        let _ = writeln!(out, "Samples            : {}", smoothness.sample_count);
        let _ = writeln!(out, "Smoothness score   : {:.2}/100", smoothness.smoothness_score);
        let _ = writeln!(out, "Jitter             : {:.2} px", smoothness.jitter_px);
        let _ = writeln!(out, "Mean latency       : {:.2} ms", smoothness.mean_latency_ms);
        let _ = writeln!(
            out,
            "Rating             : {}\n",
            Rating::from_score(smoothness.smoothness_score, SMOOTHNESS_BANDS)
        );
    } else {
        let _ = writeln!(out, "No test data.\n");
    }

    section(&mut out, "3. EDGE DETECTION");
    if edge.count > 0 {
        let _ = writeln!(out, "Tests              : {} edge points", edge.count);
        let _ = writeln!(out, "Accuracy           : {:.2}%", edge.accuracy_percent);
        let _ = writeln!(out, "Mean latency       : {:.2} ms", edge.mean_latency_ms);
        let _ = writeln!(out, "Mean deviation     : {:.2} px", edge.mean_deviation_px);
        let _ = writeln!(out, "Edge hits          : {}/{}", edge.edge_hits, edge.count);
        let _ = writeln!(
            out,
            "Rating             : {}\n",
            Rating::from_score(edge.accuracy_percent, EDGE_BANDS)
        );
    } else {
        let _ = writeln!(out, "No test data.\n");
    }

    section(&mut out, "4. RAPID MOVEMENT");
    if rapid.count > 0 {
        let _ = writeln!(out, "Movements          : {}", rapid.count);
        let _ = writeln!(out, "Accuracy           : {:.2}%", rapid.accuracy_percent);
        let _ = writeln!(out, "Mean time          : {:.2} ms", rapid.mean_elapsed_ms);
        let _ = writeln!(out, "Mean distance      : {:.2} px", rapid.mean_distance_px);
        let _ = writeln!(out, "Mean speed         : {:.2} px/s", rapid.mean_speed_px_per_s);
        let _ = writeln!(out, "Successful         : {}/{}", rapid.successful, rapid.count);
        let _ = writeln!(
            out,
            "Rating             : {}\n",
            Rating::from_score(rapid.accuracy_percent, RAPID_BANDS)
        );
    } else {
        let _ = writeln!(out, "No test data.\n");
    }

    section(&mut out, "5. TRACKING SPEED");
    if speed.is_empty() {
        let _ = writeln!(out, "No test data.\n");
    } else {
        for (category, stats) in &speed {
            let _ = writeln!(
                out,
                "{:<8} : {} runs, mean {:.2} ms, {:.2} px/s",
                category.as_str(),
                stats.count,
                stats.mean_elapsed_ms,
                stats.mean_speed_px_per_s
            );
        }
        out.push('\n');
    }

    section(&mut out, "SUMMARY TABLE");
    let _ = writeln!(
        out,
        "{:<20} | {:>6} | {:>12} | {:>12} | {:>10}",
        "Aspect", "Tests", "Accuracy (%)", "Latency (ms)", "Smoothness"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let row = |out: &mut String, name: &str, count: usize, acc: String, lat: String, smooth: String| {
        let _ = writeln!(out, "{name:<20} | {count:>6} | {acc:>12} | {lat:>12} | {smooth:>10}");
    };
    let dash = || "-".to_string();
    if precision.count > 0 {
        row(
            &mut out,
            "Precision pointing",
            precision.count,
            format!("{:.2}", precision.accuracy_percent),
            format!("{:.2}", precision.mean_latency_ms),
            dash(),
        );
    } else {
        row(&mut out, "Precision pointing", 0, dash(), dash(), dash());
    }
    if smoothness.sample_count >= 3 {
        row(
            &mut out,
            "Cursor smoothness",
            smoothness.sample_count,
            format!("{:.2}", smoothness.smoothness_score.min(100.0)),
            format!("{:.2}", smoothness.mean_latency_ms),
            format!("{:.2}", smoothness.smoothness_score),
        );
    } else {
        row(&mut out, "Cursor smoothness", smoothness.sample_count, dash(), dash(), dash());
    }
    if edge.count > 0 {
        row(
            &mut out,
            "Edge detection",
            edge.count,
            format!("{:.2}", edge.accuracy_percent),
            format!("{:.2}", edge.mean_latency_ms),
            dash(),
        );
    } else {
        row(&mut out, "Edge detection", 0, dash(), dash(), dash());
    }
    if rapid.count > 0 {
        row(
            &mut out,
            "Rapid movement",
            rapid.count,
            format!("{:.2}", rapid.accuracy_percent),
            format!("{:.2}", rapid.mean_elapsed_ms),
            dash(),
        );
    } else {
        row(&mut out, "Rapid movement", 0, dash(), dash(), dash());
    }
    out
}

fn ensure_parent(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_json(report: &GestureReport, path: &Path) -> Result<(), ReportError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Gesture report written");
    Ok(())
}

pub fn read_json(path: &Path) -> Result<GestureReport, ReportError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_text(contents: &str, path: &Path) -> Result<(), ReportError> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Text report written");
    Ok(())
}

/// Where the artifacts of one session went.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrittenReports {
    pub json: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub cursor_text: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::config::CursorTestConfig;
    use crate::gesture::cursor::ScreenPosition;
    use crate::gesture::types::ScreenSize;

    fn sample_metrics() -> GestureMetrics {
        let mut m = GestureMetrics::new();
        for v in [10, 20, 30] {
            m.record_detection(GestureKind::ClickLeft, Duration::from_millis(v));
            m.label_pending(true);
        }
        m.record_detection(GestureKind::ScrollUp, Duration::from_millis(5));
        m.label_pending(false);
        m.record_false_negative(GestureKind::ScrollUp);
        m.record_detection(GestureKind::ScrollDown, Duration::from_millis(8));
        m.label_pending(true);
        m.record_false_negative(GestureKind::ScrollDown);
        m
    }

    #[test]
    fn report_mirrors_metrics() {
        let m = sample_metrics();
        let report = GestureReport::from_metrics(&m, Duration::from_secs(90));
        assert_eq!(report.gestures.len(), GestureKind::TRACKED.len());
        assert_eq!(report.duration_seconds, 90.0);
        let click = &report.gestures[&GestureKind::ClickLeft];
        assert_eq!(click.accuracy_percent, 100.0);
        assert_eq!(click.response_time.mean_ms, 20.0);
        assert_eq!(report.overall_accuracy_percent, m.overall_accuracy());
        assert_eq!(report.recompute_overall_accuracy(), report.overall_accuracy_percent);
    }

    #[test]
    fn json_uses_snake_case_kind_keys() {
        let report = GestureReport::from_metrics(&sample_metrics(), Duration::ZERO);
        let value = serde_json::to_value(&report).unwrap();
        let click = &value["gestures"]["click_left"];
        assert_eq!(click["true_positive"], 3);
        assert_eq!(click["response_time"]["sample_count"], 3);
        assert!(value["overall_mean_response_time_ms"].is_number());
        assert!(value["test_timestamp"].is_string());
    }

    #[test]
    fn analysis_picks_best_and_weak_kinds() {
        let report = GestureReport::from_metrics(&sample_metrics(), Duration::ZERO);
        assert_eq!(report.best_accuracy(), Some((GestureKind::ClickLeft, 100.0)));
        assert_eq!(report.worst_accuracy(), Some((GestureKind::ScrollUp, 0.0)));
        assert_eq!(report.best_response_time(), Some((GestureKind::ScrollUp, 5.0)));
        assert_eq!(report.needs_improvement(), vec![(GestureKind::ScrollDown, 50.0)]);
        // 4 tp / (4 + 1 + 2)
        assert_eq!(report.band(), PerformanceBand::NeedsImprovement);
    }

    #[test]
    fn text_report_contains_table_and_analysis() {
        let report = GestureReport::from_metrics(&sample_metrics(), Duration::from_secs(60));
        let text = report.render_text();
        assert!(text.contains("Click Left"));
        assert!(text.contains("NEEDS IMPROVEMENT"));
        assert!(text.contains("Gestures that need improvement:"));
        assert!(text.contains("F1 score"));
        let table = report.render_table();
        let widths: Vec<usize> = table
            .lines()
            .filter(|l| GestureKind::TRACKED.iter().any(|k| l.starts_with(k.display_name())))
            .map(|l| l.len())
            .collect();
        assert_eq!(widths.len(), GestureKind::TRACKED.len());
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn performance_bands() {
        assert_eq!(PerformanceBand::from_accuracy(90.0), PerformanceBand::VeryGood);
        assert_eq!(PerformanceBand::from_accuracy(80.0), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_accuracy(70.0), PerformanceBand::Fair);
        assert_eq!(PerformanceBand::from_accuracy(69.99), PerformanceBand::NeedsImprovement);
    }

    #[test]
    fn cursor_text_lists_every_aspect() {
        let screen = ScreenSize {
            width: 1920,
            height: 1080,
        };
        let mut tracker = CursorTestTracker::new(&CursorTestConfig::default(), screen);
        tracker.add_precision(
            ScreenPosition { x: 320, y: 180 },
            ScreenPosition { x: 330, y: 180 },
            Duration::from_millis(12),
        );
        let text = render_cursor_text(&tracker, Utc::now());
        assert!(text.contains("1. PRECISION POINTING"));
        assert!(text.contains("Target hits        : 1/1"));
        assert!(text.contains("4. RAPID MOVEMENT"));
        assert!(text.contains("SUMMARY TABLE"));
    }

    #[test]
    fn write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = GestureReport::from_metrics(&sample_metrics(), Duration::from_millis(1500));
        write_json(&report, &path).unwrap();
        let back = read_json(&path).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.totals(), report.totals());
    }

    #[test]
    fn nanosecond_latencies_survive_the_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut m = GestureMetrics::new();
        let latencies = [
            25_560_086, 29_217_127, 7_000_001, 13_333_333, 1_999_999, 40_000_003, 31_415_926,
        ];
        for (i, nanos) in latencies.into_iter().enumerate() {
            let kind = GestureKind::TRACKED[i % GestureKind::TRACKED.len()];
            m.record_detection(kind, Duration::from_nanos(nanos));
            m.label_pending(i % 3 != 0);
        }
        for i in 0..=45 {
            m.record_frame_tick(Duration::from_millis(i * 33));
        }
        let report = GestureReport::from_metrics(&m, Duration::from_nanos(1_234_567_891));
        write_json(&report, &path).unwrap();
        let back = read_json(&path).unwrap();

        assert_eq!(back.overall_accuracy_percent, report.overall_accuracy_percent);
        assert_eq!(back.overall_mean_response_time_ms, report.overall_mean_response_time_ms);
        for (kind, summary) in &report.gestures {
            assert_eq!(back.gestures[kind].response_time, summary.response_time);
        }
        assert_eq!(back.fps, report.fps);
        assert_eq!(back, report);
    }

    #[test]
    fn text_report_shows_frame_rate() {
        let mut m = sample_metrics();
        for i in 0..=30 {
            m.record_frame_tick(Duration::from_millis(i * 1000 / 30));
        }
        let report = GestureReport::from_metrics(&m, Duration::from_secs(1));
        assert_eq!(report.fps.sample_count, 1);
        assert!(report.meets_fps_target());
        let text = report.render_text();
        assert!(text.contains("FRAME RATE"));
        assert!(text.contains("Average : 30.00 fps"));
        assert!(text.contains("(met)"));
    }
}
