//! Detection counters, human labels and response-time statistics per gesture kind.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::NANOS_PER_MILLI;
use crate::gesture::geometry::mean;
use crate::gesture::types::GestureKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub detected: u64,
    pub true_positive: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    /// Emission latencies in milliseconds, in detection order.
    pub response_times_ms: Vec<f64>,
}

impl MetricRecord {
    pub fn labeled_total(&self) -> u64 {
        self.true_positive + self.false_positive + self.false_negative
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeStats {
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub sample_count: usize,
}

impl ResponseTimeStats {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let min_ms = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean_ms: mean(samples.iter().copied()),
            min_ms,
            max_ms,
            sample_count: samples.len(),
        }
    }
}

/// Frame-rate summary over the once-per-second samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FpsStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub sample_count: usize,
}

impl FpsStats {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        Self {
            average: mean(samples.iter().copied()),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            sample_count: samples.len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FpsWindow {
    started: Duration,
    frames: u32,
}

/// Handle to the detection awaiting a human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingLabel {
    seq: u64,
    kind: GestureKind,
}

impl PendingLabel {
    pub fn kind(&self) -> GestureKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    TruePositive,
    FalsePositive,
}

/// Pooled counters across every tracked kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelTotals {
    pub detected: u64,
    pub true_positive: u64,
    pub false_positive: u64,
    pub false_negative: u64,
}

impl LabelTotals {
    pub fn precision(&self) -> f64 {
        ratio_percent(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio_percent(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio_percent(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64 * 100.0
    }
}

const FPS_SAMPLE_PERIOD: Duration = Duration::from_secs(1);

pub fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / NANOS_PER_MILLI
}

/// Per-session accuracy and latency instrumentation.
#[derive(Debug, Clone)]
pub struct GestureMetrics {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    records: BTreeMap<GestureKind, MetricRecord>,
    frame_processing_ms: Vec<f64>,
    fps_window: Option<FpsWindow>,
    fps_samples: Vec<f64>,
    pending: Option<PendingLabel>,
    next_seq: u64,
}

impl Default for GestureMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMetrics {
    pub fn new() -> Self {
        let records = GestureKind::TRACKED
            .iter()
            .map(|&kind| (kind, MetricRecord::default()))
            .collect();
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            records,
            frame_processing_ms: Vec::new(),
            fps_window: None,
            fps_samples: Vec::new(),
            pending: None,
            next_seq: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Records a detection and makes it the one awaiting a label. Untracked
    /// kinds (the exit request) are ignored.
    pub fn record_detection(&mut self, kind: GestureKind, latency: Duration) -> Option<PendingLabel> {
        let Some(record) = self.records.get_mut(&kind) else {
            tracing::debug!(kind = kind.as_str(), "Detection of untracked kind ignored");
            return None;
        };
        let latency_ms = duration_ms(latency);
        record.detected += 1;
        record.response_times_ms.push(latency_ms);

        self.next_seq += 1;
        let token = PendingLabel {
            seq: self.next_seq,
            kind,
        };
        self.pending = Some(token);
        tracing::info!(kind = kind.as_str(), latency_ms, "Gesture detected");
        Some(token)
    }

    pub fn pending(&self) -> Option<PendingLabel> {
        self.pending
    }

    pub fn label_true_positive(&mut self, token: PendingLabel) -> bool {
        self.apply_label(token, Label::TruePositive)
    }

    pub fn label_false_positive(&mut self, token: PendingLabel) -> bool {
        self.apply_label(token, Label::FalsePositive)
    }

    /// Labels whatever detection is currently pending. Used by the keyboard surface.
    pub fn label_pending(&mut self, true_positive: bool) -> bool {
        match self.pending {
            Some(token) if true_positive => self.label_true_positive(token),
            Some(token) => self.label_false_positive(token),
            None => {
                tracing::debug!("Label ignored, no detection pending");
                false
            }
        }
    }

    fn apply_label(&mut self, token: PendingLabel, label: Label) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(kind = token.kind.as_str(), seq = token.seq, "Stale label ignored");
            return false;
        }
        let Some(record) = self.records.get_mut(&token.kind) else {
            return false;
        };
        match label {
            Label::TruePositive => record.true_positive += 1,
            Label::FalsePositive => record.false_positive += 1,
        }
        self.pending = None;
        tracing::info!(kind = token.kind.as_str(), label = ?label, "Detection labeled");
        true
    }

    pub fn record_false_negative(&mut self, kind: GestureKind) -> bool {
        match self.records.get_mut(&kind) {
            Some(record) => {
                record.false_negative += 1;
                tracing::info!(kind = kind.as_str(), "False negative recorded");
                true
            }
            None => false,
        }
    }

    pub fn record_frame_processing(&mut self, elapsed: Duration) {
        self.frame_processing_ms.push(duration_ms(elapsed));
    }

    /// Counts a frame acquired at `now`. Once at least a second has passed
    /// since the window opened, the window's rate becomes one FPS sample. The
    /// first frame only opens the window.
    pub fn record_frame_tick(&mut self, now: Duration) {
        let Some(window) = self.fps_window.as_mut() else {
            self.fps_window = Some(FpsWindow {
                started: now,
                frames: 0,
            });
            return;
        };
        window.frames += 1;
        let elapsed = now.saturating_sub(window.started);
        if elapsed >= FPS_SAMPLE_PERIOD {
            let fps = f64::from(window.frames) / elapsed.as_secs_f64();
            self.fps_samples.push(fps);
            tracing::debug!(fps, "Frame rate sampled");
            *window = FpsWindow {
                started: now,
                frames: 0,
            };
        }
    }

    pub fn fps_samples(&self) -> &[f64] {
        &self.fps_samples
    }

    pub fn fps_stats(&self) -> FpsStats {
        FpsStats::from_samples(&self.fps_samples)
    }

    pub fn record(&self, kind: GestureKind) -> Option<&MetricRecord> {
        self.records.get(&kind)
    }

    pub fn records(&self) -> impl Iterator<Item = (GestureKind, &MetricRecord)> {
        self.records.iter().map(|(k, r)| (*k, r))
    }

    /// `tp / (tp + fp + fn)` as a percentage, 0 when nothing is labeled.
    pub fn accuracy(&self, kind: GestureKind) -> f64 {
        self.records
            .get(&kind)
            .map_or(0.0, |r| ratio_percent(r.true_positive, r.labeled_total()))
    }

    pub fn totals(&self) -> LabelTotals {
        self.records.values().fold(LabelTotals::default(), |mut acc, r| {
            acc.detected += r.detected;
            acc.true_positive += r.true_positive;
            acc.false_positive += r.false_positive;
            acc.false_negative += r.false_negative;
            acc
        })
    }

    pub fn overall_accuracy(&self) -> f64 {
        let t = self.totals();
        ratio_percent(
            t.true_positive,
            t.true_positive + t.false_positive + t.false_negative,
        )
    }

    pub fn response_time_stats(&self, kind: GestureKind) -> ResponseTimeStats {
        self.records
            .get(&kind)
            .map_or_else(ResponseTimeStats::default, |r| {
                ResponseTimeStats::from_samples(&r.response_times_ms)
            })
    }

    /// Mean over every recorded latency regardless of kind.
    pub fn overall_mean_response_time(&self) -> f64 {
        mean(
            self.records
                .values()
                .flat_map(|r| r.response_times_ms.iter().copied()),
        )
    }

    pub fn mean_frame_processing_time(&self) -> f64 {
        mean(self.frame_processing_ms.iter().copied())
    }

    pub fn frame_count(&self) -> usize {
        self.frame_processing_ms.len()
    }
}
