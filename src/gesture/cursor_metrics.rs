//! Cursor quality measurements: precision pointing, smoothness, screen-edge
//! reach, rapid movements and speed categories.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::MILLIS_PER_SEC;
use crate::gesture::config::{require_non_negative, require_positive, CursorTestConfig};
use crate::gesture::cursor::ScreenPosition;
use crate::gesture::geometry::{mean, step_length_stddev};
use crate::gesture::metrics::duration_ms;
use crate::gesture::types::{Point, ScreenSize};

/// Inset of the edge-test targets from the screen border.
const EDGE_TARGET_INSET_PX: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    /// Higher is better; `bands` are the lower bounds of Excellent, Good and Fair.
    pub fn from_score(score: f64, bands: [f64; 3]) -> Self {
        if score >= bands[0] {
            Rating::Excellent
        } else if score >= bands[1] {
            Rating::Good
        } else if score >= bands[2] {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PRECISION_BANDS: [f64; 3] = [85.0, 75.0, 60.0];
pub const SMOOTHNESS_BANDS: [f64; 3] = [90.0, 75.0, 60.0];
pub const EDGE_BANDS: [f64; 3] = [80.0, 70.0, 55.0];
pub const RAPID_BANDS: [f64; 3] = [80.0, 70.0, 55.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedCategory {
    Slow,
    Normal,
    Fast,
}

impl SpeedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedCategory::Slow => "slow",
            SpeedCategory::Normal => "normal",
            SpeedCategory::Fast => "fast",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "slow" => Some(SpeedCategory::Slow),
            "normal" => Some(SpeedCategory::Normal),
            "fast" => Some(SpeedCategory::Fast),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorSample {
    pub position: Point,
    pub timestamp: Duration,
    /// Processing latency of the frame that produced this position.
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecisionTest {
    pub target: ScreenPosition,
    pub cursor: ScreenPosition,
    pub deviation_px: f64,
    pub latency_ms: f64,
    pub hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeTest {
    pub target: ScreenPosition,
    pub cursor: ScreenPosition,
    pub deviation_px: f64,
    pub latency_ms: f64,
    pub at_edge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RapidMovement {
    pub start: ScreenPosition,
    pub end: ScreenPosition,
    pub distance_px: f64,
    pub elapsed_ms: f64,
    pub speed_px_per_s: f64,
}

impl RapidMovement {
    pub fn passes(&self, thresholds: &RapidThresholds) -> bool {
        self.distance_px > thresholds.distance_px && self.elapsed_ms < thresholds.time_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedTest {
    pub category: SpeedCategory,
    pub distance_px: f64,
    pub elapsed_ms: f64,
    pub speed_px_per_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RapidThresholds {
    pub time_ms: f64,
    pub distance_px: f64,
}

impl RapidThresholds {
    /// Time must be finite and positive, distance finite and non-negative.
    pub fn new(time_ms: f64, distance_px: f64) -> Result<Self, String> {
        require_positive("rapid time threshold", time_ms)?;
        require_non_negative("rapid distance threshold", distance_px)?;
        Ok(Self {
            time_ms,
            distance_px,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PrecisionStats {
    pub count: usize,
    pub hits: usize,
    pub accuracy_percent: f64,
    pub mean_deviation_px: f64,
    pub min_deviation_px: f64,
    pub max_deviation_px: f64,
    pub mean_latency_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SmoothnessStats {
    pub sample_count: usize,
    pub jitter_px: f64,
    pub smoothness_score: f64,
    pub mean_latency_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeStats {
    pub count: usize,
    pub edge_hits: usize,
    pub accuracy_percent: f64,
    pub mean_deviation_px: f64,
    pub mean_latency_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RapidStats {
    pub count: usize,
    pub successful: usize,
    pub accuracy_percent: f64,
    pub mean_distance_px: f64,
    pub mean_elapsed_ms: f64,
    pub mean_speed_px_per_s: f64,
    pub thresholds: RapidThresholds,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpeedStats {
    pub count: usize,
    pub mean_speed_px_per_s: f64,
    pub mean_elapsed_ms: f64,
}

fn deviation(a: ScreenPosition, b: ScreenPosition) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
}

fn speed_px_per_s(distance_px: f64, elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 {
        distance_px / elapsed_ms * MILLIS_PER_SEC
    } else {
        0.0
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone)]
pub struct CursorTestTracker {
    screen: ScreenSize,
    smoothness_window: usize,
    smoothness_scale: f64,
    precision_hit_radius_px: f64,
    edge_margin_px: f64,
    rapid: RapidThresholds,
    samples: VecDeque<CursorSample>,
    precision: Vec<PrecisionTest>,
    edges: Vec<EdgeTest>,
    rapid_moves: Vec<RapidMovement>,
    speed: Vec<SpeedTest>,
}

impl CursorTestTracker {
    pub fn new(config: &CursorTestConfig, screen: ScreenSize) -> Self {
        Self {
            screen,
            smoothness_window: config.smoothness_window,
            smoothness_scale: config.smoothness_scale,
            precision_hit_radius_px: config.precision_hit_radius_px,
            edge_margin_px: config.edge_margin_px,
            rapid: RapidThresholds {
                time_ms: config.rapid_time_threshold_ms,
                distance_px: config.rapid_distance_threshold_px,
            },
            samples: VecDeque::with_capacity(config.smoothness_window),
            precision: Vec::new(),
            edges: Vec::new(),
            rapid_moves: Vec::new(),
            speed: Vec::new(),
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn precision_hit_radius(&self) -> f64 {
        self.precision_hit_radius_px
    }

    pub fn edge_margin(&self) -> f64 {
        self.edge_margin_px
    }

    pub fn rapid_thresholds(&self) -> RapidThresholds {
        self.rapid
    }

    /// Applies to rapid movements already recorded as well as future ones.
    pub fn set_rapid_thresholds(&mut self, thresholds: RapidThresholds) {
        tracing::info!(
            time_ms = thresholds.time_ms,
            distance_px = thresholds.distance_px,
            "Rapid movement thresholds updated"
        );
        self.rapid = thresholds;
    }

    pub fn add_smoothness_sample(&mut self, position: ScreenPosition, timestamp: Duration, latency: Duration) {
        if self.samples.len() == self.smoothness_window {
            self.samples.pop_front();
        }
        self.samples.push_back(CursorSample {
            position: Point::new(f64::from(position.x), f64::from(position.y)),
            timestamp,
            latency_ms: duration_ms(latency),
        });
    }

    pub fn samples(&self) -> impl Iterator<Item = &CursorSample> {
        self.samples.iter()
    }

    /// Population std dev of step lengths over the window; 0 below three samples.
    pub fn jitter(&self) -> f64 {
        if self.samples.len() < 3 {
            return 0.0;
        }
        step_length_stddev(self.samples.iter().map(|s| s.position))
    }

    pub fn smoothness_score(&self) -> f64 {
        (100.0 - self.jitter() * self.smoothness_scale).max(0.0)
    }

    pub fn add_precision(&mut self, target: ScreenPosition, cursor: ScreenPosition, latency: Duration) -> PrecisionTest {
        let deviation_px = deviation(target, cursor);
        let test = PrecisionTest {
            target,
            cursor,
            deviation_px,
            latency_ms: duration_ms(latency),
            hit: deviation_px < self.precision_hit_radius_px,
        };
        tracing::info!(deviation_px, hit = test.hit, "Precision point recorded");
        self.precision.push(test);
        test
    }

    pub fn is_at_edge(&self, cursor: ScreenPosition) -> bool {
        let m = self.edge_margin_px;
        let (x, y) = (f64::from(cursor.x), f64::from(cursor.y));
        x < m
            || x > f64::from(self.screen.width) - m
            || y < m
            || y > f64::from(self.screen.height) - m
    }

    pub fn add_edge(&mut self, target: ScreenPosition, cursor: ScreenPosition, latency: Duration) -> EdgeTest {
        let test = EdgeTest {
            target,
            cursor,
            deviation_px: deviation(target, cursor),
            latency_ms: duration_ms(latency),
            at_edge: self.is_at_edge(cursor),
        };
        tracing::info!(deviation_px = test.deviation_px, at_edge = test.at_edge, "Edge point recorded");
        self.edges.push(test);
        test
    }

    pub fn add_rapid(&mut self, start: ScreenPosition, end: ScreenPosition, elapsed: Duration) -> RapidMovement {
        let distance_px = deviation(start, end);
        let elapsed_ms = duration_ms(elapsed);
        let movement = RapidMovement {
            start,
            end,
            distance_px,
            elapsed_ms,
            speed_px_per_s: speed_px_per_s(distance_px, elapsed_ms),
        };
        tracing::info!(
            distance_px,
            elapsed_ms,
            passed = movement.passes(&self.rapid),
            "Rapid movement recorded"
        );
        self.rapid_moves.push(movement);
        movement
    }

    pub fn add_speed_test(&mut self, category: SpeedCategory, distance_px: f64, elapsed: Duration) -> SpeedTest {
        let elapsed_ms = duration_ms(elapsed);
        let test = SpeedTest {
            category,
            distance_px,
            elapsed_ms,
            speed_px_per_s: speed_px_per_s(distance_px, elapsed_ms),
        };
        tracing::info!(category = category.as_str(), elapsed_ms, "Speed test recorded");
        self.speed.push(test);
        test
    }

    pub fn precision_tests(&self) -> &[PrecisionTest] {
        &self.precision
    }

    pub fn precision_stats(&self) -> PrecisionStats {
        if self.precision.is_empty() {
            return PrecisionStats::default();
        }
        let hits = self.precision.iter().filter(|t| t.hit).count();
        let devs = || self.precision.iter().map(|t| t.deviation_px);
        PrecisionStats {
            count: self.precision.len(),
            hits,
            accuracy_percent: percent(hits, self.precision.len()),
            mean_deviation_px: mean(devs()),
            min_deviation_px: devs().fold(f64::INFINITY, f64::min),
            max_deviation_px: devs().fold(f64::NEG_INFINITY, f64::max),
            mean_latency_ms: mean(self.precision.iter().map(|t| t.latency_ms)),
        }
    }

    pub fn smoothness_stats(&self) -> SmoothnessStats {
        SmoothnessStats {
            sample_count: self.samples.len(),
            jitter_px: self.jitter(),
            smoothness_score: self.smoothness_score(),
            mean_latency_ms: mean(self.samples.iter().map(|s| s.latency_ms)),
        }
    }

    pub fn edge_stats(&self) -> EdgeStats {
        if self.edges.is_empty() {
            return EdgeStats::default();
        }
        let edge_hits = self.edges.iter().filter(|t| t.at_edge).count();
        EdgeStats {
            count: self.edges.len(),
            edge_hits,
            accuracy_percent: percent(edge_hits, self.edges.len()),
            mean_deviation_px: mean(self.edges.iter().map(|t| t.deviation_px)),
            mean_latency_ms: mean(self.edges.iter().map(|t| t.latency_ms)),
        }
    }

    pub fn rapid_stats(&self) -> RapidStats {
        let successful = self
            .rapid_moves
            .iter()
            .filter(|m| m.passes(&self.rapid))
            .count();
        RapidStats {
            count: self.rapid_moves.len(),
            successful,
            accuracy_percent: percent(successful, self.rapid_moves.len()),
            mean_distance_px: mean(self.rapid_moves.iter().map(|m| m.distance_px)),
            mean_elapsed_ms: mean(self.rapid_moves.iter().map(|m| m.elapsed_ms)),
            mean_speed_px_per_s: mean(self.rapid_moves.iter().map(|m| m.speed_px_per_s)),
            thresholds: self.rapid,
        }
    }

    pub fn speed_stats(&self) -> BTreeMap<SpeedCategory, SpeedStats> {
        let mut grouped: BTreeMap<SpeedCategory, Vec<&SpeedTest>> = BTreeMap::new();
        for test in &self.speed {
            grouped.entry(test.category).or_default().push(test);
        }
        grouped
            .into_iter()
            .map(|(category, tests)| {
                let stats = SpeedStats {
                    count: tests.len(),
                    mean_speed_px_per_s: mean(tests.iter().map(|t| t.speed_px_per_s)),
                    mean_elapsed_ms: mean(tests.iter().map(|t| t.elapsed_ms)),
                };
                (category, stats)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
            && self.precision.is_empty()
            && self.edges.is_empty()
            && self.rapid_moves.is_empty()
            && self.speed.is_empty()
    }
}

/// 3×3 grid of precision targets inset by a sixth of each dimension.
pub fn precision_grid(screen: ScreenSize) -> Vec<ScreenPosition> {
    let (w, h) = (screen.width as i32, screen.height as i32);
    let (margin_x, margin_y) = (w / 6, h / 6);
    let step_x = (w - 2 * margin_x) / 2;
    let step_y = (h - 2 * margin_y) / 2;
    let mut targets = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            targets.push(ScreenPosition {
                x: margin_x + col * step_x,
                y: margin_y + row * step_y,
            });
        }
    }
    targets
}

/// Corners, edge midpoints and the centre.
pub fn edge_targets(screen: ScreenSize) -> Vec<ScreenPosition> {
    let (w, h) = (screen.width as i32, screen.height as i32);
    let m = EDGE_TARGET_INSET_PX;
    [
        (m, m),
        (w / 2, m),
        (w - m, m),
        (m, h / 2),
        (w - m, h / 2),
        (m, h - m),
        (w / 2, h - m),
        (w - m, h - m),
        (w / 2, h / 2),
    ]
    .into_iter()
    .map(|(x, y)| ScreenPosition { x, y })
    .collect()
}

pub fn rapid_targets(screen: ScreenSize) -> Vec<ScreenPosition> {
    let (w, h) = (screen.width as i32, screen.height as i32);
    [
        (w / 4, h / 4),
        (3 * w / 4, h / 4),
        (w / 4, 3 * h / 4),
        (3 * w / 4, 3 * h / 4),
        (w / 2, h / 4),
        (w / 2, 3 * h / 4),
        (w / 4, h / 2),
        (3 * w / 4, h / 2),
        (w / 2, h / 2),
    ]
    .into_iter()
    .map(|(x, y)| ScreenPosition { x, y })
    .collect()
}

/// Cycles through a fixed list of targets.
#[derive(Debug, Clone)]
pub struct TargetSequence {
    targets: Vec<ScreenPosition>,
    index: usize,
}

impl TargetSequence {
    pub fn new(targets: Vec<ScreenPosition>) -> Self {
        Self { targets, index: 0 }
    }

    pub fn current(&self) -> Option<ScreenPosition> {
        self.targets.get(self.index).copied()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Moves to the next target. Returns true when the sequence wrapped around.
    pub fn advance(&mut self) -> bool {
        if self.targets.is_empty() {
            return false;
        }
        self.index += 1;
        if self.index >= self.targets.len() {
            self.index = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    fn pos(x: i32, y: i32) -> ScreenPosition {
        ScreenPosition { x, y }
    }

    fn tracker() -> CursorTestTracker {
        CursorTestTracker::new(&CursorTestConfig::default(), SCREEN)
    }

    #[test]
    fn jitter_needs_three_samples() {
        let mut t = tracker();
        assert_eq!(t.jitter(), 0.0);
        t.add_smoothness_sample(pos(0, 0), Duration::ZERO, Duration::ZERO);
        t.add_smoothness_sample(pos(100, 0), Duration::from_millis(10), Duration::ZERO);
        assert_eq!(t.jitter(), 0.0);
        assert_eq!(t.smoothness_score(), 100.0);

        // steps 100, 50 -> mean 75, std dev 25
        t.add_smoothness_sample(pos(150, 0), Duration::from_millis(20), Duration::ZERO);
        assert!((t.jitter() - 25.0).abs() < 1e-9);
        assert!((t.smoothness_score() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn smoothness_reports_mean_frame_latency() {
        let mut t = tracker();
        for (i, lat) in [10, 20, 45].into_iter().enumerate() {
            t.add_smoothness_sample(
                pos(i as i32 * 10, 0),
                Duration::from_millis(i as u64 * 33),
                Duration::from_millis(lat),
            );
        }
        let stats = t.smoothness_stats();
        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.mean_latency_ms, 25.0);
        assert_eq!(tracker().smoothness_stats().mean_latency_ms, 0.0);
    }

    #[test]
    fn smoothness_window_evicts_oldest() {
        let config = CursorTestConfig {
            smoothness_window: 3,
            ..CursorTestConfig::default()
        };
        let mut t = CursorTestTracker::new(&config, SCREEN);
        for (i, x) in [0, 500, 510, 520].into_iter().enumerate() {
            t.add_smoothness_sample(pos(x, 0), Duration::from_millis(i as u64), Duration::ZERO);
        }
        assert_eq!(t.samples().count(), 3);
        assert_eq!(t.jitter(), 0.0);
    }

    #[test]
    fn smoothness_score_is_clamped() {
        let mut t = tracker();
        for (i, x) in [0, 1, 400, 401].into_iter().enumerate() {
            t.add_smoothness_sample(pos(x, 0), Duration::from_millis(i as u64), Duration::ZERO);
        }
        assert_eq!(t.smoothness_score(), 0.0);
    }

    #[test]
    fn precision_hit_is_strict() {
        let mut t = tracker();
        assert!(t.add_precision(pos(100, 100), pos(110, 100), Duration::ZERO).hit);
        assert!(!t.add_precision(pos(100, 100), pos(130, 100), Duration::ZERO).hit);
        let stats = t.precision_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.accuracy_percent, 50.0);
        assert_eq!(stats.min_deviation_px, 10.0);
        assert_eq!(stats.max_deviation_px, 30.0);
        assert_eq!(Rating::from_score(stats.accuracy_percent, PRECISION_BANDS), Rating::Poor);
    }

    #[test]
    fn edge_detection_uses_margin() {
        let mut t = tracker();
        assert!(t.add_edge(pos(30, 30), pos(10, 500), Duration::ZERO).at_edge);
        assert!(t.add_edge(pos(1890, 30), pos(1900, 500), Duration::ZERO).at_edge);
        assert!(!t.add_edge(pos(960, 540), pos(960, 540), Duration::ZERO).at_edge);
        assert_eq!(t.edge_stats().edge_hits, 2);
    }

    #[test]
    fn rapid_thresholds_are_strict_and_adjustable() {
        let mut t = tracker();
        t.add_rapid(pos(0, 0), pos(300, 0), Duration::from_millis(500));
        t.add_rapid(pos(0, 0), pos(200, 0), Duration::from_millis(500));
        t.add_rapid(pos(0, 0), pos(300, 0), Duration::from_millis(1_000));
        let stats = t.rapid_stats();
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.count, 3);
        assert_eq!(t.rapid_moves[0].speed_px_per_s, 600.0);

        t.set_rapid_thresholds(RapidThresholds::new(1_500.0, 100.0).unwrap());
        assert_eq!(t.rapid_stats().successful, 3);
    }

    #[test]
    fn rapid_thresholds_must_be_finite() {
        assert!(RapidThresholds::new(f64::INFINITY, 0.0).is_err());
        assert!(RapidThresholds::new(800.0, f64::NAN).is_err());
        assert!(RapidThresholds::new(0.0, 200.0).is_err());
        assert!(RapidThresholds::new(800.0, -1.0).is_err());
        assert_eq!(
            RapidThresholds::new(800.0, 0.0),
            Ok(RapidThresholds {
                time_ms: 800.0,
                distance_px: 0.0,
            })
        );
    }

    #[test]
    fn speed_stats_group_by_category() {
        let mut t = tracker();
        t.add_speed_test(SpeedCategory::Slow, 100.0, Duration::from_secs(2));
        t.add_speed_test(SpeedCategory::Slow, 300.0, Duration::from_secs(2));
        t.add_speed_test(SpeedCategory::Fast, 400.0, Duration::from_millis(500));
        let stats = t.speed_stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&SpeedCategory::Slow].count, 2);
        assert_eq!(stats[&SpeedCategory::Slow].mean_speed_px_per_s, 100.0);
        assert_eq!(stats[&SpeedCategory::Fast].mean_speed_px_per_s, 800.0);
        assert!(!stats.contains_key(&SpeedCategory::Normal));
    }

    #[test]
    fn grid_layouts() {
        let grid = precision_grid(SCREEN);
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], pos(320, 180));
        assert_eq!(grid[4], pos(960, 540));
        assert_eq!(grid[8], pos(1600, 900));
        assert_eq!(edge_targets(SCREEN)[2], pos(1890, 30));
        assert_eq!(rapid_targets(SCREEN)[8], pos(960, 540));
    }

    #[test]
    fn target_sequence_wraps() {
        let mut seq = TargetSequence::new(vec![pos(1, 1), pos(2, 2)]);
        assert_eq!(seq.current(), Some(pos(1, 1)));
        assert!(!seq.advance());
        assert!(seq.advance());
        assert_eq!(seq.index(), 0);
        assert!(!TargetSequence::new(Vec::new()).advance());
    }

    #[test]
    fn rating_bands() {
        assert_eq!(Rating::from_score(90.0, SMOOTHNESS_BANDS), Rating::Excellent);
        assert_eq!(Rating::from_score(89.9, SMOOTHNESS_BANDS), Rating::Good);
        assert_eq!(Rating::from_score(55.0, EDGE_BANDS), Rating::Fair);
        assert_eq!(Rating::from_score(54.9, RAPID_BANDS), Rating::Poor);
    }
}
