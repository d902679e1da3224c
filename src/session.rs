//! The single-threaded control loop: acquire a frame, detect hands, run the
//! gesture engine, drive the pointing device, record metrics, then poll
//! operator commands. Teardown persists the reports.

use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::Config;
use crate::constants::{CURSOR_REPORT_TEXT, GESTURE_REPORT_JSON, GESTURE_REPORT_TEXT};
use crate::gesture::config::GestureConfig;
use crate::gesture::cursor::ScreenPosition;
use crate::gesture::cursor_metrics::{
    edge_targets, precision_grid, CursorTestTracker, RapidThresholds, SpeedCategory, TargetSequence,
};
use crate::gesture::engine::{GestureEngine, SessionContext};
use crate::gesture::metrics::GestureMetrics;
use crate::gesture::report::{self, GestureReport, ReportError, WrittenReports};
use crate::gesture::types::{FrameSize, GestureEvent, GestureKind, HandPose, MouseButton, ScreenSize};

pub trait FrameSource {
    type Frame;

    /// `None` ends the session (camera closed or read failure).
    fn next_frame(&mut self) -> Option<Self::Frame>;

    fn frame_size(&self, frame: &Self::Frame) -> FrameSize;
}

pub trait HandDetector<F> {
    fn detect(&mut self, frame: &F) -> Vec<HandPose>;
}

pub trait PointingDevice {
    fn set_position(&mut self, position: ScreenPosition);
    fn click(&mut self, button: MouseButton);
    fn scroll(&mut self, dx: i32, dy: i32);
}

impl<T: PointingDevice + ?Sized> PointingDevice for &mut T {
    fn set_position(&mut self, position: ScreenPosition) {
        (**self).set_position(position);
    }

    fn click(&mut self, button: MouseButton) {
        (**self).click(button);
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        (**self).scroll(dx, dy);
    }
}

/// Monotonic time since session start.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub trait CommandSource {
    /// Next queued operator command, if any. Never blocks.
    fn poll(&mut self) -> Option<Command>;
}

#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Externally driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAspect {
    #[default]
    Precision,
    Smoothness,
    Edge,
    Rapid,
}

impl CursorAspect {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "precision" => Some(CursorAspect::Precision),
            "smoothness" => Some(CursorAspect::Smoothness),
            "edge" => Some(CursorAspect::Edge),
            "rapid" => Some(CursorAspect::Rapid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ConfirmTruePositive,
    ConfirmFalsePositive,
    DeclareFalseNegative(GestureKind),
    ShowStats,
    ResetSession,
    ToggleScroll,
    ToggleAllGestures,
    ToggleCursorTestMode,
    RecordPrecisionPoint,
    QuitAndSave,
    SelectCursorAspect(CursorAspect),
    /// First mark starts a timed run in the category, the next one finishes it.
    SpeedMark(SpeedCategory),
    SetRapidThresholds { time_ms: f64, distance_px: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct CommandParseError(pub String);

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        let cmd = match key.to_ascii_lowercase() {
            'y' => Command::ConfirmTruePositive,
            'n' => Command::ConfirmFalsePositive,
            's' => Command::ShowStats,
            'r' => Command::ResetSession,
            't' => Command::ToggleScroll,
            'w' => Command::ToggleAllGestures,
            'c' => Command::ToggleCursorTestMode,
            'p' => Command::RecordPrecisionPoint,
            'q' => Command::QuitAndSave,
            d @ '1'..='6' => {
                let idx = d as usize - '1' as usize;
                Command::DeclareFalseNegative(GestureKind::TRACKED[idx])
            }
            _ => return None,
        };
        Some(cmd)
    }

    /// Accepts a single key or a named command such as `false_negative:click_left`.
    pub fn parse(raw: &str) -> Result<Self, CommandParseError> {
        let raw = raw.trim();
        let err = || CommandParseError(raw.to_string());

        let mut chars = raw.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_key(c).ok_or_else(err);
        }

        let (name, arg) = match raw.split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (raw, None),
        };
        let cmd = match (name, arg) {
            ("confirm", None) => Command::ConfirmTruePositive,
            ("reject", None) => Command::ConfirmFalsePositive,
            ("false_negative", Some(kind)) => GestureKind::parse(kind)
                .filter(|k| GestureKind::TRACKED.contains(k))
                .map(Command::DeclareFalseNegative)
                .ok_or_else(err)?,
            ("stats", None) => Command::ShowStats,
            ("reset", None) => Command::ResetSession,
            ("toggle_scroll", None) => Command::ToggleScroll,
            ("toggle_all", None) => Command::ToggleAllGestures,
            ("cursor_test", None) => Command::ToggleCursorTestMode,
            ("record_point", None) => Command::RecordPrecisionPoint,
            ("quit", None) => Command::QuitAndSave,
            ("aspect", Some(aspect)) => CursorAspect::parse(aspect)
                .map(Command::SelectCursorAspect)
                .ok_or_else(err)?,
            ("speed", Some(cat)) => SpeedCategory::parse(cat)
                .map(Command::SpeedMark)
                .ok_or_else(err)?,
            ("rapid_thresholds", Some(values)) => {
                let (t, d) = values.split_once(',').ok_or_else(err)?;
                let time_ms: f64 = t.trim().parse().map_err(|_| err())?;
                let distance_px: f64 = d.trim().parse().map_err(|_| err())?;
                let checked = RapidThresholds::new(time_ms, distance_px).map_err(|_| err())?;
                Command::SetRapidThresholds {
                    time_ms: checked.time_ms,
                    distance_px: checked.distance_px,
                }
            }
            _ => return Err(err()),
        };
        Ok(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    SourceExhausted,
    ExitGesture,
    Quit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::SourceExhausted => "frame source exhausted",
            EndReason::ExitGesture => "exit gesture",
            EndReason::Quit => "quit command",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub screen: ScreenSize,
    pub report_dir: PathBuf,
    pub write_text_reports: bool,
    pub start_in_cursor_test_mode: bool,
    pub rapid_time_threshold_ms: Option<f64>,
    pub rapid_distance_threshold_px: Option<f64>,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            screen: config.screen,
            report_dir: PathBuf::from(&config.report_dir),
            write_text_reports: config.session.write_text_reports,
            start_in_cursor_test_mode: config.session.start_in_cursor_test_mode,
            rapid_time_threshold_ms: config.session.rapid_time_threshold_ms,
            rapid_distance_threshold_px: config.session.rapid_distance_threshold_px,
        }
    }
}

/// Everything the caller needs after the loop has ended.
#[derive(Debug)]
pub struct SessionSummary {
    pub end_reason: EndReason,
    pub frames: usize,
    pub events: Vec<GestureEvent>,
    pub report: GestureReport,
    pub metrics: GestureMetrics,
    pub cursor: CursorTestTracker,
    pub written: WrittenReports,
    pub persistence_error: Option<ReportError>,
}

#[derive(Debug, Clone)]
struct CursorTestState {
    enabled: bool,
    aspect: CursorAspect,
    precision_targets: TargetSequence,
    edge_targets: TargetSequence,
    target_shown_at: Duration,
    rapid_start: Option<(ScreenPosition, Duration)>,
    speed_start: Option<(SpeedCategory, ScreenPosition, Duration)>,
}

impl CursorTestState {
    fn new(screen: ScreenSize, enabled: bool) -> Self {
        Self {
            enabled,
            aspect: CursorAspect::default(),
            precision_targets: TargetSequence::new(precision_grid(screen)),
            edge_targets: TargetSequence::new(edge_targets(screen)),
            target_shown_at: Duration::ZERO,
            rapid_start: None,
            speed_start: None,
        }
    }
}

pub struct Session<S, D, P, C, K>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
    P: PointingDevice,
    C: Clock,
    K: CommandSource,
{
    source: S,
    detector: D,
    pointer: P,
    clock: C,
    commands: K,
    config: GestureConfig,
    options: SessionOptions,
    engine: GestureEngine,
    ctx: SessionContext,
    metrics: GestureMetrics,
    cursor: CursorTestTracker,
    cursor_test: CursorTestState,
    last_cursor: Option<ScreenPosition>,
    /// Clock reading when the current metrics window opened (session start or last reset).
    metrics_started_at: Duration,
    events: Vec<GestureEvent>,
    frames: usize,
    quit: bool,
}

impl<S, D, P, C, K> Session<S, D, P, C, K>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
    P: PointingDevice,
    C: Clock,
    K: CommandSource,
{
    pub fn new(
        source: S,
        detector: D,
        pointer: P,
        clock: C,
        commands: K,
        config: GestureConfig,
        options: SessionOptions,
    ) -> Self {
        let engine = GestureEngine::new(&config);
        let ctx = SessionContext::new(&config);
        let cursor = Self::fresh_cursor_tracker(&config, &options);
        let cursor_test = CursorTestState::new(options.screen, options.start_in_cursor_test_mode);
        Self {
            source,
            detector,
            pointer,
            clock,
            commands,
            config,
            options,
            engine,
            ctx,
            metrics: GestureMetrics::new(),
            cursor,
            cursor_test,
            last_cursor: None,
            metrics_started_at: Duration::ZERO,
            events: Vec::new(),
            frames: 0,
            quit: false,
        }
    }

    fn fresh_cursor_tracker(config: &GestureConfig, options: &SessionOptions) -> CursorTestTracker {
        let mut tracker = CursorTestTracker::new(&config.cursor_test, options.screen);
        if options.rapid_time_threshold_ms.is_some() || options.rapid_distance_threshold_px.is_some() {
            let current = tracker.rapid_thresholds();
            match RapidThresholds::new(
                options.rapid_time_threshold_ms.unwrap_or(current.time_ms),
                options.rapid_distance_threshold_px.unwrap_or(current.distance_px),
            ) {
                Ok(thresholds) => tracker.set_rapid_thresholds(thresholds),
                Err(e) => tracing::warn!(error = %e, "Ignoring rapid movement thresholds from options"),
            }
        }
        tracker
    }

    pub fn metrics(&self) -> &GestureMetrics {
        &self.metrics
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn run(mut self) -> SessionSummary {
        let span = tracing::info_span!("session", session_id = %self.metrics.session_id());
        let _guard = span.enter();
        tracing::info!(
            screen_width = self.options.screen.width,
            screen_height = self.options.screen.height,
            cursor_test = self.cursor_test.enabled,
            "Session started"
        );

        let end_reason = loop {
            if let Some(reason) = self.step() {
                break reason;
            }
        };
        tracing::info!(%end_reason, frames = self.frames, "Session ended");

        self.teardown(end_reason)
    }

    /// One iteration of the loop. Returns why the session should end, if it should.
    fn step(&mut self) -> Option<EndReason> {
        let Some(frame) = self.source.next_frame() else {
            return Some(EndReason::SourceExhausted);
        };
        let frame_start = self.clock.now();
        self.metrics.record_frame_tick(frame_start);
        let frame_size = self.source.frame_size(&frame);
        let hands = self.detector.detect(&frame);
        let now = self.clock.now();
        self.frames += 1;

        let outcome = self.engine.process_frame(
            &mut self.ctx,
            &hands,
            frame_size,
            self.options.screen,
            now,
        );

        if let Some(position) = outcome.cursor {
            self.pointer.set_position(position);
            self.last_cursor = Some(position);
        }
        if let Some(dy) = outcome.scroll_delta {
            self.pointer.scroll(0, dy);
        }
        for &button in &outcome.clicks {
            self.pointer.click(button);
        }

        let latency = self.clock.now().saturating_sub(frame_start);
        if let Some(position) = outcome.cursor.filter(|_| self.cursor_test.enabled) {
            self.cursor.add_smoothness_sample(position, now, latency);
        }
        for mut event in outcome.events.iter().copied() {
            event.processing_latency = latency;
            if event.kind != GestureKind::ExitRequest {
                self.metrics.record_detection(event.kind, latency);
            }
            self.events.push(event);
        }

        self.metrics
            .record_frame_processing(self.clock.now().saturating_sub(frame_start));

        if outcome.exit_confirmed() {
            return Some(EndReason::ExitGesture);
        }

        while let Some(command) = self.commands.poll() {
            self.apply_command(command);
        }
        if self.quit {
            return Some(EndReason::Quit);
        }
        None
    }

    fn apply_command(&mut self, command: Command) {
        let now = self.clock.now();
        tracing::debug!(?command, "Command received");
        match command {
            Command::ConfirmTruePositive => {
                self.metrics.label_pending(true);
            }
            Command::ConfirmFalsePositive => {
                self.metrics.label_pending(false);
            }
            Command::DeclareFalseNegative(kind) => {
                self.metrics.record_false_negative(kind);
            }
            Command::ShowStats => {
                let report = GestureReport::from_metrics(&self.metrics, self.metrics_elapsed(now));
                tracing::info!("Current statistics\n{}", report.render_table());
            }
            Command::ResetSession => {
                let thresholds = self.cursor.rapid_thresholds();
                self.metrics = GestureMetrics::new();
                self.metrics_started_at = now;
                self.cursor = CursorTestTracker::new(&self.config.cursor_test, self.options.screen);
                self.cursor.set_rapid_thresholds(thresholds);
                let enabled = self.cursor_test.enabled;
                self.cursor_test = CursorTestState::new(self.options.screen, enabled);
                self.cursor_test.target_shown_at = now;
                tracing::info!(session_id = %self.metrics.session_id(), "Session statistics reset");
            }
            Command::ToggleScroll => {
                let enabled = self.ctx.toggles.toggle_scroll();
                tracing::info!(scroll_enabled = enabled, "Scroll toggled from keyboard");
            }
            Command::ToggleAllGestures => {
                let enabled = self.ctx.toggles.toggle_all_gestures();
                tracing::info!(all_gestures_enabled = enabled, "Gestures toggled from keyboard");
            }
            Command::ToggleCursorTestMode => {
                self.cursor_test.enabled = !self.cursor_test.enabled;
                self.cursor_test.target_shown_at = now;
                tracing::info!(enabled = self.cursor_test.enabled, "Cursor test mode toggled");
            }
            Command::RecordPrecisionPoint => self.record_point(now),
            Command::QuitAndSave => {
                self.quit = true;
            }
            Command::SelectCursorAspect(aspect) => {
                self.cursor_test.aspect = aspect;
                self.cursor_test.target_shown_at = now;
                self.cursor_test.rapid_start = None;
                tracing::info!(?aspect, "Cursor test aspect selected");
            }
            Command::SpeedMark(category) => self.mark_speed(category, now),
            Command::SetRapidThresholds {
                time_ms,
                distance_px,
            } => {
                match RapidThresholds::new(time_ms, distance_px) {
                    Ok(thresholds) => self.cursor.set_rapid_thresholds(thresholds),
                    Err(e) => tracing::warn!(error = %e, "Rejected rapid movement thresholds"),
                }
            }
        }
    }

    fn record_point(&mut self, now: Duration) {
        if !self.cursor_test.enabled {
            tracing::debug!("Point ignored, cursor test mode is off");
            return;
        }
        let Some(cursor) = self.last_cursor else {
            tracing::debug!("Point ignored, no cursor position yet");
            return;
        };
        let state = &mut self.cursor_test;
        let since_target = now.saturating_sub(state.target_shown_at);
        match state.aspect {
            CursorAspect::Precision => {
                let Some(target) = state.precision_targets.current() else {
                    return;
                };
                self.cursor.add_precision(target, cursor, since_target);
                state.target_shown_at = now;
                if state.precision_targets.advance() {
                    let stats = self.cursor.precision_stats();
                    tracing::info!(
                        accuracy_percent = stats.accuracy_percent,
                        mean_deviation_px = stats.mean_deviation_px,
                        "Precision grid completed"
                    );
                }
            }
            CursorAspect::Edge => {
                let Some(target) = state.edge_targets.current() else {
                    return;
                };
                self.cursor.add_edge(target, cursor, since_target);
                state.target_shown_at = now;
                if state.edge_targets.advance() {
                    let stats = self.cursor.edge_stats();
                    tracing::info!(
                        accuracy_percent = stats.accuracy_percent,
                        "Edge targets completed"
                    );
                }
            }
            CursorAspect::Rapid => match state.rapid_start.take() {
                Some((start, started_at)) => {
                    self.cursor
                        .add_rapid(start, cursor, now.saturating_sub(started_at));
                }
                None => state.rapid_start = Some((cursor, now)),
            },
            CursorAspect::Smoothness => {
                tracing::debug!("Smoothness is sampled every frame, point ignored");
            }
        }
    }

    fn mark_speed(&mut self, category: SpeedCategory, now: Duration) {
        if !self.cursor_test.enabled {
            return;
        }
        let Some(cursor) = self.last_cursor else {
            return;
        };
        match self.cursor_test.speed_start.take() {
            Some((started_category, start, started_at)) => {
                let distance = f64::from(cursor.x - start.x).hypot(f64::from(cursor.y - start.y));
                self.cursor.add_speed_test(
                    started_category,
                    distance,
                    now.saturating_sub(started_at),
                );
            }
            None => self.cursor_test.speed_start = Some((category, cursor, now)),
        }
    }

    fn metrics_elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.metrics_started_at)
    }

    fn teardown(self, end_reason: EndReason) -> SessionSummary {
        let elapsed = self.metrics_elapsed(self.clock.now());
        let report = GestureReport::from_metrics(&self.metrics, elapsed);
        tracing::info!("Final statistics\n{}", report.render_table());

        let mut written = WrittenReports::default();
        let persistence_error = persist(&report, &self.cursor, &self.options, &mut written);

        SessionSummary {
            end_reason,
            frames: self.frames,
            events: self.events,
            report,
            metrics: self.metrics,
            cursor: self.cursor,
            written,
            persistence_error,
        }
    }
}

/// Writes every artifact independently. A failed write is logged and does
/// not stop the others; the first error is returned.
fn persist(
    report: &GestureReport,
    cursor: &CursorTestTracker,
    options: &SessionOptions,
    written: &mut WrittenReports,
) -> Option<ReportError> {
    let mut first_error = None;
    let mut attempt = |path: PathBuf, result: Result<(), ReportError>| -> Option<PathBuf> {
        match result {
            Ok(()) => Some(path),
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Failed to persist report");
                first_error.get_or_insert(e);
                None
            }
        }
    };

    let json_path = options.report_dir.join(GESTURE_REPORT_JSON);
    let result = report::write_json(report, &json_path);
    written.json = attempt(json_path, result);

    if options.write_text_reports {
        let text_path = options.report_dir.join(GESTURE_REPORT_TEXT);
        let result = report::write_text(&report.render_text(), &text_path);
        written.text = attempt(text_path, result);
    }

    if !cursor.is_empty() {
        let cursor_path = options.report_dir.join(CURSOR_REPORT_TEXT);
        let result = report::write_text(
            &report::render_cursor_text(cursor, report.test_timestamp),
            &cursor_path,
        );
        written.cursor_text = attempt(cursor_path, result);
    }
    first_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::geometry::fixtures::*;
    use std::collections::VecDeque;

    struct ScriptedFrames {
        frames: VecDeque<(Duration, Vec<HandPose>)>,
        clock: ManualClock,
    }

    impl FrameSource for ScriptedFrames {
        type Frame = Vec<HandPose>;

        fn next_frame(&mut self) -> Option<Self::Frame> {
            let (t, hands) = self.frames.pop_front()?;
            self.clock.set(t);
            Some(hands)
        }

        fn frame_size(&self, _frame: &Self::Frame) -> FrameSize {
            FrameSize {
                width: 640,
                height: 480,
            }
        }
    }

    struct PassThrough {
        clock: ManualClock,
    }

    impl HandDetector<Vec<HandPose>> for PassThrough {
        fn detect(&mut self, frame: &Vec<HandPose>) -> Vec<HandPose> {
            self.clock.advance(Duration::from_millis(7));
            frame.clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        positions: Vec<ScreenPosition>,
        clicks: Vec<MouseButton>,
        scrolls: Vec<(i32, i32)>,
    }

    impl PointingDevice for Recorder {
        fn set_position(&mut self, position: ScreenPosition) {
            self.positions.push(position);
        }
        fn click(&mut self, button: MouseButton) {
            self.clicks.push(button);
        }
        fn scroll(&mut self, dx: i32, dy: i32) {
            self.scrolls.push((dx, dy));
        }
    }

    /// Commands released after a given frame index.
    struct ScriptedCommands {
        clock: ManualClock,
        queue: VecDeque<(Duration, Command)>,
    }

    impl CommandSource for ScriptedCommands {
        fn poll(&mut self) -> Option<Command> {
            let now = self.clock.now();
            match self.queue.front() {
                Some((at, _)) if *at <= now => self.queue.pop_front().map(|(_, c)| c),
                _ => None,
            }
        }
    }

    fn options(dir: &std::path::Path) -> SessionOptions {
        SessionOptions {
            screen: ScreenSize {
                width: 1920,
                height: 1080,
            },
            report_dir: dir.to_path_buf(),
            write_text_reports: true,
            start_in_cursor_test_mode: false,
            rapid_time_threshold_ms: None,
            rapid_distance_threshold_px: None,
        }
    }

    fn run(
        frames: Vec<(u64, Vec<HandPose>)>,
        commands: Vec<(u64, Command)>,
        opts: SessionOptions,
        recorder: &mut Recorder,
    ) -> SessionSummary {
        let clock = ManualClock::new();
        let source = ScriptedFrames {
            frames: frames
                .into_iter()
                .map(|(t, h)| (Duration::from_millis(t), h))
                .collect(),
            clock: clock.clone(),
        };
        let detector = PassThrough {
            clock: clock.clone(),
        };
        let commands = ScriptedCommands {
            clock: clock.clone(),
            queue: commands
                .into_iter()
                .map(|(t, c)| (Duration::from_millis(t), c))
                .collect(),
        };
        Session::new(
            source,
            detector,
            recorder,
            clock,
            commands,
            GestureConfig::default(),
            opts,
        )
        .run()
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Command::from_key('y'), Some(Command::ConfirmTruePositive));
        assert_eq!(Command::from_key('Q'), Some(Command::QuitAndSave));
        assert_eq!(
            Command::from_key('1'),
            Some(Command::DeclareFalseNegative(GestureKind::ScrollUp))
        );
        assert_eq!(
            Command::from_key('6'),
            Some(Command::DeclareFalseNegative(GestureKind::MoveCursor))
        );
        assert_eq!(Command::from_key('7'), None);
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn named_commands_parse() {
        assert_eq!(Command::parse("p"), Ok(Command::RecordPrecisionPoint));
        assert_eq!(
            Command::parse("false_negative:click_right"),
            Ok(Command::DeclareFalseNegative(GestureKind::ClickRight))
        );
        assert_eq!(
            Command::parse("aspect:edge"),
            Ok(Command::SelectCursorAspect(CursorAspect::Edge))
        );
        assert_eq!(
            Command::parse("rapid_thresholds: 800, 150"),
            Ok(Command::SetRapidThresholds {
                time_ms: 800.0,
                distance_px: 150.0
            })
        );
        assert!(Command::parse("rapid_thresholds:inf,0").is_err());
        assert!(Command::parse("rapid_thresholds:800,NaN").is_err());
        assert!(Command::parse("rapid_thresholds:0,150").is_err());
        assert!(Command::parse("false_negative:exit_request").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn click_is_issued_recorded_and_labeled() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let summary = run(
            vec![
                (0, vec![open_hand()]),
                (600, vec![thumb_touching(20, 5.0)]),
                (700, vec![thumb_touching(20, 5.0)]),
            ],
            vec![(600, Command::ConfirmTruePositive)],
            options(dir.path()),
            &mut recorder,
        );

        assert_eq!(summary.end_reason, EndReason::SourceExhausted);
        assert_eq!(summary.frames, 3);
        assert_eq!(recorder.clicks, vec![MouseButton::Left]);
        assert_eq!(recorder.positions.len(), 3);

        let click = summary.metrics.record(GestureKind::ClickLeft).unwrap();
        assert_eq!(click.detected, 1);
        assert_eq!(click.true_positive, 1);
        assert_eq!(summary.metrics.response_time_stats(GestureKind::ClickLeft).mean_ms, 7.0);
        assert_eq!(summary.metrics.record(GestureKind::MoveCursor).unwrap().detected, 1);
        assert!(summary.written.json.is_some());
        assert!(summary.written.text.is_some());
        assert!(summary.written.cursor_text.is_none());
    }

    #[test]
    fn exit_gesture_ends_session_without_metrics_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let pair = vec![open_hand(), open_hand()];
        let frames = (0..=40).map(|i| (i * 100, pair.clone())).collect();
        let summary = run(frames, Vec::new(), options(dir.path()), &mut recorder);

        assert_eq!(summary.end_reason, EndReason::ExitGesture);
        assert_eq!(summary.frames, 31);
        assert_eq!(
            summary.events.last().map(|e| e.kind),
            Some(GestureKind::ExitRequest)
        );
        assert_eq!(summary.metrics.totals().detected, 0);
    }

    #[test]
    fn quit_command_stops_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let frames = (0..10).map(|i| (i * 100, vec![open_hand()])).collect();
        let summary = run(
            frames,
            vec![(300, Command::QuitAndSave)],
            options(dir.path()),
            &mut recorder,
        );
        assert_eq!(summary.end_reason, EndReason::Quit);
        assert_eq!(summary.frames, 4);
    }

    #[test]
    fn keyboard_toggles_gate_scroll() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let frames = vec![
            (0, vec![thumb_index_apart(20.0)]),
            (100, vec![thumb_index_apart(20.0)]),
            (200, vec![thumb_index_apart(20.0)]),
        ];
        run(
            frames,
            vec![(100, Command::ToggleAllGestures)],
            options(dir.path()),
            &mut recorder,
        );
        assert_eq!(recorder.scrolls, vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn cursor_test_records_precision_against_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let mut opts = options(dir.path());
        opts.start_in_cursor_test_mode = true;

        // grid[0] on a 1920x1080 screen is (320, 180) -> frame (106.67, 80)
        let mut landmarks = *open_hand().landmarks();
        landmarks[12] = crate::gesture::types::Point::new(110.0, 80.0);
        let on_target = HandPose::new(landmarks);

        let summary = run(
            vec![(0, vec![on_target.clone()]), (100, vec![on_target]), (200, vec![open_hand()])],
            vec![(100, Command::RecordPrecisionPoint)],
            opts,
            &mut recorder,
        );
        let stats = summary.cursor.precision_stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(summary.cursor.smoothness_stats().sample_count, 3);
        assert_eq!(summary.cursor.smoothness_stats().mean_latency_ms, 7.0);
        assert!(summary.written.cursor_text.is_some());
    }

    #[test]
    fn persistence_failure_keeps_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        let mut recorder = Recorder::default();
        let summary = run(
            vec![(0, vec![thumb_touching(20, 5.0)])],
            vec![(0, Command::ConfirmTruePositive)],
            options(&blocker),
            &mut recorder,
        );
        assert!(summary.persistence_error.is_some());
        assert!(summary.written.json.is_none());
        assert_eq!(summary.report.overall_accuracy_percent, 100.0);
    }

    #[test]
    fn reset_restarts_report_duration() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let summary = run(
            vec![(0, vec![open_hand()]), (5000, vec![open_hand()]), (6000, vec![open_hand()])],
            vec![(5000, Command::ResetSession)],
            options(dir.path()),
            &mut recorder,
        );
        assert_eq!(summary.report.duration_seconds, 1.0);
        assert_eq!(summary.metrics.frame_count(), 1);
        let restored = report::read_json(summary.written.json.as_deref().unwrap()).unwrap();
        assert_eq!(restored.duration_seconds, 1.0);
    }

    #[test]
    fn frame_rate_is_sampled_from_the_session_clock() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let frames = (0..=20).map(|i| (i * 100, vec![])).collect();
        let summary = run(frames, vec![], options(dir.path()), &mut recorder);
        assert_eq!(summary.metrics.fps_samples(), &[10.0, 10.0]);
        assert_eq!(summary.report.fps.average, 10.0);
    }

    #[test]
    fn failed_json_write_does_not_skip_text_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(GESTURE_REPORT_JSON)).unwrap();
        let mut recorder = Recorder::default();
        let summary = run(
            vec![(0, vec![open_hand()])],
            vec![],
            options(dir.path()),
            &mut recorder,
        );
        assert!(matches!(summary.persistence_error, Some(ReportError::Io(_))));
        assert!(summary.written.json.is_none());
        let text = summary.written.text.as_deref().unwrap();
        assert!(text.exists());
    }

    #[test]
    fn non_finite_rapid_thresholds_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let summary = run(
            vec![(0, vec![open_hand()])],
            vec![(
                0,
                Command::SetRapidThresholds {
                    time_ms: f64::INFINITY,
                    distance_px: 0.0,
                },
            )],
            options(dir.path()),
            &mut recorder,
        );
        assert_eq!(
            summary.cursor.rapid_thresholds(),
            CursorTestTracker::new(&GestureConfig::default().cursor_test, options(dir.path()).screen)
                .rapid_thresholds()
        );
    }
}
