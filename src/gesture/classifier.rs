//! Per-frame gesture predicates for the controlling hand.
//!
//! The classifier is stateless: it only looks at the current `HandPose`.
//! Edge detection and cooldowns live in `debounce`.

use serde::Serialize;

use crate::constants::{INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP};
use crate::gesture::config::ClassifierConfig;
use crate::gesture::geometry::{is_fist, landmark_distance};
use crate::gesture::types::{HandPose, Point, ScrollDirection};

/// Level-triggered predicates for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandReading {
    pub is_fist: bool,
    pub scroll: ScrollDirection,
    pub click_left: bool,
    pub click_right: bool,
    pub thumb_index_px: f64,
    pub thumb_pinky_px: f64,
    pub thumb_ring_px: f64,
    /// Middle fingertip, the landmark the cursor follows.
    pub cursor_anchor: Point,
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, pose: &HandPose) -> HandReading {
        let thumb_index_px = landmark_distance(pose, THUMB_TIP, INDEX_TIP);
        let thumb_pinky_px = landmark_distance(pose, THUMB_TIP, PINKY_TIP);
        let thumb_ring_px = landmark_distance(pose, THUMB_TIP, RING_TIP);

        HandReading {
            is_fist: is_fist(pose, self.config.fist_threshold_px),
            scroll: self.scroll_direction(thumb_index_px),
            click_left: thumb_pinky_px < self.config.click_threshold_px,
            click_right: thumb_ring_px < self.config.click_threshold_px,
            thumb_index_px,
            thumb_pinky_px,
            thumb_ring_px,
            cursor_anchor: pose.landmark(MIDDLE_TIP),
        }
    }

    /// Both thresholds are strict; the band between them is a dead zone.
    pub fn scroll_direction(&self, thumb_index_px: f64) -> ScrollDirection {
        if thumb_index_px < self.config.scroll_up_threshold_px {
            ScrollDirection::Up
        } else if thumb_index_px > self.config.scroll_down_threshold_px {
            ScrollDirection::Down
        } else {
            ScrollDirection::None
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
