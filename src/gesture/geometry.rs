//! Landmark geometry: distances and postural predicates over a single hand.

use crate::constants::{FINGERTIPS, WRIST};
use crate::gesture::types::{HandPose, Point};

pub fn landmark_distance(pose: &HandPose, a: usize, b: usize) -> f64 {
    pose.landmark(a).distance(&pose.landmark(b))
}

/// True when every fingertip lies strictly within `threshold` of the wrist.
pub fn is_fist(pose: &HandPose, threshold: f64) -> bool {
    FINGERTIPS
        .iter()
        .all(|&tip| landmark_distance(pose, WRIST, tip) < threshold)
}

/// True when every fingertip is strictly above the wrist (smaller y).
pub fn is_hand_raised(pose: &HandPose) -> bool {
    let wrist_y = pose.landmark(WRIST).y;
    FINGERTIPS.iter().all(|&tip| pose.landmark(tip).y < wrist_y)
}

/// Both of exactly two hands raised.
pub fn both_hands_raised(hands: &[HandPose]) -> bool {
    hands.len() == 2 && hands.iter().all(is_hand_raised)
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Population standard deviation of the step lengths between consecutive points.
pub fn step_length_stddev(points: impl IntoIterator<Item = Point>) -> f64 {
    let mut steps = Vec::new();
    let mut prev: Option<Point> = None;
    for p in points {
        if let Some(q) = prev {
            steps.push(q.distance(&p));
        }
        prev = Some(p);
    }
    if steps.is_empty() {
        return 0.0;
    }
    let avg = mean(steps.iter().copied());
    let variance = mean(steps.iter().map(|d| (d - avg).powi(2)));
    variance.sqrt()
}
