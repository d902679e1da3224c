use serde::{Deserialize, Serialize};

use crate::gesture::types::{FrameSize, Point, ScreenSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: i32,
    pub y: i32,
}

/// Linear frame→screen scaling. `None` for a degenerate frame.
pub fn map_to_screen(anchor: Point, frame: FrameSize, screen: ScreenSize) -> Option<ScreenPosition> {
    if frame.width == 0 || frame.height == 0 {
        return None;
    }
    let x = (anchor.x * screen.width as f64 / frame.width as f64).round();
    let y = (anchor.y * screen.height as f64 / frame.height as f64).round();
    Some(ScreenPosition {
        x: x as i32,
        y: y as i32,
    })
}
