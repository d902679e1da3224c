/// Landmarks per detected hand
pub const LANDMARK_COUNT: usize = 21;

/// Wrist landmark index
pub const WRIST: usize = 0;

/// Thumb tip landmark index
pub const THUMB_TIP: usize = 4;

/// Index finger tip landmark index
pub const INDEX_TIP: usize = 8;

/// Middle finger tip landmark index (drives the cursor)
pub const MIDDLE_TIP: usize = 12;

/// Ring finger tip landmark index
pub const RING_TIP: usize = 16;

/// Pinky tip landmark index
pub const PINKY_TIP: usize = 20;

/// Fingertips in thumb → pinky order
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Structured gesture report file name
pub const GESTURE_REPORT_JSON: &str = "gesture_report.json";

/// Human-readable gesture report file name
pub const GESTURE_REPORT_TEXT: &str = "gesture_report.txt";

/// Cursor test report file name
pub const CURSOR_REPORT_TEXT: &str = "cursor_report.txt";

/// Milliseconds per second
pub const MILLIS_PER_SEC: f64 = 1_000.0;

/// Nanoseconds per millisecond
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;
