pub mod classifier;
pub mod config;
pub mod cursor;
pub mod cursor_metrics;
pub mod debounce;
pub mod engine;
pub mod exit;
pub mod geometry;
pub mod metrics;
pub mod report;
pub mod types;
