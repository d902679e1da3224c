use std::path::Path;
use std::process::ExitCode;

use gesture_mouse::config::Config;
use gesture_mouse::gesture::config::GestureConfig;
use gesture_mouse::logging::init_tracing;
use gesture_mouse::replay::{load_trace, replay};
use gesture_mouse::session::SessionOptions;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let _log_guard = init_tracing(&config.log_config());
    tracing::info!("Starting gesture-replay");

    let gesture_config = match &config.gesture_config_path {
        Some(path) => match GestureConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, path = %path, "Invalid gesture config");
                return ExitCode::FAILURE;
            }
        },
        None => GestureConfig::default(),
    };

    let trace_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.trace_path.clone());
    let frames = match load_trace(Path::new(&trace_path)) {
        Ok(frames) => frames,
        Err(e) => {
            tracing::error!(error = %e, path = %trace_path, "Failed to load trace");
            return ExitCode::FAILURE;
        }
    };

    let outcome = replay(frames, gesture_config, SessionOptions::from_config(&config));
    let summary = &outcome.summary;

    println!("{}", summary.report.render_table());
    println!(
        "Session ended ({}) after {} frames, {} pointer actions",
        summary.end_reason,
        summary.frames,
        outcome.pointer.actions.len()
    );

    match &summary.persistence_error {
        Some(e) => {
            eprintln!("Reports were not saved: {e}");
            ExitCode::FAILURE
        }
        None => {
            for path in [&summary.written.json, &summary.written.text, &summary.written.cursor_text]
                .into_iter()
                .flatten()
            {
                println!("Report written to {}", path.display());
            }
            ExitCode::SUCCESS
        }
    }
}
