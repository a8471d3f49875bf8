//! Headless overlay loop.
//!
//! Attaches to the game, reads a snapshot every frame and runs the overlay
//! views against a recording surface. Draw commands are logged at debug
//! level instead of being presented.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use lview_core::memory::layout::timing::PROCESS_POLL_INTERVAL_SECS;
use lview_core::{
    Config, GameData, MemSnapshot, MemoryReader, OffsetTable, OverlayView, PngTextureLoader,
    ProcessHandle, ReadMemory, RecordingSurface, Renderer,
};
use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use super::{all_views, load_view_settings, offsets, save_view_settings};
use crate::shutdown::ShutdownSignal;

/// Why a session with one game process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Shutdown,
    FrameLimit,
    ProcessExited,
}

#[derive(Debug, Default)]
struct WatchStats {
    frames: u64,
    failed_frames: u64,
    shapes: u64,
    slowest_frame: Duration,
}

pub fn run(
    mut config: Config,
    config_path: &Path,
    frames: Option<u64>,
    version: Option<&str>,
) -> Result<()> {
    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.trigger();
    })?;

    info!("LView {}", env!("CARGO_PKG_VERSION"));

    let mut loader = PngTextureLoader::new();
    let data = GameData::load(&config.data_folder, &mut loader).with_context(|| {
        format!("Failed to load data from {}", config.data_folder.display())
    })?;
    let report = data.report();
    info!(
        "Loaded {} units, {} spells, {} images",
        report.units, report.spells, report.images
    );

    let table = offsets::select_table(&config, version)?;
    info!("Using offsets for {}", table.version);

    let mut views = all_views();
    load_view_settings(&mut config.views, &mut views);

    let interval = Duration::from_millis(config.frame_interval_ms);
    let mut stats = WatchStats::default();

    println!("Waiting for {}... (Ctrl+C to quit)", config.process_name);
    while !shutdown.is_shutdown() {
        match ProcessHandle::find_and_open(&config.process_name) {
            Ok(process) => {
                info!(
                    "Attached to {} (pid {}, base {:#x})",
                    config.process_name, process.pid, process.base_address
                );
                let reader = MemoryReader::new(&process);

                let end = watch_process(
                    &reader, &table, &data, &views, &shutdown, frames, interval, &mut stats,
                );
                match end {
                    SessionEnd::ProcessExited => {
                        info!("Game process exited, waiting for it to restart");
                    }
                    SessionEnd::FrameLimit | SessionEnd::Shutdown => break,
                }
            }
            Err(e) => {
                debug!("Process not found: {}", e);
            }
        }

        if shutdown.wait(Duration::from_secs(PROCESS_POLL_INTERVAL_SECS)) {
            break;
        }
    }

    save_view_settings(&mut config.views, &views);
    config
        .save(config_path)
        .with_context(|| format!("Failed to save config {}", config_path.display()))?;

    print_summary(&stats);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn watch_process<R: ReadMemory>(
    reader: &R,
    table: &OffsetTable,
    data: &GameData,
    views: &[Box<dyn OverlayView>],
    shutdown: &ShutdownSignal,
    frame_limit: Option<u64>,
    interval: Duration,
    stats: &mut WatchStats,
) -> SessionEnd {
    let mut surface = RecordingSurface::new();

    loop {
        if frame_limit.is_some_and(|limit| stats.frames >= limit) {
            return SessionEnd::FrameLimit;
        }

        let started = Instant::now();
        match MemSnapshot::read(reader, table, data) {
            Ok(snapshot) => {
                let renderer = Renderer::from_snapshot(&snapshot);
                for view in views {
                    let shapes = view.draw_world_space_overlay(&snapshot, &renderer, &mut surface);
                    stats.shapes += shapes as u64;
                }

                for command in surface.drain() {
                    debug!(
                        "draw {} points color {:#010x}",
                        command.points().len(),
                        command.color().to_abgr_u32()
                    );
                }
                debug!(
                    "Frame {}: t={:.1}s, {} units, {} missiles",
                    stats.frames,
                    snapshot.game_time,
                    snapshot.unit_count(),
                    snapshot.missiles.len()
                );
            }
            Err(e) => {
                stats.failed_frames += 1;
                if reader.read_u32(reader.base_address()).is_err() {
                    return SessionEnd::ProcessExited;
                }
                warn!("Snapshot failed: {}", e);
            }
        }

        stats.frames += 1;
        stats.slowest_frame = stats.slowest_frame.max(started.elapsed());

        if shutdown.wait(interval) {
            return SessionEnd::Shutdown;
        }
    }
}

fn print_summary(stats: &WatchStats) {
    println!();
    println!("Frames:        {}", stats.frames.green());
    if stats.failed_frames > 0 {
        println!("Failed frames: {}", stats.failed_frames.yellow());
    }
    println!("Shapes drawn:  {}", stats.shapes);
    println!("Slowest frame: {:?}", stats.slowest_frame);
}
