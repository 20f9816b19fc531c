//! Scripted snap-assist demo over the in-memory container: drags one
//! window toward another frame by frame, lets it snap, releases, and
//! shows the resulting group riding a shared minimize.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use windock_common::Rect;
use windock_container::sim::SimContainer;
use windock_container::{Container, ContainerWindow, WindowOptions};
use windock_snap::{SnapAssistWindowManager, SnapOptions, WindowStateTracking};

#[derive(Parser, Debug)]
#[command(
    name = "windock",
    about = "Drag two sim windows together and watch them snap and group"
)]
struct Args {
    /// Maximum edge distance in pixels for a snap to trigger.
    #[arg(long, default_value_t = 20.0)]
    snap_threshold: f64,

    /// Gap left between two snapped windows' edges.
    #[arg(long, default_value_t = 15.0)]
    snap_offset: f64,

    /// Log filter directive, e.g. "windock=debug".
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let directive = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("windock demo v{} starting", env!("CARGO_PKG_VERSION"));

    let container = Arc::new(SimContainer::new());
    let manager = Arc::new(SnapAssistWindowManager::new(
        Arc::clone(&container) as Arc<dyn Container>,
        SnapOptions {
            snap_threshold: args.snap_threshold,
            snap_offset: args.snap_offset,
            tracking: WindowStateTracking::GROUP,
            ..SnapOptions::default()
        },
    ));
    let pump = Arc::clone(&manager).start().await;

    let left = container.create_window(
        WindowOptions::named("left").with_bounds(Rect::new(0.0, 100.0, 400.0, 300.0)),
    );
    let right = container.create_window(
        WindowOptions::named("right").with_bounds(Rect::new(900.0, 100.0, 400.0, 300.0)),
    );
    settle().await;
    tracing::info!(left = %left.id(), right = %right.id(), "windows created");

    // Drag "right" leftwards; the last frame lands inside the snap
    // threshold of "left"'s right edge.
    for x in [780.0, 640.0, 520.0, 402.0] {
        container.emit_moving(right.id(), Some(Rect::new(x, 100.0, 400.0, 300.0)));
        settle().await;
        let bounds = right.get_bounds().await.expect("right window is open");
        tracing::info!(raw_x = x, x = bounds.x, y = bounds.y, "drag frame");
    }

    container.emit_moved(right.id());
    settle().await;

    let group = right.get_group().await.expect("right window is open");
    tracing::info!(members = group.len(), "drag released");
    for member in &group {
        let bounds = member.get_bounds().await.expect("group member is open");
        tracing::info!(
            window = %member.id(),
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "group member"
        );
    }

    // With GROUP tracking, minimizing one member ripples to the rest.
    right.minimize().await.expect("minimize");
    settle().await;
    let left_minimized = container
        .window(left.id())
        .map(|w| w.is_minimized())
        .unwrap_or(false);
    tracing::info!(left_minimized, "minimized one grouped window");

    pump.abort();
}

/// Give the event pump a moment to drain the bus.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(25)).await;
}
