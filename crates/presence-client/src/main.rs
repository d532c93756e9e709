// crates/presence-client/src/main.rs

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use presence_core::{CursorMove, InputMessage, OutputMessage};
use presence_client::{CursorBoard, PresenceConnection};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

#[derive(Parser)]
#[clap(name = "presence-client")]
#[clap(about = "Headless client for the cursor presence server")]
struct Cli {
    /// Server WebSocket URL
    #[clap(short, long, default_value = "ws://127.0.0.1:8686/ws")]
    server: String,

    /// Move the cursor along a loop instead of sitting still
    #[clap(short, long)]
    wander: bool,

    /// Milliseconds between synthetic moves
    #[clap(short, long, default_value = "100")]
    interval_ms: u64,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_directive = if cli.debug { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let (tx, mut rx) = mpsc::unbounded_channel::<OutputMessage>();
    let mut conn = PresenceConnection::connect(&cli.server, tx).await?;

    let mut board = CursorBoard::new();
    let mut ticker = interval(Duration::from_millis(cli.interval_ms.max(1)));
    let mut step: u64 = 0;

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(msg) = msg else {
                    info!("Disconnected from server");
                    break;
                };
                report(&board, &msg);
                board.apply(msg);
            }
            _ = ticker.tick(), if cli.wander && board.can_send() => {
                let (x, y) = wander_point(step);
                step += 1;
                conn.send(&InputMessage::CursorMove(CursorMove::new(x, y).with_active(true))).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, closing connection");
                break;
            }
        }
    }

    conn.close().await
}

fn report(board: &CursorBoard, msg: &OutputMessage) {
    match msg {
        OutputMessage::AssignedDetails(d) => {
            info!(id = %d.id, "Assigned name {} with color {}", d.name, d.color);
        }
        OutputMessage::UpdateCursors(snapshot) => {
            if snapshot.len() != board.len() {
                info!("{} cursor(s) online", snapshot.len());
            }
            for (id, c) in snapshot {
                if Some(id) != board.own_id() {
                    debug!(id = %id, "{} at ({:.0}, {:.0})", c.identity.name, c.x, c.y);
                }
            }
        }
    }
}

/// Point `step` on a slow figure-eight inside an 800x600 canvas.
fn wander_point(step: u64) -> (f64, f64) {
    let t = step as f64 * 0.05;
    (400.0 + 300.0 * t.sin(), 300.0 + 200.0 * (2.0 * t).sin())
}
