//! numlab daemon - headless playback host
//!
//! Runs one simulation session and drives its scheduler from a frame loop, so any
//! UI client can render experiments without owning the timing logic:
//! - Frame loop ticking playback at the configured FPS
//! - Newline-delimited JSON over TCP for play/pause/seek/speed/reset and snapshots
//! - Read-only scenario and hint files from the data directory
//!
//! Data locations:
//! - Linux: ~/.local/share/numlab/
//! - Windows: %APPDATA%\numlab\
//! - MacOS: ~/Library/Application Support/numlab/

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;
use tracing::{error, info};

mod config;
mod error;
mod paths;
mod protocol;
mod state;

use config::DaemonConfig;
use paths::AppPaths;
use protocol::{Request, Response};
use state::DaemonState;

// ═══════════════════════════════════════════════════════════════════════════
// Client Handler
// ═══════════════════════════════════════════════════════════════════════════

async fn handle_client(
    stream: TcpStream,
    state: Arc<RwLock<DaemonState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let mut s = state.write().await;
                s.handle(request)
            }
            Err(e) => Response::Error {
                message: format!("Invalid request: {}", e),
            },
        };

        writer
            .write_all(serde_json::to_string(&response)?.as_bytes())
            .await?;
        writer.write_all(b"\n").await?;
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let paths = AppPaths::new()?;
    info!("Data directory: {}", paths.data_dir().display());

    let cfg = DaemonConfig::load(&paths)?;
    let catalog = config::load_catalog(&paths);
    let problems = config::load_problems(&paths);
    info!("{} scenarios available", catalog.len());

    let daemon = DaemonState::new(catalog, problems, &cfg.scenario, cfg.target_fps)?;
    info!(
        "Active scenario: {} at {} fps",
        daemon.session().config().id,
        daemon.target_fps
    );
    let state = Arc::new(RwLock::new(daemon));

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C: shutting down");
            std::process::exit(0);
        }
    });

    let listener = TcpListener::bind(&cfg.addr).await?;
    info!("numlab daemon listening on {}", cfg.addr);

    // Frame loop task
    let state_clone = Arc::clone(&state);
    tokio::spawn(async move {
        loop {
            let target_fps = {
                let s = state_clone.read().await;
                s.target_fps
            };
            let frame_millis = (1000 / target_fps.max(1)).max(1) as u64;

            tokio::time::sleep(tokio::time::Duration::from_millis(frame_millis)).await;

            let mut s = state_clone.write().await;
            s.tick();
        }
    });

    // Accept client connections
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("Client connected: {}", addr);
        let state_clone = Arc::clone(&state);

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, state_clone).await {
                error!("Client handler error: {}", e);
            }
        });
    }
}
