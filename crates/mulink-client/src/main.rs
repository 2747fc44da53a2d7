//! mulink client binary.
//!
//! Connects to one game server, routes every inbound message through the
//! packet router and sends the follow-up requests it triggers.
//! Usage: `mulink-client [config.yaml]` (default `mulink.yaml`).

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use mulink_client::{app_state, config, transport};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "mulink.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let addr = cfg.connection.addr();
    let max_frame = cfg.connection.max_frame_bytes;

    let (out_tx, out_rx) = mpsc::channel(cfg.connection.outbound_queue);
    let state = app_state::ClientState::new(cfg, out_tx).expect("client state init failed");

    tracing::info!(%addr, protocol = %state.cfg().client.protocol, "mulink-client connecting");
    let stream = TcpStream::connect(&addr).await.expect("failed to connect");

    let router = state.router();
    if let Err(e) = transport::run(stream, router.clone(), out_rx, max_frame).await {
        tracing::error!(error = %e, "connection failed");
    }

    let session = state.session().snapshot();
    tracing::info!(
        in_game = session.in_game,
        character = ?session.character_name,
        "session ended"
    );
    tracing::info!(metrics = %router.metrics().render(), "router metrics");
}
