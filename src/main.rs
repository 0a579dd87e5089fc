use actix::prelude::*;
use clap::Parser;
use futures::channel::mpsc;
use log::{info, warn};
use std::io;
use std::path::PathBuf;

use chess_web_client::config::ClientConfig;
use chess_web_client::game::board_string;
use chess_web_client::render::LogRenderer;
use chess_web_client::replay::TranscriptLine;
use chess_web_client::websocket::{
    ClientSession, FrameChannel, GetSnapshot, InboundFrame, SessionContext,
};

/// Replay a recorded chess session through the client state machine
#[derive(Parser)]
#[command(name = "chess-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to Client.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Newline-delimited JSON of server frames and user gestures
    transcript: PathBuf,
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));

    let transcript = std::fs::read_to_string(&cli.transcript)?;
    info!(
        "Replaying {} as a client of {}",
        cli.transcript.display(),
        config.channel_url()
    );

    let (tx, mut rx) = mpsc::unbounded();
    let context = SessionContext::new(
        &config,
        Box::new(FrameChannel::new(tx)),
        Box::new(LogRenderer),
    );
    let session = ClientSession::new(context).start();

    for (index, line) in transcript.lines().enumerate() {
        let delivered = match TranscriptLine::parse(line) {
            Ok(Some(TranscriptLine::Frame(frame))) => session.send(InboundFrame(frame)).await,
            Ok(Some(TranscriptLine::Gesture(gesture))) => session.send(gesture).await,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping transcript line {}: {}", index + 1, e);
                continue;
            }
        };
        delivered.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        while let Ok(Some(frame)) = rx.try_next() {
            println!("-> {}", frame);
        }
    }

    let snapshot = session
        .send(GetSnapshot)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", board_string::encode(&snapshot.board));
    for row in snapshot.roster.iter() {
        println!("game {}", row.game_id);
    }

    Ok(())
}
