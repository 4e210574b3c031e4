mod config;
mod loopback;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tdm_session::callbacks::ProjectorDialer;
use tdm_session::{
    spawn_with_config, CallbackRouter, ChannelProjector, ContactDirectory, CoordinatorHandle,
    Screen, UiProjector, UiRx,
};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::loopback::LoopbackConnector;
use crate::script::{parse_line, Command};

#[derive(Parser)]
#[command(version, about = "Drives a push-to-talk dialogue session against a loopback backend")]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    let cli = Cli::parse();

    // --- 3. Render context ---
    let (projector, ui_rx) = ChannelProjector::new();
    let projector: Arc<dyn UiProjector> = Arc::new(projector);
    let render = std::thread::Builder::new()
        .name("render".to_string())
        .spawn(move || render_loop(ui_rx))
        .context("Failed to start render thread")?;

    // --- 4. Coordinator ---
    let coordinator_config = config.coordinator();
    tracing::info!(endpoint = %coordinator_config.endpoint(), "starting session");
    let router = CallbackRouter::phone_domain(
        projector.clone(),
        coordinator_config.unknown_actions(),
        Arc::new(ContactDirectory::example()),
        Arc::new(ProjectorDialer::new(projector.clone())),
    );
    let (connector, echo_rx) = LoopbackConnector::new();
    let (handle, task) = spawn_with_config(coordinator_config, router, Box::new(connector), projector);
    let forwarder = tokio::spawn(loopback::forward(echo_rx, handle.clone()));

    // --- 5. Commands ---
    match cli.script {
        Some(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            for line in text.lines() {
                if !run_line(&handle, line).await? {
                    break;
                }
            }
        }
        None => {
            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                if !run_line(&handle, &line).await? {
                    break;
                }
            }
        }
    }

    // --- 6. Shutdown ---
    handle.shutdown().await.context("Coordinator stopped early")?;
    task.await.context("Coordinator task failed")?;
    forwarder.abort();
    if render.join().is_err() {
        tracing::error!("render thread panicked");
    }

    let stats = handle.stats()?;
    tracing::info!(
        served = stats.callbacks_served(),
        rejected = stats.callbacks_rejected(),
        abandoned = stats.callbacks_abandoned(),
        deadline_misses = stats.deadline_misses(),
        unexpected = stats.unexpected_events(),
        "session finished"
    );
    Ok(())
}

/// Executes one script line; `false` once the script asks to quit.
async fn run_line(handle: &CoordinatorHandle, line: &str) -> Result<bool> {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(true),
        Err(e) => {
            tracing::warn!("skipping line {:?}: {}", line, e);
            return Ok(true);
        }
    };

    match command {
        Command::Quit => return Ok(false),
        Command::Connect => handle.connect().await?,
        Command::Disconnect => handle.disconnect().await?,
        Command::PressTalk => handle.press_talk().await?,
        Command::Backend(event) => handle.backend(event).await?,
        Command::Recognition(event) => handle.recognition(event).await?,
        Command::Dialogue(event) => handle.dialogue(event).await?,
        Command::Wait(duration) => tokio::time::sleep(duration).await,
        Command::Callback(request) => {
            let reply = handle.callback(request).await;
            let json = serde_json::to_string(&reply).context("Failed to serialize reply")?;
            println!("reply: {json}");
        }
    }
    Ok(true)
}

fn render_loop(mut rx: UiRx) {
    let mut screen = Screen::new();
    while let Some(update) = rx.blocking_recv() {
        screen.apply(update);
        println!("{}", screen.render());
    }
    tracing::debug!("render context closed");
}
