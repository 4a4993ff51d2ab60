use std::sync::Arc;

use anyhow::Context;
use log::{error, info, warn};
use spider_panel::app::{App, Outcome};
use spider_panel::config::{PanelConfig, CMD_CHANNEL_SIZE};
use spider_panel::display;
use spider_panel::input::PanelInput;
use spider_panel::tasks::dispatch_task::dispatch_task;
use spider_panel::tasks::net_task::{Backend, HttpBackend};
use spider_panel::PanelError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PanelConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => PanelConfig::default(),
    }
    .with_env_overrides();

    let backend: Arc<dyn Backend> =
        Arc::new(HttpBackend::new(&config).context("building HTTP client")?);
    info!("Starting spider panel against {}", config.backend_url);

    let (cmd_sender, cmd_receiver) = mpsc::channel(CMD_CHANNEL_SIZE);
    let dispatcher = tokio::spawn(dispatch_task(backend.clone(), cmd_receiver));

    let mut app = App::new(&config, backend, cmd_sender);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("type 'help' for commands");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let input = match PanelInput::try_from(line) {
            Ok(input) => input,
            Err(e) => {
                warn!("Unrecognised input: {e}");
                continue;
            }
        };
        match app.handle(input).await {
            Ok(Outcome::Show(text)) => println!("{text}"),
            Ok(Outcome::Quiet) => {}
            Ok(Outcome::Quit) => break,
            Err(e @ PanelError::ChannelClosed) => {
                error!("{e}");
                break;
            }
            Err(e) => {
                warn!("{line}: {e}");
                println!("{} ({e})", display::PLACEHOLDER);
            }
        }
    }

    drop(app);
    let sent = dispatcher.await.context("dispatch task panicked")?;
    info!("Sent {sent} commands, bye");
    Ok(())
}
