use anyhow::Context;
use chatreel::kernel::event::PlaybackEvent;
use chatreel::script::demo;
use chatreel::{HostBinding, PacingConfig, PlaybackSnapshot, Player, Role, Script};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

const ROTATE_SECS: u64 = 45;
const WIDTH: usize = 72;

// Usage: chatreel [pacing.json] [scripts.json]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PacingConfig::from_path(&path)
            .with_context(|| format!("loading pacing config {path}"))?,
        None => PacingConfig::default(),
    };
    let scripts = match args.next() {
        Some(path) => load_scripts(&path)?,
        None => demo::all()?,
    };
    anyhow::ensure!(!scripts.is_empty(), "no scripts to play");

    tracing::info!(scripts = scripts.len(), "chatreel demo booting");

    let player = Player::spawn(config)?;
    let mut events = player.events();
    let mut binding = HostBinding::new(player);

    let mut selected = 0;
    binding.mount(scripts[selected].clone()).await?;

    // Simulates the viewer switching tabs.
    let mut rotate = interval(Duration::from_secs(ROTATE_SECS));
    rotate.set_missed_tick_behavior(MissedTickBehavior::Skip);
    rotate.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            _ = rotate.tick() => {
                selected = (selected + 1) % scripts.len();
                binding.select(scripts[selected].clone()).await?;
            }

            event = events.recv() => match event {
                Ok(event) => render(&event, &binding.snapshot()),
                Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "renderer lagged"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    binding.close().await;
    tracing::info!("chatreel demo stopped");
    Ok(())
}

fn load_scripts(path: &str) -> anyhow::Result<Vec<Script>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading scripts {path}"))?;
    let scripts: Vec<Script> =
        serde_json::from_str(&raw).with_context(|| format!("parsing scripts {path}"))?;
    Ok(scripts)
}

fn render(event: &PlaybackEvent, snap: &PlaybackSnapshot) {
    match event {
        PlaybackEvent::Started { key, .. } => {
            println!("\n=== {} ===", key);
        }
        PlaybackEvent::TurnCommitted { index } => {
            if let Some(turn) = snap.state.revealed().get(*index) {
                let mut line = turn.text.clone();
                for m in &turn.metrics {
                    line.push_str(&format!("  [{}: {}]", m.label, m.value));
                }
                if let Some(action) = &turn.action_label {
                    line.push_str(&format!("  <{}>", action));
                }
                match turn.role {
                    Role::Initiator => println!("{}", line),
                    Role::Agent | Role::Outcome => println!("{:>width$}", line, width = WIDTH),
                }
            }
        }
        PlaybackEvent::LoopReset { loops } => {
            println!("--- loop {} ---", loops);
        }
        _ => {}
    }
}
