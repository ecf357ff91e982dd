mod chat;
mod common;
mod config;
mod ui;

use std::error::Error;

use chat::{ChatSession, RandomPicker};
use clap::{Parser, Subcommand};
use config::AppConfig;
use dotenvy::dotenv;
use eframe::egui;
use tokio::runtime::Handle;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "canned_chat",
    version,
    about = "Desktop chat demo with a simulated chat partner"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE", global = true)]
    config: String,
    /// Override the delay before the simulated reply
    #[arg(long, value_name = "MS")]
    reply_delay_ms: Option<u64>,
    /// Seed the reply picker for a reproducible conversation
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Start with an empty conversation
    #[arg(long)]
    no_history: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Write the default config file and exit
    InitConfig,
}

impl Cli {
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(delay) = self.reply_delay_ms {
            config.reply_delay_ms = delay;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        if self.no_history {
            config.seed_history = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if cli.mode == Some(Mode::InitConfig) {
        config::save_config(&cli.config, &AppConfig::default())?;
        log::info!("Wrote default config to {}", cli.config);
        return Ok(());
    }

    let app_config = cli.apply_overrides(config::load_config(&cli.config));
    run_chat_window(app_config)?;
    Ok(())
}

fn run_chat_window(app_config: AppConfig) -> Result<(), eframe::Error> {
    let picker = RandomPicker::new(app_config.rng_seed);
    let session = ChatSession::start(&app_config, Box::new(picker), &Handle::current());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 720.0]),
        ..Default::default()
    };
    let mut session = Some(session);
    let title = format!("Chat mit {}", app_config.peer_name);

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let session = session
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!(
                "Window opened with {} messages, reply delay {} ms",
                session.messages().len(),
                app_config.reply_delay_ms
            );

            Ok(Box::new(ChatApp::new(cc, session)))
        }),
    )
}
