use anyhow::Context;
use clap::Parser;
use senterej::cli::{Cli, Command};
use senterej::commands;
use senterej::core::{read_settings, settings_path, Settings};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = settings_path(cli.config.as_deref());
    let loaded = read_settings(&path);

    // RUST_LOG wins over --log, which wins over the settings file
    let directive = cli.log.clone().unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|s| s.log_filter.clone())
            .unwrap_or_else(|_| Settings::default().log_filter)
    });
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&directive))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = loaded.unwrap_or_else(|e| {
        warn!("[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.", path, e);
        Settings::default()
    });

    let output = match cli.command {
        Command::New { variant, notation } => commands::new_game(
            variant.unwrap_or(settings.default_variant),
            notation.unwrap_or(settings.notation),
        )?,
        Command::Show { fen, notation } => commands::show(&fen, notation)?,
        Command::Moves { fen, square } => commands::list_moves(&fen, square)?,
        Command::Replay {
            file,
            notation,
            wire,
        } => commands::replay_file(&file, &settings, notation, wire)
            .with_context(|| format!("replaying {}", file.display()))?,
        Command::Config { reset } => commands::config(&path, reset)?,
    };

    print!("{output}");
    Ok(())
}
