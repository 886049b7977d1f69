use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nation_chess::data::nation_abilities;
use nation_chess::{nation_info, Nation, PieceType};
use std::io;
use std::path::PathBuf;
use superchess::config::{self, DriverSettings};
use superchess::{play, selfplay};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nations chess from the command line", long_about = None)]
struct Args {
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `nation_chess=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Nation for White
    #[arg(long, global = true)]
    white: Option<Nation>,

    /// Nation for Black
    #[arg(long, global = true)]
    black: Option<Nation>,

    /// Promotion piece when none is given
    #[arg(long, global = true)]
    promotion: Option<PieceType>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the nations and their abilities
    Nations,
    /// Play on stdin, one command per line
    Play,
    /// Play random moves for both sides
    Selfplay {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        max_plies: Option<u32>,
    },
    /// Write the effective settings to the settings file
    SaveSettings,
}

impl Args {
    fn settings(&self) -> DriverSettings {
        let path = self.config.clone().unwrap_or_else(config::settings_path);
        let mut settings = config::load_or_default(&path);
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(white) = self.white {
            settings.engine.white = white;
        }
        if let Some(black) = self.black {
            settings.engine.black = black;
        }
        if let Some(promotion) = self.promotion {
            settings.engine.promotion = promotion;
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Settings decide the log filter, so the first load logs nowhere.
    let settings = args.settings();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    settings.validate()?;

    match args.command {
        Command::Nations => print_nations(),
        Command::Play => {
            let mut engine = settings.engine.new_game()?;
            play::run_session(
                &mut engine,
                settings.engine.promotion,
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
        }
        Command::Selfplay { seed, max_plies } => {
            let plies = max_plies.unwrap_or(settings.max_plies);
            let engine = selfplay::self_play(&settings.engine, seed, plies)?;
            println!("{}", engine.move_history().to_text());
            println!("{}", serde_json::to_string_pretty(&engine.game_state())?);
        }
        Command::SaveSettings => {
            let path = args.config.unwrap_or_else(config::settings_path);
            config::save_to(&path, &settings)
                .with_context(|| format!("saving settings to {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_nations() {
    for nation in Nation::ALL {
        let info = nation_info(nation);
        println!("{} ({}): {}", info.name, nation, info.motto);
        for entry in nation_abilities(nation) {
            println!(
                "  {:<8} {:<22} {}",
                entry.piece.as_str(),
                entry.name,
                entry.description
            );
        }
    }
}
