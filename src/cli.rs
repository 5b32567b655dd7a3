//! Command-line arguments

use clap::{Parser, Subcommand};
use senterej_engine::{Notation, Position, Variant};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "senterej")]
#[command(about = "Senterej and standard chess positions, moves and replays")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `senterej_engine=trace`
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the starting position of a variant
    New {
        /// senterej or standard; defaults to the configured variant
        #[arg(long)]
        variant: Option<Variant>,

        /// shared or senterej piece letters
        #[arg(long)]
        notation: Option<Notation>,
    },

    /// Render a FEN position and its status
    Show {
        fen: String,

        #[arg(long)]
        notation: Option<Notation>,
    },

    /// List the moves available in a FEN position
    Moves {
        fen: String,

        /// Only moves of the piece on this square (`e2` or `6,4`)
        square: Option<Position>,
    },

    /// Play a JSON move file through a session and print the result
    Replay {
        file: PathBuf,

        #[arg(long)]
        notation: Option<Notation>,

        /// Print each accepted move as a sync message
        #[arg(long)]
        wire: bool,
    },

    /// Show or reset the settings file
    Config {
        /// Overwrite the file with default settings
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves_with_square() {
        let cli = Cli::parse_from(["senterej", "moves", "8/8/8/8/8/8/8/4K3 w", "e1"]);
        match cli.command {
            Command::Moves { square, .. } => assert_eq!(square, Position::new(7, 4)),
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_new_with_variant_and_global_config() {
        let cli = Cli::parse_from([
            "senterej",
            "new",
            "--variant",
            "standard",
            "--config",
            "/tmp/s.json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Command::New { variant, notation } => {
                assert_eq!(variant, Some(Variant::Standard));
                assert_eq!(notation, None);
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
