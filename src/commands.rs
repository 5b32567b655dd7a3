//! Command handlers
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! and the handlers can be tested directly.

use crate::core::{read_settings, save_settings, CliResult, Settings};
use crate::display::{describe_state, render_board};
use chrono::Utc;
use senterej_engine::constants::{SENTEREJ_START_FEN, STANDARD_START_FEN};
use senterej_engine::rules::safe_destinations;
use senterej_engine::{
    legal_destinations, replay, FenPosition, GameSession, Notation, Phase, Player, PlayerInfo,
    Players, Position, StartPosition, Timestamp, Variant,
};
use serde::{Deserialize, Serialize};
use shared::SyncMessage;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

/// Moves to play through a session, as read from a JSON file
///
/// ```json
/// {
///   "variant": "senterej",
///   "moves": [
///     { "player": "white", "from": "e2", "to": "e3", "timestamp": 100 },
///     { "player": "black", "from": "d7", "to": "d6" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayFile {
    pub variant: Option<Variant>,
    /// FEN to start from instead of the variant's opening setup
    pub start: Option<String>,
    pub moves: Vec<ReplayEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayEntry {
    pub player: Player,
    /// Algebraic (`e2`) or `row,col`
    pub from: String,
    pub to: String,
    /// Milliseconds; defaults to the current time plus the entry index
    pub timestamp: Option<Timestamp>,
}

/// Starting position of `variant`
pub fn new_game(variant: Variant, notation: Notation) -> CliResult<String> {
    let start = match variant {
        Variant::Senterej => SENTEREJ_START_FEN,
        Variant::Standard => STANDARD_START_FEN,
    };
    let fen = FenPosition::parse(start)?;

    let mut out = render_board(&fen.board, notation);
    let _ = writeln!(out, "\n{}", FenPosition { notation, ..fen }.to_fen());
    Ok(out)
}

/// Board, status and re-encoded FEN of a position
pub fn show(fen_text: &str, notation: Option<Notation>) -> CliResult<String> {
    let fen = FenPosition::parse(fen_text)?;
    let variant = fen.variant();
    let notation = notation.unwrap_or(fen.notation);
    let state = replay(&StartPosition::from(&fen), &[], variant);

    let mut out = render_board(&state.board, notation);
    out.push('\n');
    out.push_str(&describe_state(&state));
    let _ = writeln!(out, "fen:     {}", state.to_fen(notation));
    Ok(out)
}

/// Destinations per piece, one line per source square
///
/// In Normal phase only the active player's pieces are listed and moves that
/// expose their king are left out. During Werera every piece of both sides
/// is listed with its full movement set.
pub fn list_moves(fen_text: &str, square: Option<Position>) -> CliResult<String> {
    let fen = FenPosition::parse(fen_text)?;
    let variant = fen.variant();

    let sources: Vec<Position> = match square {
        Some(square) => vec![square],
        None => fen
            .board
            .occupied()
            .filter(|(_, piece)| fen.phase == Phase::Werera || piece.owner == fen.active)
            .map(|(pos, _)| pos)
            .collect(),
    };

    let mut out = String::new();
    for from in sources {
        let destinations: Vec<Position> = if fen.phase == Phase::Werera {
            legal_destinations(&fen.board, from, variant).into_iter().collect()
        } else {
            safe_destinations(&fen.board, from, variant)
        };
        if destinations.is_empty() && square.is_none() {
            continue;
        }
        let list: Vec<String> = destinations.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{}: {}", from, list.join(" "));
    }
    Ok(out)
}

/// Parse and play a replay file
pub fn replay_file(
    path: &Path,
    settings: &Settings,
    notation: Option<Notation>,
    wire: bool,
) -> CliResult<String> {
    let text = std::fs::read_to_string(path)?;
    let file: ReplayFile = serde_json::from_str(&text)?;
    info!("[REPLAY] Loaded {} moves from {:?}", file.moves.len(), path);
    replay_game(&file, settings, notation.unwrap_or(settings.notation), wire)
}

/// Submit every entry of `file` through a session, in file order
///
/// Rejected entries are reported and skipped; they never reach the log.
pub fn replay_game(
    file: &ReplayFile,
    settings: &Settings,
    notation: Notation,
    wire: bool,
) -> CliResult<String> {
    let white = PlayerInfo::new("white");
    let black = PlayerInfo::new("black");
    let session = match (&file.start, file.variant) {
        (Some(fen), Some(variant)) => {
            GameSession::from_fen_as(fen, variant, Players::new(white, black))?
        }
        (Some(fen), None) => GameSession::from_fen(fen, Players::new(white, black))?,
        (None, variant) => {
            GameSession::new(variant.unwrap_or(settings.default_variant), white, black)
        }
    };
    let mut session = session.with_config(settings.engine);

    let base = Utc::now().timestamp_millis().max(0) as Timestamp;
    let mut out = String::new();

    for (index, entry) in file.moves.iter().enumerate() {
        let from: Position = entry.from.parse()?;
        let to: Position = entry.to.parse()?;
        let timestamp = entry.timestamp.unwrap_or(base + index as Timestamp);

        match session.submit_move(entry.player, from, to, timestamp) {
            Ok(accepted) => {
                if wire {
                    let published = SyncMessage::MovePublished {
                        session_id: session.id(),
                        mv: accepted.mv,
                    };
                    let _ = writeln!(out, "{}", published.to_json()?);
                }
                if let Some(event) = accepted.event {
                    let _ = writeln!(out, "#{} {}->{}: {}", index + 1, from, to, event.message());
                    if wire {
                        let ended = SyncMessage::GameEnded {
                            session_id: session.id(),
                            event,
                        };
                        let _ = writeln!(out, "{}", ended.to_json()?);
                    }
                }
            }
            Err(e) => {
                warn!("[REPLAY] Move #{} {}->{} rejected: {}", index + 1, from, to, e);
                let _ = writeln!(out, "#{} {}->{} rejected: {}", index + 1, from, to, e);
                if wire {
                    let rejected = SyncMessage::rejection(session.id(), &e);
                    let _ = writeln!(out, "{}", rejected.to_json()?);
                }
            }
        }
    }

    let state = session.state();
    out.push('\n');
    out.push_str(&render_board(&state.board, notation));
    out.push('\n');
    out.push_str(&describe_state(&state));
    let _ = writeln!(out, "fen:     {}", state.to_fen(notation));
    Ok(out)
}

/// Print the settings file, or overwrite it with defaults
pub fn config(path: &Path, reset: bool) -> CliResult<String> {
    let settings = if reset {
        let defaults = Settings::default();
        save_settings(path, &defaults)?;
        defaults
    } else {
        read_settings(path)?
    };
    let mut out = format!("# {}\n", path.display());
    out.push_str(&serde_json::to_string_pretty(&settings)?);
    out.push('\n');
    Ok(out)
}
