//! A single game between two seated players
//!
//! A session owns the starting position and the move log. Everything else
//! (board, phase, turn, outcome) is derived by replaying the log, so two
//! sessions holding the same log always agree.
//!
//! # Submission pipeline
//!
//! ```text
//! seats filled? ─▶ game over? ─▶ turn gate ─▶ timestamp order ─▶ legality ─▶ log
//! ```
//!
//! A rejected submission never reaches the log.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, IllegalReason};
use crate::fen::{FenPosition, Notation};
use crate::history::{replay_with, GameState, Move, MoveLog, StartPosition};
use crate::move_gen::is_legal_move;
use crate::phase::{Phase, PhaseController};
use crate::rules::{leaves_king_in_check, TerminalEvent, TerminalReason};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A seated participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Seats of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub white: Option<PlayerInfo>,
    pub black: Option<PlayerInfo>,
}

impl Players {
    pub fn new(white: PlayerInfo, black: PlayerInfo) -> Self {
        Self {
            white: Some(white),
            black: Some(black),
        }
    }

    pub fn get(&self, player: Player) -> Option<&PlayerInfo> {
        match player {
            Player::White => self.white.as_ref(),
            Player::Black => self.black.as_ref(),
        }
    }

    /// Colour seated by the participant with `id`
    pub fn seat_of(&self, id: Uuid) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&p| self.get(p).is_some_and(|info| info.id == id))
    }

    pub fn is_full(&self) -> bool {
        self.white.is_some() && self.black.is_some()
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// One seat still empty
    Waiting,
    Active,
    Complete(TerminalReason),
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Waiting => f.write_str("waiting"),
            SessionStatus::Active => f.write_str("active"),
            SessionStatus::Complete(reason) => write!(f, "complete({reason})"),
        }
    }
}

/// Outcome of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAccepted {
    /// The logged move, ready to publish to the other peer
    pub mv: Move,
    pub phase: Phase,
    pub current_turn: Player,
    /// Terminal event produced by this move, if it ended the game
    pub event: Option<TerminalEvent>,
}

/// One game: seats, start position and move log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    id: Uuid,
    variant: Variant,
    players: Players,
    start: StartPosition,
    log: MoveLog,
    /// Resignation or timeout
    resolution: Option<TerminalEvent>,
    #[serde(default)]
    config: EngineConfig,
}

impl GameSession {
    /// Active session with both seats filled, from the variant's opening setup
    pub fn new(variant: Variant, white: PlayerInfo, black: PlayerInfo) -> Self {
        Self::with_start(variant, Players::new(white, black), StartPosition::initial(variant))
    }

    /// Waiting session; the host takes White
    pub fn open(variant: Variant, host: PlayerInfo) -> Self {
        let players = Players {
            white: Some(host),
            black: None,
        };
        Self::with_start(variant, players, StartPosition::initial(variant))
    }

    /// Session starting from a FEN position, variant inferred from the text
    ///
    /// # Errors
    ///
    /// [`EngineError::Fen`] when the text does not decode.
    pub fn from_fen(text: &str, players: Players) -> EngineResult<Self> {
        let fen = FenPosition::parse(text)?;
        Ok(Self::with_start(fen.variant(), players, StartPosition::from(&fen)))
    }

    /// Session starting from a FEN position under an explicit variant
    ///
    /// A `werera` phase is dropped to `normal` for standard chess.
    pub fn from_fen_as(text: &str, variant: Variant, players: Players) -> EngineResult<Self> {
        let fen = FenPosition::parse(text)?;
        let mut start = StartPosition::from(&fen);
        if !variant.has_werera() && start.phase == Phase::Werera {
            start.phase = Phase::Normal;
        }
        Ok(Self::with_start(variant, players, start))
    }

    fn with_start(variant: Variant, players: Players, start: StartPosition) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            variant,
            players,
            start,
            log: MoveLog::new(),
            resolution: None,
            config: EngineConfig::default(),
        };
        info!(
            "[SESSION] Created {} session {} ({})",
            variant,
            session.id,
            session.status()
        );
        session
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn start(&self) -> &StartPosition {
        &self.start
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Take the free seat
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionFull`] when both seats are taken.
    pub fn join(&mut self, info: PlayerInfo) -> EngineResult<Player> {
        let seat = if self.players.white.is_none() {
            Player::White
        } else if self.players.black.is_none() {
            Player::Black
        } else {
            warn!("[SESSION] {} tried to join full session {}", info.name, self.id);
            return Err(EngineError::SessionFull);
        };

        info!("[SESSION] {} joined {} as {}", info.name, self.id, seat);
        match seat {
            Player::White => self.players.white = Some(info),
            Player::Black => self.players.black = Some(info),
        }
        Ok(seat)
    }

    /// Derived game state: replay of the log plus any resignation or timeout
    pub fn state(&self) -> GameState {
        let mut state = replay_with(&self.start, self.log.moves(), self.variant, &self.config);
        if let Some(event) = self.resolution {
            state.conclude(event);
        }
        state
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn current_turn(&self) -> Player {
        self.state().current_player
    }

    pub fn status(&self) -> SessionStatus {
        if !self.players.is_full() {
            return SessionStatus::Waiting;
        }
        match self.state().phase {
            Phase::Complete(reason) => SessionStatus::Complete(reason),
            _ => SessionStatus::Active,
        }
    }

    /// Validate a local move and append it to the log
    ///
    /// # Errors
    ///
    /// - [`EngineError::WaitingForOpponent`] before both seats are filled
    /// - [`EngineError::SessionComplete`] once the game is over
    /// - [`EngineError::NotYourTurn`] in Normal phase out of turn
    /// - [`EngineError::StaleTimestamp`] in Normal phase when `timestamp` is
    ///   not later than the newest logged move
    /// - [`EngineError::IllegalMove`] when the move breaks the movement rules
    pub fn submit_move(
        &mut self,
        player: Player,
        from: Position,
        to: Position,
        timestamp: Timestamp,
    ) -> EngineResult<MoveAccepted> {
        if !self.players.is_full() {
            return Err(EngineError::WaitingForOpponent);
        }

        let before = self.state();
        PhaseController::resume(before.phase, before.current_player).check_submission(player)?;

        if before.phase == Phase::Normal {
            if let Some(latest) = self.log.latest_timestamp() {
                if timestamp <= latest {
                    return Err(EngineError::StaleTimestamp {
                        claimed: timestamp,
                        latest,
                    });
                }
            }
        }

        let piece = self.validate(&before, player, from, to)?;
        let mv = Move::new(
            player,
            piece.kind,
            from,
            to,
            before.board.get(to).map(|p| p.kind),
            timestamp,
        );
        self.log.insert(mv.clone());

        let after = self.state();
        if after.skipped.contains(&mv.id) {
            // Ordered before moves that invalidate it; kept for convergence
            warn!("[SESSION] {} was logged but cannot apply in canonical order", mv);
        }
        debug!("[SESSION] {} accepted {}", self.id, mv);

        let event = if before.outcome.is_none() { after.outcome } else { None };
        if let Some(event) = event {
            info!("[SESSION] {} ended: {}", self.id, event.message());
        }

        Ok(MoveAccepted {
            mv,
            phase: after.phase,
            current_turn: after.current_player,
            event,
        })
    }

    /// Movement and self-check rules against the current board
    fn validate(
        &self,
        state: &GameState,
        player: Player,
        from: Position,
        to: Position,
    ) -> EngineResult<Piece> {
        let illegal = |reason| EngineError::IllegalMove { from, to, reason };

        let piece = state.board.get(from).ok_or(illegal(IllegalReason::NoPiece))?;
        if piece.owner != player {
            return Err(illegal(IllegalReason::NotYourPiece));
        }
        if !is_legal_move(&state.board, from, to, self.variant) {
            return Err(illegal(IllegalReason::NotInLegalSet));
        }

        let guard_self_check =
            state.phase != Phase::Werera || !self.config.allow_self_check_in_werera;
        if guard_self_check && leaves_king_in_check(&state.board, from, to, self.variant) {
            return Err(illegal(IllegalReason::LeavesKingInCheck));
        }

        Ok(piece)
    }

    /// Merge a move published by the other peer
    ///
    /// Returns `false` when the move was already known.
    pub fn receive_move(&mut self, mv: Move) -> bool {
        let description = mv.to_string();
        let inserted = self.log.insert(mv);
        if inserted {
            debug!("[SESSION] {} merged remote move {}", self.id, description);
        }
        inserted
    }

    /// `player` resigns
    pub fn resign(&mut self, player: Player) -> EngineResult<TerminalEvent> {
        self.conclude(TerminalEvent::resignation(player))
    }

    /// `player` ran out of time
    pub fn time_out(&mut self, player: Player) -> EngineResult<TerminalEvent> {
        self.conclude(TerminalEvent::timeout(player))
    }

    fn conclude(&mut self, event: TerminalEvent) -> EngineResult<TerminalEvent> {
        if let Phase::Complete(reason) = self.state().phase {
            return Err(EngineError::SessionComplete { reason });
        }
        info!("[SESSION] {} ended: {}", self.id, event.message());
        self.resolution = Some(event);
        Ok(event)
    }

    /// Current position as a FEN line
    pub fn export_fen(&self, notation: Notation) -> String {
        self.state().to_fen(notation)
    }

    /// Fresh session for the same pair with colours swapped
    pub fn rematch(&self) -> Self {
        let players = Players {
            white: self.players.black.clone(),
            black: self.players.white.clone(),
        };
        Self::with_start(self.variant, players, StartPosition::initial(self.variant))
            .with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SENTEREJ_START_FEN;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn senterej() -> GameSession {
        GameSession::new(Variant::Senterej, PlayerInfo::new("Alice"), PlayerInfo::new("Bekele"))
    }

    #[test]
    fn test_werera_first_pawn_push() {
        let mut session = senterej();
        let accepted = session
            .submit_move(Player::White, pos(6, 0), pos(5, 0), 1_000)
            .unwrap();

        assert_eq!(accepted.phase, Phase::Werera);
        assert_eq!(accepted.event, None);
        assert_eq!(session.log().len(), 1);
        assert_eq!(
            session.state().board.get(pos(5, 0)),
            Some(Piece {
                kind: PieceKind::Pawn,
                owner: Player::White,
                has_moved: true
            })
        );
    }

    #[test]
    fn test_werera_allows_consecutive_moves_by_one_side() {
        let mut session = senterej();
        session.submit_move(Player::Black, pos(1, 0), pos(2, 0), 10).unwrap();
        session.submit_move(Player::Black, pos(1, 1), pos(2, 1), 20).unwrap();
        session.submit_move(Player::White, pos(6, 0), pos(5, 0), 15).unwrap();
        assert_eq!(session.phase(), Phase::Werera);
        assert_eq!(session.log().len(), 3);
    }

    #[test]
    fn test_werera_capture_passes_turn_to_other_side() {
        let mut session = senterej();
        session.submit_move(Player::White, pos(6, 4), pos(5, 4), 10).unwrap();
        session.submit_move(Player::White, pos(5, 4), pos(4, 4), 20).unwrap();
        session.submit_move(Player::Black, pos(1, 3), pos(2, 3), 30).unwrap();
        session.submit_move(Player::Black, pos(2, 3), pos(3, 3), 40).unwrap();

        let accepted = session
            .submit_move(Player::White, pos(4, 4), pos(3, 3), 50)
            .unwrap();
        assert_eq!(accepted.phase, Phase::Normal);
        assert_eq!(accepted.current_turn, Player::Black);
        assert_eq!(accepted.mv.captured, Some(PieceKind::Pawn));

        let err = session
            .submit_move(Player::White, pos(6, 0), pos(5, 0), 60)
            .unwrap_err();
        assert_eq!(err, EngineError::NotYourTurn { player: Player::White });
    }

    #[test]
    fn test_normal_phase_rejects_stale_timestamp() {
        let mut session = GameSession::new(
            Variant::Standard,
            PlayerInfo::new("a"),
            PlayerInfo::new("b"),
        );
        session.submit_move(Player::White, pos(6, 4), pos(5, 4), 100).unwrap();

        let err = session
            .submit_move(Player::Black, pos(1, 4), pos(2, 4), 100)
            .unwrap_err();
        assert_eq!(err, EngineError::StaleTimestamp { claimed: 100, latest: 100 });
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_illegal_reasons() {
        let mut session = senterej();
        let cases = [
            (pos(4, 4), pos(3, 4), IllegalReason::NoPiece),
            (pos(1, 0), pos(2, 0), IllegalReason::NotYourPiece),
            (pos(6, 0), pos(4, 0), IllegalReason::NotInLegalSet),
        ];
        for (from, to, reason) in cases {
            let err = session.submit_move(Player::White, from, to, 5).unwrap_err();
            assert_eq!(err, EngineError::IllegalMove { from, to, reason });
        }
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_self_check_rejected_in_normal_phase() {
        //! The White rook is pinned against its king by the Black rook.
        let fen = "4k3/8/8/8/4r3/8/4R3/4K3 w normal 0";
        let players = Players::new(PlayerInfo::new("a"), PlayerInfo::new("b"));
        let mut session = GameSession::from_fen(fen, players).unwrap();
        assert_eq!(session.variant(), Variant::Standard);

        let err = session
            .submit_move(Player::White, pos(6, 4), pos(6, 0), 1)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove {
                from: pos(6, 4),
                to: pos(6, 0),
                reason: IllegalReason::LeavesKingInCheck
            }
        );
    }

    #[test]
    fn test_werera_position_with_only_self_check_moves_is_live() {
        //! Black's negus can only step into the der's file or next to the
        //! White negus, and its medeq is blocked. Werera accepts those steps.
        let fen = "n7/8/N7/8/4m3/4M3/8/1D6 b werera 0";
        let players = Players::new(PlayerInfo::new("a"), PlayerInfo::new("b"));
        let mut session = GameSession::from_fen(fen, players.clone()).unwrap();
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.phase(), Phase::Werera);

        let accepted = session.submit_move(Player::Black, pos(0, 0), pos(0, 1), 1).unwrap();
        assert_eq!(accepted.event, None);
        assert_eq!(accepted.phase, Phase::Werera);

        let strict = GameSession::from_fen(fen, players).unwrap().with_config(EngineConfig {
            allow_self_check_in_werera: false,
            ..EngineConfig::default()
        });
        assert_eq!(strict.status(), SessionStatus::Complete(TerminalReason::Stalemate));
        assert_eq!(strict.state().winner, Some(Player::White));
    }

    #[test]
    fn test_waiting_session_and_join() {
        let mut session = GameSession::open(Variant::Senterej, PlayerInfo::new("host"));
        assert_eq!(session.status(), SessionStatus::Waiting);
        assert_eq!(
            session.submit_move(Player::White, pos(6, 0), pos(5, 0), 1),
            Err(EngineError::WaitingForOpponent)
        );

        assert_eq!(session.join(PlayerInfo::new("guest")), Ok(Player::Black));
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(
            session.join(PlayerInfo::new("late")),
            Err(EngineError::SessionFull)
        );
    }

    #[test]
    fn test_bare_king_completes_session() {
        let fen = "4n3/8/8/8/8/8/4D3/4N3 w normal 0";
        let players = Players::new(PlayerInfo::new("a"), PlayerInfo::new("b"));
        let mut session = GameSession::from_fen(fen, players).unwrap();

        assert_eq!(session.variant(), Variant::Senterej);
        assert_eq!(session.status(), SessionStatus::Complete(TerminalReason::BareKing));
        assert_eq!(session.state().winner, Some(Player::White));
        assert_eq!(
            session.submit_move(Player::White, pos(6, 4), pos(5, 4), 1),
            Err(EngineError::SessionComplete { reason: TerminalReason::BareKing })
        );
    }

    #[test]
    fn test_resign_and_timeout() {
        let mut session = senterej();
        let event = session.resign(Player::Black).unwrap();
        assert_eq!(event.winner, Some(Player::White));
        assert_eq!(session.status(), SessionStatus::Complete(TerminalReason::Resignation));
        assert_eq!(
            session.time_out(Player::White),
            Err(EngineError::SessionComplete { reason: TerminalReason::Resignation })
        );
    }

    #[test]
    fn test_receive_move_is_idempotent() {
        let mut local = senterej();
        let mut remote = local.clone();
        let accepted = local.submit_move(Player::White, pos(6, 0), pos(5, 0), 1).unwrap();

        assert!(remote.receive_move(accepted.mv.clone()));
        assert!(!remote.receive_move(accepted.mv));
        assert_eq!(remote.state(), local.state());
    }

    #[test]
    fn test_export_fen_and_rematch() {
        let session = senterej();
        assert_eq!(session.export_fen(Notation::Senterej), SENTEREJ_START_FEN);

        let rematch = session.rematch();
        assert_ne!(rematch.id(), session.id());
        assert_eq!(rematch.players().white, session.players().black);
        assert_eq!(rematch.players().black, session.players().white);
    }
}
