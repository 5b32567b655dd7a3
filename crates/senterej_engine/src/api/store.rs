//! In-memory registry of game sessions keyed by id
//!
//! Every operation addresses a session by its `Uuid`; an id the store has
//! never seen yields [`EngineError::UnknownSession`].

use super::session::{GameSession, MoveAccepted, PlayerInfo, Players};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::fen::Notation;
use crate::history::{GameState, Move};
use crate::rules::TerminalEvent;
use crate::types::*;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// All sessions known to this process
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, GameSession>,
    config: EngineConfig,
}

impl SessionStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    fn insert(&mut self, session: GameSession) -> Uuid {
        let id = session.id();
        self.sessions.insert(id, session.with_config(self.config));
        id
    }

    pub fn get(&self, id: Uuid) -> EngineResult<&GameSession> {
        self.sessions.get(&id).ok_or(EngineError::UnknownSession(id))
    }

    fn get_mut(&mut self, id: Uuid) -> EngineResult<&mut GameSession> {
        self.sessions
            .get_mut(&id)
            .ok_or(EngineError::UnknownSession(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Active session with both seats filled
    pub fn create_session(&mut self, variant: Variant, white: PlayerInfo, black: PlayerInfo) -> Uuid {
        self.insert(GameSession::new(variant, white, black))
    }

    /// Waiting session hosted by `host`
    pub fn open_session(&mut self, variant: Variant, host: PlayerInfo) -> Uuid {
        self.insert(GameSession::open(variant, host))
    }

    /// Adopt a session created elsewhere, e.g. announced by a remote peer
    pub fn adopt(&mut self, session: GameSession) -> Uuid {
        let id = session.id();
        self.sessions.insert(id, session);
        id
    }

    pub fn join_session(&mut self, id: Uuid, info: PlayerInfo) -> EngineResult<Player> {
        self.get_mut(id)?.join(info)
    }

    pub fn submit_move(
        &mut self,
        id: Uuid,
        player: Player,
        from: Position,
        to: Position,
        timestamp: Timestamp,
    ) -> EngineResult<MoveAccepted> {
        self.get_mut(id)?.submit_move(player, from, to, timestamp)
    }

    pub fn receive_move(&mut self, id: Uuid, mv: Move) -> EngineResult<bool> {
        Ok(self.get_mut(id)?.receive_move(mv))
    }

    /// New session starting from a FEN position
    ///
    /// Without a `variant` the ruleset is inferred from the text. Shared
    /// letters in `normal` phase read as standard chess, so a Senterej game
    /// exported after Werera must be re-imported with `Some(Variant::Senterej)`.
    pub fn import_fen(
        &mut self,
        text: &str,
        variant: Option<Variant>,
        players: Players,
    ) -> EngineResult<Uuid> {
        let session = match variant {
            Some(variant) => GameSession::from_fen_as(text, variant, players)?,
            None => GameSession::from_fen(text, players)?,
        };
        Ok(self.insert(session))
    }

    pub fn export_fen(&self, id: Uuid, notation: Notation) -> EngineResult<String> {
        Ok(self.get(id)?.export_fen(notation))
    }

    pub fn current_game_state(&self, id: Uuid) -> EngineResult<GameState> {
        Ok(self.get(id)?.state())
    }

    /// New session for the same players with colours swapped
    pub fn request_rematch(&mut self, id: Uuid) -> EngineResult<Uuid> {
        let rematch = self.get(id)?.rematch();
        info!("[SESSION] Rematch of {} opened as {}", id, rematch.id());
        Ok(self.insert(rematch))
    }

    pub fn resign(&mut self, id: Uuid, player: Player) -> EngineResult<TerminalEvent> {
        self.get_mut(id)?.resign(player)
    }

    pub fn time_out(&mut self, id: Uuid, player: Player) -> EngineResult<TerminalEvent> {
        self.get_mut(id)?.time_out(player)
    }
}
