//! One side of a two-peer game
//!
//! A peer seats a single local player and holds a full replica of the
//! session. Local moves go through [`Peer::submit`], which returns the move to
//! publish; moves from the other side arrive through [`Peer::receive`].

use super::session::GameSession;
use crate::error::EngineResult;
use crate::history::{GameState, Move};
use crate::types::*;
use tracing::debug;

/// The local player's previous submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastSubmission {
    from: Position,
    to: Position,
    timestamp: Timestamp,
}

/// Local player plus a session replica
#[derive(Debug, Clone)]
pub struct Peer {
    player: Player,
    session: GameSession,
    last: Option<LastSubmission>,
}

impl Peer {
    pub fn new(player: Player, session: GameSession) -> Self {
        Self {
            player,
            session,
            last: None,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> GameState {
        self.session.state()
    }

    /// Submit a local move
    ///
    /// Returns `Ok(None)` when the same `(from, to)` was submitted less than
    /// `dedup_window_ms` earlier; nothing is logged or published.
    ///
    /// # Errors
    ///
    /// Any rejection from [`GameSession::submit_move`].
    pub fn submit(
        &mut self,
        from: Position,
        to: Position,
        timestamp: Timestamp,
    ) -> EngineResult<Option<Move>> {
        let window = self.session.config().dedup_window_ms;
        if let Some(last) = self.last {
            if last.from == from
                && last.to == to
                && timestamp.saturating_sub(last.timestamp) < window
            {
                debug!(
                    "[PEER] {} dropped repeated {}->{} within {}ms",
                    self.player, from, to, window
                );
                return Ok(None);
            }
        }

        let accepted = self.session.submit_move(self.player, from, to, timestamp)?;
        self.last = Some(LastSubmission {
            from,
            to,
            timestamp,
        });
        Ok(Some(accepted.mv))
    }

    /// Merge a move published by the other peer
    pub fn receive(&mut self, mv: Move) -> bool {
        self.session.receive_move(mv)
    }
}
