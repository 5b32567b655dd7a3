//! Sync protocol between two peers
//!
//! Every message names the session it belongs to. Moves travel as complete
//! [`Move`] records (id and timestamp included) so the receiver can merge
//! them into its log idempotently, in any order.
//!
//! Messages are plain serde enums; [`SyncMessage::to_json`] and
//! [`SyncMessage::from_json`] are the text encoding used on the wire.

use senterej_engine::{
    EngineError, GameSession, Move, Player, PlayerInfo, SessionStore, TerminalEvent,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors raised while decoding or applying a message
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Peer-to-peer message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum SyncMessage {
    /// Full snapshot of a newly created session
    SessionOpened { session: GameSession },
    PlayerJoined { session_id: Uuid, player: PlayerInfo },
    MovePublished { session_id: Uuid, mv: Move },
    /// A local submission failed; `reason` is [`EngineError::reason_code`]
    MoveRejected {
        session_id: Uuid,
        reason: String,
        message: String,
    },
    Resigned { session_id: Uuid, player: Player },
    TimedOut { session_id: Uuid, player: Player },
    GameEnded { session_id: Uuid, event: TerminalEvent },
    RematchRequested { session_id: Uuid },
}

impl SyncMessage {
    /// Rejection notice for a failed submission
    pub fn rejection(session_id: Uuid, error: &EngineError) -> Self {
        SyncMessage::MoveRejected {
            session_id,
            reason: error.reason_code().to_string(),
            message: error.to_string(),
        }
    }

    /// Session the message refers to
    pub fn session_id(&self) -> Uuid {
        match self {
            SyncMessage::SessionOpened { session } => session.id(),
            SyncMessage::PlayerJoined { session_id, .. }
            | SyncMessage::MovePublished { session_id, .. }
            | SyncMessage::MoveRejected { session_id, .. }
            | SyncMessage::Resigned { session_id, .. }
            | SyncMessage::TimedOut { session_id, .. }
            | SyncMessage::GameEnded { session_id, .. }
            | SyncMessage::RematchRequested { session_id } => *session_id,
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Apply an inbound message to `store`
///
/// Returns the message to send back, if any: the terminal event after a
/// resignation, timeout or game-ending move, and the new session after a
/// rematch request.
///
/// # Errors
///
/// Engine errors from the addressed session, e.g. an unknown session id.
pub fn dispatch(
    store: &mut SessionStore,
    message: SyncMessage,
) -> Result<Option<SyncMessage>, ProtocolError> {
    let session_id = message.session_id();

    match message {
        SyncMessage::SessionOpened { session } => {
            info!("[SYNC] Adopting session {}", session_id);
            store.adopt(session);
            Ok(None)
        }
        SyncMessage::PlayerJoined { player, .. } => {
            store.join_session(session_id, player)?;
            Ok(None)
        }
        SyncMessage::MovePublished { mv, .. } => {
            let before = store.current_game_state(session_id)?.outcome;
            if !store.receive_move(session_id, mv)? {
                debug!("[SYNC] Duplicate move for {}", session_id);
                return Ok(None);
            }
            let after = store.current_game_state(session_id)?.outcome;
            Ok(match (before, after) {
                (None, Some(event)) => Some(SyncMessage::GameEnded { session_id, event }),
                _ => None,
            })
        }
        SyncMessage::MoveRejected { reason, message, .. } => {
            warn!("[SYNC] Peer rejected move in {}: {} ({})", session_id, message, reason);
            Ok(None)
        }
        SyncMessage::Resigned { player, .. } => {
            let event = store.resign(session_id, player)?;
            Ok(Some(SyncMessage::GameEnded { session_id, event }))
        }
        SyncMessage::TimedOut { player, .. } => {
            let event = store.time_out(session_id, player)?;
            Ok(Some(SyncMessage::GameEnded { session_id, event }))
        }
        SyncMessage::GameEnded { event, .. } => {
            info!("[SYNC] Session {} ended: {}", session_id, event.message());
            Ok(None)
        }
        SyncMessage::RematchRequested { .. } => {
            let rematch = store.request_rematch(session_id)?;
            let session = store.get(rematch)?.clone();
            Ok(Some(SyncMessage::SessionOpened { session }))
        }
    }
}
