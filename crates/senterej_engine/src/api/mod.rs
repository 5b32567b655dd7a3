//! Public session API
//!
//! ## Module Organization
//!
//! - `session` - One game: seats, start position, move log and submission gate
//! - `store` - Sessions keyed by id, the surface a transport layer drives
//! - `peer` - A single seated player holding a session replica

mod peer;
mod session;
mod store;

pub use peer::Peer;
pub use session::{GameSession, MoveAccepted, PlayerInfo, Players, SessionStatus};
pub use store::SessionStore;
