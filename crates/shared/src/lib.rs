//! Messages peers exchange to keep their session replicas in sync

pub mod protocol;

pub use protocol::{dispatch, ProtocolError, SyncMessage};
