// src/session/mod.rs
// Session state: records, storage and per-session locking

pub mod locks;
pub mod store;
pub mod types;

pub use locks::SessionLocks;
pub use store::{InMemorySessionStore, SessionStore};
pub use types::{
    ClientInfo, Message, ReportTier, Role, Scores, Session, SessionPatch, SessionStatus,
    QUESTION_COUNT,
};
