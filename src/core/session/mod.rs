//! Authentication session lifecycle
//!
//! - [`state`] - Session data, states, snapshots and events
//! - [`store`] - Persistence of the three session entries
//! - [`timer`] - Cancellable expiry timer
//! - [`manager`] - The [`SessionManager`] state machine

pub mod manager;
pub mod state;
pub mod store;
pub mod timer;

pub use manager::SessionManager;
pub use state::{LogoutReason, Session, SessionEvent, SessionSnapshot, SessionState};
pub use store::{SessionStore, StoredSession};
pub use timer::ExpiryTimer;
