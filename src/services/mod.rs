// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod credentials;
pub mod session;

pub use session::{SessionError, SessionManager, SessionPhase, SessionSnapshot};
