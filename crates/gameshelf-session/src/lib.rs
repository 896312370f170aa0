//! Credential handling for Gameshelf.
//!
//! This crate owns everything about "who is signed in":
//!
//! 1. **Tokens** — encoding a username/password pair into a Basic
//!    credential ([`CredentialToken`])
//! 2. **Storage** — the single-slot store the request pipeline reads
//!    before every dispatch ([`CredentialStore`]), optionally mirrored to
//!    durable storage ([`TokenStorage`], [`FileTokenStorage`])
//! 3. **Signals** — telling the application when the server has rejected
//!    the credential ([`SessionEvent`], [`SessionSignals`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Client (above)  ← attaches the token, clears it on 401, emits events
//!     ↕
//! Session Layer (this crate)  ← holds the token and the event channel
//! ```

mod error;
mod event;
mod storage;
mod store;
mod token;

pub use error::SessionError;
pub use event::{SessionEvent, SessionSignals};
pub use storage::{FileTokenStorage, TOKEN_KEY, TokenStorage};
pub use store::CredentialStore;
pub use token::CredentialToken;
