//! # Gameshelf
//!
//! Typed client core for the Gameshelf game-library backend.
//!
//! Every call goes through one pipeline: the stored credential is attached,
//! the request is sent, and any failure (server error, dropped connection,
//! unreadable body) comes back as a single [`ApiError`]. A rejected
//! credential clears the session and publishes a [`SessionEvent`] the
//! application can react to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gameshelf::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::builder()
//!     .config(ClientConfig::from_env()?)
//!     .build()?;
//!
//! client.auth().login("alice", "secret").await?;
//! for game in client.games().list().await? {
//!     println!("{} ({:?})", game.name, game.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod config;
mod error;
pub mod games;
pub mod logging;
pub mod pipeline;
pub mod users;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use error::{
    ApiError, Failure, GENERIC_FAILURE_MESSAGE, MALFORMED_RESPONSE_MESSAGE,
    NETWORK_FAILURE_MESSAGE,
};

pub use gameshelf_protocol as protocol;
pub use gameshelf_session as session;
pub use gameshelf_transport as transport;

pub use gameshelf_session::{CredentialStore, SessionEvent};

pub mod prelude {
    pub use crate::{ApiClient, ApiClientBuilder, ApiError, ClientConfig};
    pub use gameshelf_protocol::{
        Game, GameId, GameSource, GameStatus, GameUpdate, NewGame, NewUser,
        User, UserId, UserUpdate,
    };
    pub use gameshelf_session::{
        CredentialStore, CredentialToken, FileTokenStorage, SessionEvent,
    };
    pub use gameshelf_transport::{ReqwestTransport, Transport};
}
