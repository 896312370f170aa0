//! Wire protocol for the Gameshelf backend API.
//!
//! This crate defines the "language" the client and backend speak:
//!
//! - **Types** ([`Game`], [`User`], the request DTOs, identifiers) —
//!   the JSON shapes that travel on the wire.
//! - **Error bodies** ([`ErrorBody`]) — what the backend says when a
//!   request fails, read leniently.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those values are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits above transport (raw bytes) and below the
//! client (typed operations). It doesn't know about connections or
//! credentials — it only knows how to serialize and deserialize.
//!
//! ```text
//! Transport (bytes) → Protocol (Game, User, ErrorBody) → Client (operations)
//! ```

mod codec;
mod error;
mod error_body;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use error_body::{ErrorBody, FieldErrors};
pub use types::{
    Game, GameId, GameSource, GameStatus, GameUpdate, NewGame, NewUser, User,
    UserId, UserUpdate,
};
