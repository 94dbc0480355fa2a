//! Routing layer between connections and engines.
//!
//! Transport, room codes and broadcasting live outside this crate; this
//! module only maps player identities to the match they play in.

pub mod registry;

pub use registry::{Departure, MatchId, MatchRegistry, SessionError};
