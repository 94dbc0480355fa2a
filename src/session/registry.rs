//! In-memory routing from players to their matches.
//!
//! The registry owns every live `GameEngine` and keeps a player → match index
//! so each incoming action resolves its engine in O(1). It is a plain
//! single-owner value: a server sharing it between connections wraps it in
//! whatever lock or actor it already uses, which also gives every engine the
//! single-writer access it needs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::{Action, ActionError, ConfigError, GameConfig, PlayerId, PlayerInfo};
use crate::rules::{GameEngine, GameResult, Outcome, Snapshot};

/// Identifier of one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match {}", self.0)
    }
}

/// Registry-level failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0} is not in any match")]
    NoMatch(PlayerId),

    #[error("{0} is already playing in another match")]
    AlreadySeated(PlayerId),

    #[error(transparent)]
    Setup(#[from] ConfigError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// A player left; their match is gone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    pub match_id: MatchId,
    /// The participant still connected, to be told the match ended.
    pub remaining: PlayerId,
    /// Final state, with the abandoned game closed out.
    pub snapshot: Snapshot,
}

/// Live matches keyed by id, plus a player index.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    config: GameConfig,
    matches: FxHashMap<MatchId, GameEngine>,
    seats: FxHashMap<PlayerId, MatchId>,
    next_id: u64,
}

impl MatchRegistry {
    /// Registry creating matches under the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry creating matches under `config`.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Match `player` is seated in.
    #[must_use]
    pub fn match_of(&self, player: PlayerId) -> Option<MatchId> {
        self.seats.get(&player).copied()
    }

    #[must_use]
    pub fn engine(&self, id: MatchId) -> Option<&GameEngine> {
        self.matches.get(&id)
    }

    #[must_use]
    pub fn snapshot(&self, id: MatchId) -> Option<Snapshot> {
        self.matches.get(&id).map(GameEngine::snapshot)
    }

    /// Seat two matched players. `a` plays White and opens.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadySeated`] if either player is in a live match,
    /// [`SessionError::Setup`] if they are the same player.
    #[instrument(skip(self), fields(a = %a.id, b = %b.id))]
    pub fn create_match(&mut self, a: PlayerInfo, b: PlayerInfo) -> Result<MatchId, SessionError> {
        for id in [a.id, b.id] {
            if self.seats.contains_key(&id) {
                return Err(SessionError::AlreadySeated(id));
            }
        }

        let (a_id, b_id) = (a.id, b.id);
        let engine = GameEngine::with_config(self.config.clone(), a, b)?;

        let id = MatchId(self.next_id);
        self.next_id += 1;
        self.matches.insert(id, engine);
        self.seats.insert(a_id, id);
        self.seats.insert(b_id, id);

        info!(match_id = %id, live = self.matches.len(), "match created");
        Ok(id)
    }

    /// Route an action to `player`'s match.
    ///
    /// On success the caller broadcasts the returned match's snapshot to
    /// both participants; on error it tells only `player`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoMatch`] for an unseated player, otherwise the
    /// engine's rejection.
    pub fn handle_action(&mut self, player: PlayerId, action: Action) -> Result<(MatchId, Outcome), SessionError> {
        let (id, engine) = self.engine_of(player)?;
        let outcome = engine.handle_action(player, action)?;
        Ok((id, outcome))
    }

    /// Restart `player`'s match after its game ended.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoMatch`] or [`ActionError::StillActive`].
    #[instrument(skip(self))]
    pub fn restart(&mut self, player: PlayerId) -> Result<MatchId, SessionError> {
        let (id, engine) = self.engine_of(player)?;
        engine.restart()?;
        Ok(id)
    }

    /// Concede the running game on behalf of `player`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoMatch`] or [`ActionError::GameOver`].
    pub fn resign(&mut self, player: PlayerId) -> Result<(MatchId, GameResult), SessionError> {
        let (id, engine) = self.engine_of(player)?;
        let result = engine.resign(player)?;
        Ok((id, result))
    }

    /// Tear down `player`'s match after they disconnect. A running game is
    /// abandoned without a winner. Returns `None` if they held no seat.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, player: PlayerId) -> Option<Departure> {
        let id = self.seats.remove(&player)?;
        let Some(mut engine) = self.matches.remove(&id) else {
            debug!(match_id = %id, "stale seat without a match");
            return None;
        };

        engine.abandon();
        let remaining = engine
            .players()
            .iter()
            .map(|(_, rec)| rec.id)
            .find(|&other| other != player)
            .unwrap_or(player);
        self.seats.remove(&remaining);

        info!(match_id = %id, %remaining, live = self.matches.len(), "match closed");
        Some(Departure {
            match_id: id,
            remaining,
            snapshot: engine.snapshot(),
        })
    }

    fn engine_of(&mut self, player: PlayerId) -> Result<(MatchId, &mut GameEngine), SessionError> {
        let id = self.match_of(player).ok_or(SessionError::NoMatch(player))?;
        self.matches
            .get_mut(&id)
            .map(|engine| (id, engine))
            .ok_or(SessionError::NoMatch(player))
    }
}
