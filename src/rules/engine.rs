//! Rules engine trait: the synchronous boundary used by transports and
//! strategies.
//!
//! One cycle is always `get_list_action` → choose → `apply_action`. The
//! caller must re-fetch the action list after every `apply_action`.

use crate::core::action::Action;
use crate::core::player::{PlayerId, Team};
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// The partnership that brought all eight marbles home.
    pub team: Team,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.team.contains(player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `get_list_action`: Return empty if the active seat can't act; the
///   caller answers with `apply_action(None)`
/// - `apply_action`: A refused action must leave the state unchanged
/// - `set_state`: Bypasses validation entirely
pub trait RulesEngine {
    /// The authoritative state.
    fn get_state(&self) -> &GameState;

    /// Replace the state wholesale (reconnection, replay).
    fn set_state(&mut self, state: GameState);

    /// The state as seen by one seat.
    fn get_player_view(&self, player: PlayerId) -> GameState;

    /// All legal actions for whoever is to act.
    fn get_list_action(&self) -> Vec<Action>;

    /// Apply a chosen action, or `None` for "no action".
    fn apply_action(&mut self, action: Option<&Action>);

    // === Convenience Methods ===

    /// Seat expected to act next.
    fn active_player(&self) -> PlayerId {
        self.get_state().active_player
    }

    /// Returns `Some(result)` once a team has won, `None` while the game
    /// continues.
    fn is_terminal(&self) -> Option<GameResult> {
        let state = self.get_state();
        if !state.is_finished() {
            return None;
        }
        state.winning_team().map(|team| GameResult { team })
    }
}
