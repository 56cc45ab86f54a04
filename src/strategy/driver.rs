use tracing::{debug, info};

use super::policy::Strategy;
use crate::core::PlayerMap;
use crate::rules::{GameResult, RulesEngine};

/// How a driven game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` when the step limit was reached first.
    pub result: Option<GameResult>,

    /// Actions (null actions included) handed to the engine.
    pub steps: usize,

    /// Round the game stopped in.
    pub rounds: u32,
}

impl GameOutcome {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Play until a team wins or `max_steps` actions have been applied.
///
/// Each seat's strategy sees only that seat's view. The step limit also
/// bounds positions where the only play left is a split move that can
/// never be completed.
pub fn play_game<E: RulesEngine>(
    engine: &mut E,
    strategies: &mut PlayerMap<Box<dyn Strategy>>,
    max_steps: usize,
) -> GameOutcome {
    let mut steps = 0;
    while steps < max_steps {
        if engine.is_terminal().is_some() {
            break;
        }
        let seat = engine.active_player();
        let actions = engine.get_list_action();
        let view = engine.get_player_view(seat);
        let chosen = strategies[seat].select_action(&view, &actions);
        engine.apply_action(chosen.as_ref());
        steps += 1;
    }

    let outcome = GameOutcome {
        result: engine.is_terminal(),
        steps,
        rounds: engine.get_state().round,
    };
    match outcome.result {
        Some(result) => info!(team = ?result.team, steps, rounds = outcome.rounds, "game won"),
        None => debug!(steps, rounds = outcome.rounds, "step limit reached"),
    }
    outcome
}
