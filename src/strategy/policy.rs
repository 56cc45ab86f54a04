use crate::core::{Action, GameRng, GameState};

/// Decision-maker for one seat.
pub trait Strategy {
    /// Pick one of `actions`, or `None` for the null action.
    ///
    /// `actions` may be empty, in which case `None` is the only answer.
    fn select_action(&mut self, view: &GameState, actions: &[Action]) -> Option<Action>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Uniform random choice among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }
}

impl Strategy for RandomStrategy {
    fn select_action(&mut self, _view: &GameState, actions: &[Action]) -> Option<Action> {
        self.rng.choose(actions).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always the first listed action. Deterministic given the engine state.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstActionStrategy;

impl Strategy for FirstActionStrategy {
    fn select_action(&mut self, _view: &GameState, actions: &[Action]) -> Option<Action> {
        actions.first().copied()
    }

    fn name(&self) -> &'static str {
        "first"
    }
}
