//! Evaluator trait for leaf evaluation.
//!
//! The search hands every new leaf to an evaluator and backs up the value it
//! returns. The production evaluator is the guided rollout in
//! [`crate::rollout`]; tests plug in fixed scorers to check the tree logic.

use games_snake::SnakeGame;
use rand_chacha::ChaCha20Rng;

/// Result of evaluating a game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Accumulated (shaped) reward, backed up unchanged to the root.
    pub value: f32,

    /// Number of game steps the evaluator simulated.
    pub steps: u32,

    /// Whether the simulation ended in a finished game.
    pub terminal: bool,
}

impl Evaluation {
    /// A value that required no simulation.
    pub fn immediate(value: f32, terminal: bool) -> Self {
        Self {
            value,
            steps: 0,
            terminal,
        }
    }
}

/// Trait for leaf evaluators.
///
/// The evaluator owns the state it is given and may step it freely.
pub trait Evaluator {
    fn evaluate(&self, state: SnakeGame, rng: &mut ChaCha20Rng) -> Evaluation;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, state: SnakeGame, rng: &mut ChaCha20Rng) -> Evaluation {
        (**self).evaluate(state, rng)
    }
}

/// Scores a state by its current game score, without simulating.
/// Useful for testing search without rollout noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl Evaluator for ScoreEvaluator {
    fn evaluate(&self, state: SnakeGame, _rng: &mut ChaCha20Rng) -> Evaluation {
        let terminal = state.is_done();
        Evaluation::immediate(state.score() as f32, terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_snake::{Action, Point};
    use rand::SeedableRng;

    #[test]
    fn test_score_evaluator() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut game =
            SnakeGame::with_snake(6, 6, [(2, 2)], Point::new(3, 2), Action::Up, 0).unwrap();

        let before = ScoreEvaluator.evaluate(game.clone(), &mut rng);
        assert_eq!(before, Evaluation::immediate(0.0, false));

        game.advance(Action::Right);
        let after = ScoreEvaluator.evaluate(game, &mut rng);
        assert!((after.value - 1.0).abs() < 1e-6);
        assert_eq!(after.steps, 0);
    }

    #[test]
    fn test_evaluator_by_reference() {
        fn run<E: Evaluator>(eval: E, state: SnakeGame) -> Evaluation {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            eval.evaluate(state, &mut rng)
        }

        let game = SnakeGame::new(6, 6, 1).unwrap();
        let eval = ScoreEvaluator;
        assert_eq!(run(&eval, game.clone()), run(eval, game));
    }
}
