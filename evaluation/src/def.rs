// Evaluator interface for leaf positions.
//
// The `evaluation` crate only carries the shared interface and score constants.
// Concrete implementations live in their own crates (`hce` for chess boards),
// so `search` depends on the interface alone and stays generic over the game.

/// Scores a leaf position.
///
/// Implementations are shared by every search worker at once, so `evaluate`
/// takes `&self`; any caching must use interior, thread-safe mutability.
pub trait Evaluator<P>: Send + Sync {
    fn name(&self) -> String;
    /// Evaluate from the maximizing side's perspective. Positive = maximizing side advantage.
    fn evaluate(&self, position: &P) -> i32;
}
