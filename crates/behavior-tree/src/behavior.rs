//! Core behavior trait.

use crate::Status;

/// A node that can be evaluated against a blackboard context.
///
/// Nodes may write intermediate results into the context (for example the
/// target a search node found) so that later siblings can act on them.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates the node once.
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
