use std::any::TypeId;

use crate::behavior::NodeBehavior;

/// Runtime identifier for a concrete [`NodeBehavior`] implementation, used
/// by kind-keyed fragment queries.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct BehaviorKind(TypeId);

impl BehaviorKind {
    pub fn of<B: NodeBehavior>() -> Self {
        Self(TypeId::of::<B>())
    }
}
