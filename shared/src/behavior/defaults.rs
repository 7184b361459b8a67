//! Stock hook bodies.
//!
//! Every [`NodeBehavior`](crate::NodeBehavior) method defaults to the
//! matching function here, and overrides are encouraged to call back into
//! these rather than re-implement the stock flow.

use crate::behavior::{BehaviorCtx, GraphView};
use crate::ids::NodeId;

pub fn pre_begin(_ctx: &mut BehaviorCtx) {}

/// Begins every sub-node in insertion order. A node with nothing beneath it
/// has nothing to wait for, so it requests its own end instead.
pub fn post_begin(ctx: &mut BehaviorCtx) {
    if ctx.sub_nodes().is_empty() {
        ctx.request_self_end();
        return;
    }
    ctx.begin_sub_nodes();
}

pub fn pre_end(_ctx: &mut BehaviorCtx) {}

/// Ends every sub-node in insertion order.
pub fn post_end(ctx: &mut BehaviorCtx) {
    ctx.end_sub_nodes();
}

pub fn pre_pending(_ctx: &mut BehaviorCtx) {}

pub fn post_pending(_ctx: &mut BehaviorCtx) {}

/// Satisfied once every sub-node is pending, vacuously for a node without
/// sub-nodes.
pub fn can_mark_pending(view: &GraphView) -> bool {
    view.sub_nodes().iter().all(|sub| view.is_pending(*sub))
}

/// Asks each sub-node in insertion order and returns the first non-empty
/// answer.
pub fn select_next(view: &GraphView) -> Vec<NodeId> {
    for sub in view.sub_nodes() {
        let picked = view.select_next_of(*sub);
        if !picked.is_empty() {
            return picked;
        }
    }
    Vec::new()
}
