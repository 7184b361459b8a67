use crate::behavior::{defaults, BehaviorCtx, GraphView};
use crate::ids::NodeId;

/// Hook surface for a node's authored behavior.
///
/// Lifecycle hooks run on every participant, host and observer alike, as
/// their node transitions, so they must stay deterministic given the same
/// graph and the same command stream. The two decision hooks
/// ([`can_mark_pending`](NodeBehavior::can_mark_pending) and
/// [`select_next`](NodeBehavior::select_next)) are evaluated everywhere but
/// only ever *acted on* by the host; their outcomes reach observers as
/// mirrored commands.
///
/// Every hook has a stock body living in [`defaults`], so an override can
/// layer on the stock logic instead of re-implementing it. Hooks may begin
/// and end the node's own sub-nodes and request the node's own end; there is
/// deliberately no way to reload anything from here, and the only upward
/// path out of a node stays the pending notification the engine raises
/// itself.
///
/// Behaviors are shared between every duplicated copy of their node, so they
/// must not carry per-session state; anything that varies at play time
/// belongs in the node's properties.
pub trait NodeBehavior: Send + Sync + 'static {
    /// Runs right after the node's begin notification.
    fn pre_begin(&self, ctx: &mut BehaviorCtx) {
        defaults::pre_begin(ctx);
    }

    /// Runs after [`pre_begin`](NodeBehavior::pre_begin). The stock body
    /// begins every sub-node in insertion order, or requests the node's own
    /// end when there are none.
    fn post_begin(&self, ctx: &mut BehaviorCtx) {
        defaults::post_begin(ctx);
    }

    /// Runs right after the node's end notification.
    fn pre_end(&self, ctx: &mut BehaviorCtx) {
        defaults::pre_end(ctx);
    }

    /// Runs after [`pre_end`](NodeBehavior::pre_end). The stock body ends
    /// every sub-node in insertion order.
    fn post_end(&self, ctx: &mut BehaviorCtx) {
        defaults::post_end(ctx);
    }

    /// Runs right after the node's pending notification.
    fn pre_pending(&self, ctx: &mut BehaviorCtx) {
        defaults::pre_pending(ctx);
    }

    /// Runs after [`pre_pending`](NodeBehavior::pre_pending).
    fn post_pending(&self, ctx: &mut BehaviorCtx) {
        defaults::post_pending(ctx);
    }

    /// Whether the node is finished influencing the flow. The stock
    /// predicate is satisfied once every sub-node is pending, vacuously so
    /// for a node without sub-nodes.
    fn can_mark_pending(&self, view: &GraphView) -> bool {
        defaults::can_mark_pending(view)
    }

    /// Which base nodes the flow should move to once this node has ended.
    /// The stock body asks each sub-node in insertion order and returns the
    /// first non-empty answer; an empty answer from everyone means the flow
    /// is out of road and the session ends.
    fn select_next(&self, view: &GraphView) -> Vec<NodeId> {
        defaults::select_next(view)
    }

    /// Log-friendly name for this behavior.
    fn name(&self) -> &'static str {
        "node"
    }
}
