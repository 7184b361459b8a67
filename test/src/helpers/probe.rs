use std::sync::{Arc, Mutex};

use colloquy_shared::{defaults, BehaviorCtx, GraphView, NodeBehavior, NodeId};

/// Shared order-of-side-effects recorder. Behaviors write into it from
/// their hooks; tests read it back to check transition ordering.
#[derive(Clone, Default)]
pub struct HookRecorder {
    entries: Arc<Mutex<Vec<(NodeId, &'static str)>>>,
}

impl HookRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, node: NodeId, hook: &'static str) {
        self.entries.lock().expect("recorder lock").push((node, hook));
    }

    /// Everything recorded so far, in firing order, clearing the log.
    pub fn take(&self) -> Vec<(NodeId, &'static str)> {
        std::mem::take(&mut *self.entries.lock().expect("recorder lock"))
    }

    /// The hooks one node fired, in order, without clearing.
    pub fn hooks_for(&self, node: NodeId) -> Vec<&'static str> {
        self.entries
            .lock()
            .expect("recorder lock")
            .iter()
            .filter(|(id, _)| *id == node)
            .map(|(_, hook)| *hook)
            .collect()
    }

    pub fn count(&self, node: NodeId, hook: &'static str) -> usize {
        self.entries
            .lock()
            .expect("recorder lock")
            .iter()
            .filter(|(id, fired)| *id == node && *fired == hook)
            .count()
    }
}

/// A next-pick override that can be filled in after the graph is built,
/// since node ids only exist once the builder has assigned them.
#[derive(Clone, Default)]
pub struct NextScript {
    picks: Arc<Mutex<Vec<NodeId>>>,
}

impl NextScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, picks: Vec<NodeId>) {
        *self.picks.lock().expect("script lock") = picks;
    }

    fn get(&self) -> Vec<NodeId> {
        self.picks.lock().expect("script lock").clone()
    }
}

/// The workhorse test behavior: records every hook firing, optionally
/// holds itself active instead of auto-ending, and optionally overrides
/// the next pick with a script.
pub struct Probe {
    recorder: HookRecorder,
    hold: bool,
    script: Option<NextScript>,
}

impl Probe {
    /// Stock semantics plus recording.
    pub fn new(recorder: &HookRecorder) -> Self {
        Self {
            recorder: recorder.clone(),
            hold: false,
            script: None,
        }
    }

    /// Stays active after beginning until something ends it.
    pub fn holding(recorder: &HookRecorder) -> Self {
        Self {
            recorder: recorder.clone(),
            hold: true,
            script: None,
        }
    }

    /// Stock begin semantics, scripted next pick.
    pub fn scripted(recorder: &HookRecorder, script: &NextScript) -> Self {
        Self {
            recorder: recorder.clone(),
            hold: false,
            script: Some(script.clone()),
        }
    }

    /// Holds and overrides the next pick.
    pub fn holding_scripted(recorder: &HookRecorder, script: &NextScript) -> Self {
        Self {
            recorder: recorder.clone(),
            hold: true,
            script: Some(script.clone()),
        }
    }
}

impl NodeBehavior for Probe {
    fn pre_begin(&self, ctx: &mut BehaviorCtx) {
        self.recorder.record(ctx.node(), "begin");
    }

    fn post_begin(&self, ctx: &mut BehaviorCtx) {
        if !self.hold {
            defaults::post_begin(ctx);
        }
    }

    fn pre_end(&self, ctx: &mut BehaviorCtx) {
        self.recorder.record(ctx.node(), "end");
    }

    fn pre_pending(&self, ctx: &mut BehaviorCtx) {
        self.recorder.record(ctx.node(), "pending");
    }

    fn select_next(&self, view: &GraphView) -> Vec<NodeId> {
        if let Some(script) = &self.script {
            let picks = script.get();
            if !picks.is_empty() {
                return picks;
            }
        }
        defaults::select_next(view)
    }

    fn name(&self) -> &'static str {
        "probe"
    }
}
