use std::{collections::HashMap, sync::Arc};

use colloquy_shared::{Graph, GraphId};

/// The graph assets this observer is able to mirror. A spawn command that
/// names an unregistered graph is dropped, so register every playable graph
/// before pumping the command stream.
#[derive(Default)]
pub struct GraphRegistry {
    graphs: HashMap<GraphId, Arc<Graph>>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self {
            graphs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, graph: &Arc<Graph>) {
        self.graphs.insert(graph.id(), Arc::clone(graph));
    }

    pub fn get(&self, graph: &GraphId) -> Option<Arc<Graph>> {
        self.graphs.get(graph).cloned()
    }

    pub fn contains(&self, graph: &GraphId) -> bool {
        self.graphs.contains_key(graph)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
