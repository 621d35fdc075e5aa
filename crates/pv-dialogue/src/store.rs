//! Loading every NPC's conversation from one document.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use pv_core::NpcId;
use serde_json::Value;

use crate::error::{GraphError, StoreError, StoreResult};
use crate::graph::DialogueGraph;

/// What to do when one NPC's conversation is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log the failure, record it, and keep loading the other NPCs.
    #[default]
    SkipInvalid,
    /// Abort the whole load on the first invalid conversation.
    FailFast,
}

/// Configuration for loading a [`DialogueStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// How invalid conversations are handled.
    pub policy: LoadPolicy,
}

impl StoreConfig {
    /// Set the load policy.
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// An NPC whose conversation was rejected during a lenient load.
#[derive(Debug)]
pub struct LoadFailure {
    /// The NPC that has no graph because of this failure.
    pub npc: NpcId,
    /// What was wrong.
    pub error: GraphError,
}

/// Every NPC's dialogue graph, loaded once and read-only afterwards.
#[derive(Debug, Default)]
pub struct DialogueStore {
    graphs: HashMap<NpcId, DialogueGraph>,
    failures: Vec<LoadFailure>,
}

impl DialogueStore {
    /// Build a store from a parsed `{"npcs": {...}}` document.
    ///
    /// NPCs without a `conversations` entry (or with `null`) get no graph.
    pub fn load(document: &Value, config: &StoreConfig) -> StoreResult<Self> {
        let npcs = document
            .get("npcs")
            .and_then(Value::as_object)
            .ok_or(StoreError::MissingNpcs)?;

        let mut store = Self::default();
        for (id, record) in npcs {
            let npc = NpcId::new(id.as_str());
            let conversations = match record.get("conversations") {
                None | Some(Value::Null) => continue,
                Some(conversations) => conversations,
            };

            match DialogueGraph::from_authored(npc.clone(), conversations) {
                Ok(graph) => {
                    tracing::debug!(npc = %npc, nodes = graph.len(), "loaded conversation");
                    store.graphs.insert(npc, graph);
                }
                Err(error) => match config.policy {
                    LoadPolicy::FailFast => return Err(StoreError::Graph { npc, source: error }),
                    LoadPolicy::SkipInvalid => {
                        tracing::error!(npc = %npc, error = %error, "conversation rejected");
                        store.failures.push(LoadFailure { npc, error });
                    }
                },
            }
        }

        tracing::info!(
            graphs = store.graphs.len(),
            rejected = store.failures.len(),
            "dialogue store loaded"
        );
        Ok(store)
    }

    /// Parse a document from a string and load it.
    pub fn from_json_str(json: &str, config: &StoreConfig) -> StoreResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::load(&document, config)
    }

    /// Read a document from `reader` and load it.
    pub fn from_reader(reader: impl Read, config: &StoreConfig) -> StoreResult<Self> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::load(&document, config)
    }

    /// Read a document from a file and load it.
    pub fn from_path(path: &Path, config: &StoreConfig) -> StoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, config)
    }

    /// Build a store from graphs constructed in code.
    pub fn from_graphs(graphs: impl IntoIterator<Item = DialogueGraph>) -> Self {
        Self {
            graphs: graphs
                .into_iter()
                .map(|g| (g.npc().clone(), g))
                .collect(),
            failures: Vec::new(),
        }
    }

    /// The conversation graph for an NPC, if it has one.
    pub fn graph(&self, npc: &str) -> Option<&DialogueGraph> {
        self.graphs.get(npc)
    }

    /// Whether the NPC has a conversation.
    pub fn contains(&self, npc: &str) -> bool {
        self.graphs.contains_key(npc)
    }

    /// Number of NPCs with a conversation.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Whether no NPC has a conversation.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// NPC ids with a conversation, sorted.
    pub fn npc_ids(&self) -> Vec<&NpcId> {
        let mut ids: Vec<_> = self.graphs.keys().collect();
        ids.sort();
        ids
    }

    /// Conversations rejected during a [`LoadPolicy::SkipInvalid`] load.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }
}
