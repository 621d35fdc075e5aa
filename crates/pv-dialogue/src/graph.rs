//! Dialogue nodes and per-NPC conversation graphs.

use pv_core::NpcId;
use serde::Deserialize;
use serde_json::Value;

use crate::action::ActionKind;
use crate::condition::Condition;
use crate::error::{GraphError, LineError};

/// Position of a node inside its graph. Edges are stored as these.
pub type NodeIndex = usize;

/// One authored line of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueNode {
    /// Position in the NPC's line list.
    pub index: NodeIndex,
    /// The player's words that lead into this line. Empty for entry lines.
    pub player_prompt: String,
    /// What the NPC says when the line is reached.
    pub text: String,
    /// Gate evaluated before the line is offered.
    pub condition: Condition,
    /// Lines that may follow, in authored order.
    pub outgoing: Vec<NodeIndex>,
    /// Fired when the line is reached.
    pub action: ActionKind,
}

impl DialogueNode {
    /// Create an ungated node with no prompt, no action, and no follow-ups.
    pub fn new(index: NodeIndex, text: impl Into<String>) -> Self {
        Self {
            index,
            player_prompt: String::new(),
            text: text.into(),
            condition: Condition::None,
            outgoing: Vec::new(),
            action: ActionKind::None,
        }
    }

    /// Set the player prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.player_prompt = prompt.into();
        self
    }

    /// Set the gating condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Add a follow-up line.
    pub fn with_response(mut self, target: NodeIndex) -> Self {
        self.outgoing.push(target);
        self
    }

    /// Set the action.
    pub fn with_action(mut self, action: ActionKind) -> Self {
        self.action = action;
        self
    }

    /// Whether this line can open a conversation.
    pub fn is_entry(&self) -> bool {
        self.player_prompt.is_empty()
    }
}

/// A conversation line as it appears in the data file.
#[derive(Debug, Deserialize)]
struct AuthoredLine {
    player: String,
    text: String,
    condition: String,
    action: String,
    #[serde(default)]
    response: Option<Vec<NodeIndex>>,
}

impl AuthoredLine {
    fn into_node(self, index: NodeIndex) -> Result<DialogueNode, LineError> {
        Ok(DialogueNode {
            index,
            player_prompt: self.player,
            text: self.text,
            condition: self.condition.parse()?,
            outgoing: self.response.unwrap_or_default(),
            action: self.action.parse()?,
        })
    }
}

/// One NPC's conversation: an arena of nodes addressed by position.
///
/// Every edge names a node of the same graph. Graphs are only built whole;
/// one bad line rejects the lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueGraph {
    npc: NpcId,
    nodes: Vec<DialogueNode>,
}

impl DialogueGraph {
    /// Build a graph from nodes, checking that each sits at its own index
    /// and that every edge stays inside the graph.
    pub fn new(npc: impl Into<NpcId>, nodes: Vec<DialogueNode>) -> Result<Self, GraphError> {
        let len = nodes.len();
        for (position, node) in nodes.iter().enumerate() {
            if node.index != position {
                return Err(GraphError::at(
                    position,
                    LineError::IndexMismatch {
                        position,
                        index: node.index,
                    },
                ));
            }
            if let Some(&target) = node.outgoing.iter().find(|&&t| t >= len) {
                return Err(GraphError::at(
                    position,
                    LineError::DanglingEdge { target, len },
                ));
            }
        }
        Ok(Self {
            npc: npc.into(),
            nodes,
        })
    }

    /// Build a graph from an NPC's authored `conversations` value.
    pub fn from_authored(npc: impl Into<NpcId>, conversations: &Value) -> Result<Self, GraphError> {
        let lines = conversations.as_array().ok_or(GraphError::NotAnArray)?;
        let nodes = lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                AuthoredLine::deserialize(line)
                    .map_err(LineError::from)
                    .and_then(|authored| authored.into_node(index))
                    .map_err(|e| GraphError::at(index, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(npc, nodes)
    }

    /// The NPC this conversation belongs to.
    pub fn npc(&self) -> &NpcId {
        &self.npc
    }

    /// Look up a node by index.
    pub fn node(&self, index: NodeIndex) -> Option<&DialogueNode> {
        self.nodes.get(index)
    }

    /// All nodes in authored order.
    pub fn nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }

    /// Nodes with an empty prompt, in authored order.
    pub fn entry_candidates(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.iter().filter(|n| n.is_entry())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
