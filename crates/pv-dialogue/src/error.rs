//! Error types for loading dialogue data.
//!
//! Traversal has no error type of its own: dead ends are normal endings and
//! the only abnormal exit is [`PlayerDeath`](pv_core::PlayerDeath).

use std::path::PathBuf;

use pv_core::NpcId;
use thiserror::Error;

use crate::graph::NodeIndex;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A condition token that cannot be turned into a [`Condition`](crate::Condition).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The part before `=` is not a known condition kind.
    #[error("unknown condition kind \"{0}\"")]
    UnknownKind(String),

    /// A `level` condition whose parameter is not an integer.
    #[error("level condition needs an integer, got \"{0}\"")]
    InvalidLevel(String),
}

/// An action tag that does not name an [`ActionKind`](crate::ActionKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action \"{0}\"")]
pub struct UnknownAction(pub String);

/// A single authored line that cannot become a node.
#[derive(Debug, Error)]
pub enum LineError {
    /// A required field is missing or has the wrong type.
    #[error("malformed line: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The `condition` field does not parse.
    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// The `action` field does not parse.
    #[error(transparent)]
    Action(#[from] UnknownAction),

    /// A `response` entry points past the end of the conversation.
    #[error("response {target} does not name a line (conversation has {len})")]
    DanglingEdge {
        /// The offending response index.
        target: NodeIndex,
        /// Number of lines in the conversation.
        len: usize,
    },

    /// A node's index does not match its position in the graph.
    #[error("node at position {position} claims index {index}")]
    IndexMismatch {
        /// Where the node sits.
        position: usize,
        /// The index the node carries.
        index: NodeIndex,
    },
}

/// One NPC's conversation could not be built.
#[derive(Debug, Error)]
pub enum GraphError {
    /// `conversations` is present but not an array.
    #[error("conversations must be an array")]
    NotAnArray,

    /// One of the lines is invalid; the whole graph is rejected.
    #[error("line {index}: {source}")]
    Line {
        /// Position of the bad line.
        index: NodeIndex,
        /// What is wrong with it.
        source: LineError,
    },
}

impl GraphError {
    pub(crate) fn at(index: NodeIndex, source: impl Into<LineError>) -> Self {
        Self::Line {
            index,
            source: source.into(),
        }
    }
}

/// Errors that can occur when loading a dialogue store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no top-level `npcs` object.
    #[error("document has no \"npcs\" object")]
    MissingNpcs,

    /// An NPC's conversation is invalid and the load policy is fail-fast.
    #[error("conversation for {npc}: {source}")]
    Graph {
        /// The NPC whose conversation failed.
        npc: NpcId,
        /// Why it failed.
        source: GraphError,
    },
}
