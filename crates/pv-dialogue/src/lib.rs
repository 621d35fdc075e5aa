//! Branching NPC conversations for Palaver.
//!
//! Each NPC owns a [`DialogueGraph`]: an ordered list of authored lines whose
//! `response` indices name the lines that may follow. Lines are gated by a
//! [`Condition`] over player and NPC state and may fire an [`ActionKind`]
//! (combat or trade) when reached. The [`DialogueStore`] loads every graph
//! once, and the [`ConversationDriver`] walks one graph turn by turn,
//! emitting text to a [`MessageSink`] and asking a [`ChoiceProvider`] for
//! the player's reply.
//!
//! A conversation ends when the current line has no reachable follow-up, or
//! early with [`PlayerDeath`](pv_core::PlayerDeath) when a triggered attack
//! kills the player.

/// Node-attached side effects.
pub mod action;
/// Gating conditions over player and NPC state.
pub mod condition;
/// The turn-by-turn conversation state machine.
pub mod driver;
/// Load-time error types.
pub mod error;
/// Dialogue nodes and per-NPC graphs.
pub mod graph;
/// Interfaces to the surrounding game: output, player input, combat, trade.
pub mod ports;
/// Loading and indexing every NPC's graph.
pub mod store;

pub use action::ActionKind;
pub use condition::{Condition, ConditionKind};
pub use driver::{ConversationDriver, ConversationOutcome};
pub use error::{ConditionError, GraphError, LineError, StoreError, StoreResult, UnknownAction};
pub use graph::{DialogueGraph, DialogueNode, NodeIndex};
pub use ports::{ChoiceProvider, Combat, ConversationContext, MessageSink, Trading};
pub use store::{DialogueStore, LoadFailure, LoadPolicy, StoreConfig};
