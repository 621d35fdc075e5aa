//! The conversation state machine.

use pv_core::{ItemRepository, Npc, Player, PlayerDeath};

use crate::graph::{DialogueGraph, DialogueNode, NodeIndex};
use crate::ports::ConversationContext;
use crate::store::DialogueStore;

/// How a conversation ended, when it ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// The NPC has no conversation, or no entry line is available.
    NotStarted,
    /// A line with no available follow-up was reached.
    Finished {
        /// Number of NPC lines emitted.
        lines: usize,
    },
    /// The player declined to pick a reply.
    Abandoned {
        /// Number of NPC lines emitted.
        lines: usize,
    },
}

impl ConversationOutcome {
    /// Number of NPC lines emitted before the conversation ended.
    pub fn lines(self) -> usize {
        match self {
            ConversationOutcome::NotStarted => 0,
            ConversationOutcome::Finished { lines } | ConversationOutcome::Abandoned { lines } => {
                lines
            }
        }
    }
}

enum State {
    SelectingEntry,
    EmittingLine(NodeIndex),
    AwaitingChoice(NodeIndex),
    Terminated(ConversationOutcome),
}

/// Walks NPC conversations held in a [`DialogueStore`].
///
/// The driver itself is stateless; the cursor of a conversation lives inside
/// [`start_conversation`](Self::start_conversation).
#[derive(Debug, Clone, Copy)]
pub struct ConversationDriver<'a> {
    store: &'a DialogueStore,
    items: &'a ItemRepository,
}

impl<'a> ConversationDriver<'a> {
    /// Create a driver over a loaded store and the item catalog.
    pub fn new(store: &'a DialogueStore, items: &'a ItemRepository) -> Self {
        Self { store, items }
    }

    /// Run a conversation with `npc` to completion.
    ///
    /// Each reached line is emitted to the sink and its action fired before
    /// the follow-ups are filtered, so conditions see whatever the action
    /// changed. A [`PlayerDeath`] from combat ends the conversation at once
    /// and is returned unchanged.
    pub fn start_conversation(
        &self,
        npc: &Npc,
        player: &mut Player,
        ctx: &mut ConversationContext<'_>,
    ) -> Result<ConversationOutcome, PlayerDeath> {
        let Some(graph) = self.store.graph(npc.id.as_str()) else {
            tracing::debug!(npc = %npc.id, "no conversation");
            return Ok(ConversationOutcome::NotStarted);
        };

        let mut lines = 0;
        let mut state = State::SelectingEntry;
        loop {
            state = match state {
                State::SelectingEntry => match self.entry_node(graph, npc, player) {
                    Some(entry) => {
                        tracing::debug!(npc = %npc.id, node = entry.index, "entry selected");
                        State::EmittingLine(entry.index)
                    }
                    None => {
                        tracing::debug!(npc = %npc.id, "no entry line available");
                        State::Terminated(ConversationOutcome::NotStarted)
                    }
                },
                State::EmittingLine(index) => match graph.node(index) {
                    Some(node) => {
                        tracing::debug!(npc = %npc.id, node = index, action = %node.action, "line reached");
                        ctx.sink.offer(&node.text);
                        lines += 1;
                        node.action.trigger(npc, player, ctx)?;
                        State::AwaitingChoice(index)
                    }
                    None => State::Terminated(ConversationOutcome::Finished { lines }),
                },
                State::AwaitingChoice(index) => {
                    let choices = match graph.node(index) {
                        Some(node) => self.available_choices(graph, node, npc, player),
                        None => Vec::new(),
                    };
                    if choices.is_empty() {
                        State::Terminated(ConversationOutcome::Finished { lines })
                    } else {
                        self.await_choice(npc, &choices, lines, ctx)
                    }
                }
                State::Terminated(outcome) => {
                    tracing::debug!(npc = %npc.id, ?outcome, "conversation over");
                    return Ok(outcome);
                }
            };
        }
    }

    fn await_choice(
        &self,
        npc: &Npc,
        choices: &[&DialogueNode],
        lines: usize,
        ctx: &mut ConversationContext<'_>,
    ) -> State {
        let prompts: Vec<&str> = choices.iter().map(|n| n.player_prompt.as_str()).collect();
        tracing::debug!(npc = %npc.id, offered = prompts.len(), "awaiting choice");

        match ctx.chooser.choose(&prompts) {
            Some(pick) => match choices.get(pick) {
                Some(next) => State::EmittingLine(next.index),
                None => {
                    tracing::warn!(npc = %npc.id, pick, offered = prompts.len(), "choice out of range");
                    State::Terminated(ConversationOutcome::Abandoned { lines })
                }
            },
            None => State::Terminated(ConversationOutcome::Abandoned { lines }),
        }
    }

    /// The first line, in authored order, with an empty prompt whose
    /// condition currently holds.
    pub fn entry_node<'g>(
        &self,
        graph: &'g DialogueGraph,
        npc: &Npc,
        player: &Player,
    ) -> Option<&'g DialogueNode> {
        graph
            .entry_candidates()
            .find(|n| n.condition.matches(npc, player, self.items))
    }

    /// The follow-ups of `node` whose condition currently holds, in
    /// authored order.
    pub fn available_choices<'g>(
        &self,
        graph: &'g DialogueGraph,
        node: &DialogueNode,
        npc: &Npc,
        player: &Player,
    ) -> Vec<&'g DialogueNode> {
        node.outgoing
            .iter()
            .filter_map(|&target| graph.node(target))
            .filter(|n| n.condition.matches(npc, player, self.items))
            .collect()
    }
}
