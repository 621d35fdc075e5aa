//! Collaborator interfaces.
//!
//! The conversation core does not print, read input, fight, or haggle on its
//! own. The caller plugs these in through a [`ConversationContext`].

use pv_core::{Npc, Player, PlayerDeath};

/// Ordered, append-only destination for conversation text.
pub trait MessageSink {
    /// Deliver one piece of text.
    fn offer(&mut self, text: &str);
}

impl MessageSink for Vec<String> {
    fn offer(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Source of the player's replies.
pub trait ChoiceProvider {
    /// Pick one of `prompts` (never empty) and return its position, or
    /// `None` if the player walks away.
    fn choose(&mut self, prompts: &[&str]) -> Option<usize>;
}

/// Entry point into the combat system.
pub trait Combat {
    /// Fight `npc` until the encounter is resolved. Returns the death signal
    /// if the player does not survive.
    fn attack(&mut self, player: &mut Player, npc: &Npc) -> Result<(), PlayerDeath>;
}

/// Entry point into the trading system.
pub trait Trading {
    /// Open a trade session between `npc` and the player.
    fn trade(&mut self, npc: &Npc, player: &mut Player, allow_buy: bool, allow_sell: bool);
}

/// The collaborators one conversation talks to.
pub struct ConversationContext<'a> {
    /// Where NPC lines and notices go.
    pub sink: &'a mut dyn MessageSink,
    /// Who picks the player's replies.
    pub chooser: &'a mut dyn ChoiceProvider,
    /// Combat entry point for `attack` lines.
    pub combat: &'a mut dyn Combat,
    /// Trading entry point for `trade` lines.
    pub trading: &'a mut dyn Trading,
}

impl<'a> ConversationContext<'a> {
    /// Bundle the collaborators for one conversation.
    pub fn new(
        sink: &'a mut dyn MessageSink,
        chooser: &'a mut dyn ChoiceProvider,
        combat: &'a mut dyn Combat,
        trading: &'a mut dyn Trading,
    ) -> Self {
        Self {
            sink,
            chooser,
            combat,
            trading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_keeps_order() {
        let mut sink: Vec<String> = Vec::new();
        sink.offer("Hello");
        sink.offer("Farewell");
        assert_eq!(sink, vec!["Hello", "Farewell"]);
    }
}
