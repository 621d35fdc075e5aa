//! Node-attached actions.

use std::fmt;
use std::str::FromStr;

use pv_core::{Npc, Player, PlayerDeath};

use crate::error::UnknownAction;
use crate::ports::ConversationContext;

/// A side effect fired when a line is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionKind {
    /// Nothing happens.
    #[default]
    None,
    /// The NPC turns hostile and combat starts.
    Attack,
    /// Reserved; currently has no effect.
    Buy,
    /// Reserved; currently has no effect.
    Sell,
    /// A trade session opens with buying and selling allowed.
    Trade,
    /// Reserved; currently has no effect.
    Give,
    /// Reserved; currently has no effect.
    Take,
}

const ACTION_TAGS: [(&str, ActionKind); 7] = [
    ("none", ActionKind::None),
    ("attack", ActionKind::Attack),
    ("buy", ActionKind::Buy),
    ("sell", ActionKind::Sell),
    ("trade", ActionKind::Trade),
    ("give", ActionKind::Give),
    ("take", ActionKind::Take),
];

impl ActionKind {
    /// Look up an action by its authored tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ACTION_TAGS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
    }

    /// The authored tag for this action.
    pub fn tag(self) -> &'static str {
        ACTION_TAGS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(t, _)| *t)
            .unwrap_or("none")
    }

    /// Whether triggering this action does anything.
    pub fn has_effect(self) -> bool {
        matches!(self, ActionKind::Attack | ActionKind::Trade)
    }

    /// Fire the action for a line spoken by `npc`.
    ///
    /// `Attack` announces the hostility through the sink before combat
    /// starts and passes a player death straight back to the caller.
    pub fn trigger(
        self,
        npc: &Npc,
        player: &mut Player,
        ctx: &mut ConversationContext<'_>,
    ) -> Result<(), PlayerDeath> {
        match self {
            ActionKind::None => {}
            ActionKind::Attack => {
                tracing::info!(npc = %npc.id, player = %player.name, "conversation turned hostile");
                ctx.sink.offer(&format!("\n{} is now attacking you!\n", npc.name));
                ctx.combat.attack(player, npc)?;
            }
            ActionKind::Trade => {
                tracing::debug!(npc = %npc.id, "opening trade");
                ctx.trading.trade(npc, player, true, true);
            }
            ActionKind::Buy | ActionKind::Sell | ActionKind::Give | ActionKind::Take => {
                tracing::debug!(npc = %npc.id, action = %self, "action has no effect");
            }
        }
        Ok(())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
