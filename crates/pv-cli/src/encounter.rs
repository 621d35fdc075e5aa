//! Combat and trading for the terminal front end.
//!
//! [`Brawl`] trades blows until one side drops; [`Barter`] runs a buy/sell
//! menu priced by each item's `value` property.

use std::io::Write;

use colored::Colorize;
use pv_core::{ItemId, ItemRepository, Npc, Player, PlayerDeath};
use pv_dialogue::{Combat, Trading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::console::{Console, LineSource};

/// Alternating-blow fights with seeded damage rolls.
pub struct Brawl<O> {
    rng: StdRng,
    output: O,
}

impl<O: Write> Brawl<O> {
    pub fn new(seed: u64, output: O) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            output,
        }
    }

    fn report(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            tracing::warn!(error = %e, "cannot write to terminal");
        }
    }

    /// Damage for one blow from an attacker with `damage` strength.
    fn roll(&mut self, damage: i32) -> i32 {
        self.rng.random_range(1..=damage.max(1))
    }
}

impl<O: Write> Combat for Brawl<O> {
    fn attack(&mut self, player: &mut Player, npc: &Npc) -> Result<(), PlayerDeath> {
        let mut npc_health = npc.health;
        tracing::debug!(npc = %npc.id, npc_health, player_health = player.health, "fight started");

        loop {
            let blow = self.roll(player.damage);
            npc_health -= blow;
            self.report(&format!("You hit {} for {blow}.", npc.name));
            if npc_health <= 0 {
                self.report(&format!("{} has been defeated.", npc.name).green().to_string());
                return Ok(());
            }

            let blow = self.roll(npc.damage);
            player.health -= blow;
            self.report(&format!(
                "{} hits you for {blow}. ({}/{} health)",
                npc.name,
                player.health.max(0),
                player.health_max
            ));
            if !player.is_alive() {
                tracing::info!(npc = %npc.id, player = %player.name, "player died");
                return Err(PlayerDeath::new(&player.name, &npc.name));
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Deal {
    Buy,
    Sell,
    Leave,
}

/// Buy/sell sessions against the item catalog.
pub struct Barter<'a, I, O> {
    items: &'a ItemRepository,
    console: Console<I, O>,
}

impl<'a, I: LineSource, O: Write> Barter<'a, I, O> {
    pub fn new(items: &'a ItemRepository, console: Console<I, O>) -> Self {
        Self { items, console }
    }

    /// Items from `ids` the catalog knows, as `(id, label, price)`.
    fn priced(&self, ids: &[ItemId]) -> Vec<(ItemId, String, u32)> {
        ids.iter()
            .filter_map(|id| match self.items.get(id.as_str()) {
                Some(item) => Some((id.clone(), item.name.clone(), item.value())),
                None => {
                    tracing::warn!(item = %id, "cannot price an unknown item");
                    None
                }
            })
            .collect()
    }

    /// Let the player pick one of `wares`. `None` goes back.
    fn pick(&mut self, wares: &[(ItemId, String, u32)]) -> Option<usize> {
        let labels: Vec<String> = wares
            .iter()
            .map(|(_, name, price)| format!("{name} ({price} gold)"))
            .collect();
        let mut options: Vec<&str> = labels.iter().map(String::as_str).collect();
        options.push("Back");
        self.console.menu(&options).filter(|&i| i < wares.len())
    }

    #[cfg(test)]
    fn into_console(self) -> Console<I, O> {
        self.console
    }
}

impl<I: LineSource, O: Write> Trading for Barter<'_, I, O> {
    fn trade(&mut self, npc: &Npc, player: &mut Player, allow_buy: bool, allow_sell: bool) {
        let mut stock = npc.items.clone();
        let mut npc_gold = npc.gold;
        tracing::debug!(npc = %npc.id, wares = stock.len(), "trade opened");

        let mut deals = Vec::new();
        if allow_buy {
            deals.push(("Buy", Deal::Buy));
        }
        if allow_sell {
            deals.push(("Sell", Deal::Sell));
        }
        deals.push(("Leave", Deal::Leave));
        let labels: Vec<&str> = deals.iter().map(|(label, _)| *label).collect();

        loop {
            self.console.say(
                &format!("Trading with {}. You have {} gold.", npc.name, player.gold)
                    .bold()
                    .to_string(),
            );
            let deal = match self.console.menu(&labels) {
                Some(i) => deals[i].1,
                None => Deal::Leave,
            };

            match deal {
                Deal::Buy => {
                    let wares = self.priced(&stock);
                    if wares.is_empty() {
                        self.console.say(&format!("{} has nothing to sell.", npc.name));
                        continue;
                    }
                    let Some(i) = self.pick(&wares) else { continue };
                    let (id, name, price) = &wares[i];
                    if player.gold < *price {
                        self.console.say(&format!("You can't afford the {name}."));
                        continue;
                    }
                    player.gold -= price;
                    npc_gold = npc_gold.saturating_add(*price);
                    player.add_item(id.clone());
                    if let Some(pos) = stock.iter().position(|s| s == id) {
                        stock.remove(pos);
                    }
                    self.console.say(&format!("You bought the {name} for {price} gold."));
                }
                Deal::Sell => {
                    let wares = self.priced(&player.inventory);
                    if wares.is_empty() {
                        self.console.say("You have nothing to sell.");
                        continue;
                    }
                    let Some(i) = self.pick(&wares) else { continue };
                    let (id, name, price) = &wares[i];
                    if npc_gold < *price {
                        self.console
                            .say(&format!("{} can't afford the {name}.", npc.name));
                        continue;
                    }
                    let Some(purse) = player.gold.checked_add(*price) else {
                        self.console.say("Your purse can't hold any more gold.");
                        continue;
                    };
                    player.remove_item(id);
                    player.gold = purse;
                    npc_gold -= price;
                    stock.push(id.clone());
                    self.console.say(&format!("You sold the {name} for {price} gold."));
                }
                Deal::Leave => break,
            }
        }
        tracing::debug!(npc = %npc.id, gold = player.gold, "trade closed");
    }
}
