//! Scenario tests for pv-dialogue.
use std::cell::RefCell;
use std::rc::Rc;

use pv_core::{Item, ItemId, ItemRepository, Npc, Player, PlayerDeath};
use pv_dialogue::{
    ChoiceProvider, Combat, ConversationContext, ConversationDriver, ConversationOutcome,
    DialogueStore, MessageSink, StoreConfig, Trading,
};

/// Picks replies from a script and records every menu it was shown.
#[derive(Default)]
struct ScriptedChooser {
    picks: Vec<Option<usize>>,
    menus: Vec<Vec<String>>,
}

impl ScriptedChooser {
    fn new(picks: Vec<Option<usize>>) -> Self {
        Self {
            picks,
            menus: Vec::new(),
        }
    }
}

impl ChoiceProvider for ScriptedChooser {
    fn choose(&mut self, prompts: &[&str]) -> Option<usize> {
        self.menus
            .push(prompts.iter().map(|p| p.to_string()).collect());
        if self.picks.is_empty() {
            None
        } else {
            self.picks.remove(0)
        }
    }
}

#[derive(Default)]
struct Arena {
    lethal: bool,
    fights: Vec<String>,
}

impl Combat for Arena {
    fn attack(&mut self, player: &mut Player, npc: &Npc) -> Result<(), PlayerDeath> {
        self.fights.push(npc.name.clone());
        if self.lethal {
            player.health = 0;
            return Err(PlayerDeath::new(&player.name, &npc.name));
        }
        Ok(())
    }
}

/// Hands over every item the NPC carries.
#[derive(Default)]
struct Generous {
    sessions: usize,
}

impl Trading for Generous {
    fn trade(&mut self, npc: &Npc, player: &mut Player, _allow_buy: bool, _allow_sell: bool) {
        self.sessions += 1;
        for item in &npc.items {
            player.add_item(item.clone());
        }
    }
}

struct Closed;

impl Trading for Closed {
    fn trade(&mut self, _npc: &Npc, _player: &mut Player, _allow_buy: bool, _allow_sell: bool) {}
}

fn catalog() -> ItemRepository {
    let mut items = ItemRepository::new();
    items.insert(Item::new("potion_health", "Health Potion").with_property("value", 20));
    items
}

fn store(json: &str) -> DialogueStore {
    DialogueStore::from_json_str(json, &StoreConfig::default()).unwrap()
}

struct Run {
    outcome: Result<ConversationOutcome, PlayerDeath>,
    sink: Vec<String>,
    chooser: ScriptedChooser,
    combat: Arena,
}

fn talk(
    store: &DialogueStore,
    npc: &Npc,
    player: &mut Player,
    chooser: ScriptedChooser,
    combat: Arena,
    trading: &mut dyn Trading,
) -> Run {
    let items = catalog();
    let driver = ConversationDriver::new(store, &items);
    let mut sink: Vec<String> = Vec::new();
    let mut chooser = chooser;
    let mut combat = combat;
    let mut ctx = ConversationContext::new(&mut sink, &mut chooser, &mut combat, trading);
    let outcome = driver.start_conversation(npc, player, &mut ctx);
    Run {
        outcome,
        sink,
        chooser,
        combat,
    }
}

const GREETER: &str = r#"{ "npcs": { "greeter": { "conversations": [
    { "player": "", "text": "Hello", "condition": "none", "action": "none", "response": [1] },
    { "player": "Bye", "text": "Farewell", "condition": "none", "action": "none" }
] } } }"#;

#[test]
fn greeting_then_farewell() {
    let store = store(GREETER);
    let npc = Npc::new("greeter", "Greeter");
    let mut player = Player::new("Aria", "Recruit");

    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::new(vec![Some(0)]),
        Arena::default(),
        &mut Closed,
    );

    assert_eq!(run.outcome, Ok(ConversationOutcome::Finished { lines: 2 }));
    assert_eq!(run.sink, vec!["Hello", "Farewell"]);
    assert_eq!(run.chooser.menus, vec![vec!["Bye".to_string()]]);
}

const BANDIT: &str = r#"{ "npcs": { "bandit": { "conversations": [
    { "player": "", "text": "Your gold or your life!", "condition": "none", "action": "attack", "response": [1] },
    { "player": "Run", "text": "Coward!", "condition": "none", "action": "none" }
] } } }"#;

#[test]
fn attack_fires_before_choices() {
    let store = store(BANDIT);
    let npc = Npc::new("bandit", "Bandit");
    let mut player = Player::new("Aria", "Recruit");

    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::new(vec![Some(0)]),
        Arena::default(),
        &mut Closed,
    );

    assert_eq!(run.outcome, Ok(ConversationOutcome::Finished { lines: 2 }));
    assert_eq!(
        run.sink,
        vec![
            "Your gold or your life!",
            "\nBandit is now attacking you!\n",
            "Coward!"
        ]
    );
    assert_eq!(run.combat.fights, vec!["Bandit"]);
}

#[test]
fn death_during_attack_ends_conversation() {
    let store = store(BANDIT);
    let npc = Npc::new("bandit", "Bandit");
    let mut player = Player::new("Aria", "Recruit");
    let lethal = Arena {
        lethal: true,
        ..Arena::default()
    };

    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::new(vec![Some(0)]),
        lethal,
        &mut Closed,
    );

    assert_eq!(run.outcome, Err(PlayerDeath::new("Aria", "Bandit")));
    assert_eq!(
        run.sink,
        vec!["Your gold or your life!", "\nBandit is now attacking you!\n"]
    );
    assert!(run.chooser.menus.is_empty());
    assert!(!player.is_alive());
}

const TRAINER: &str = r#"{ "npcs": { "trainer": { "conversations": [
    { "player": "", "text": "Ready to train?", "condition": "none", "action": "none", "response": [1, 2] },
    { "player": "Teach me the basics", "text": "Hold it like this.", "condition": "none", "action": "none" },
    { "player": "Teach me the secret strike", "text": "Watch closely.", "condition": "level=5", "action": "none" }
] } } }"#;

#[test]
fn level_gated_choice() {
    let store = store(TRAINER);
    let npc = Npc::new("trainer", "Trainer");

    let mut novice = Player::new("Aria", "Recruit").with_level(4);
    let run = talk(
        &store,
        &npc,
        &mut novice,
        ScriptedChooser::default(),
        Arena::default(),
        &mut Closed,
    );
    assert_eq!(run.chooser.menus, vec![vec!["Teach me the basics".to_string()]]);
    assert_eq!(run.outcome, Ok(ConversationOutcome::Abandoned { lines: 1 }));

    for level in [5, 8] {
        let mut adept = Player::new("Aria", "Recruit").with_level(level);
        let run = talk(
            &store,
            &npc,
            &mut adept,
            ScriptedChooser::new(vec![Some(1)]),
            Arena::default(),
            &mut Closed,
        );
        assert_eq!(
            run.chooser.menus,
            vec![vec![
                "Teach me the basics".to_string(),
                "Teach me the secret strike".to_string()
            ]]
        );
        assert_eq!(run.sink, vec!["Ready to train?", "Watch closely."]);
    }
}

const HEALER: &str = r#"{ "npcs": { "healer": { "conversations": [
    { "player": "", "text": "You look pale.", "condition": "none", "action": "none", "response": [1, 2] },
    { "player": "I'm fine", "text": "If you say so.", "condition": "none", "action": "none" },
    { "player": "I brought the potion", "text": "Drink it, then.", "condition": "item=potion_health", "action": "none" }
] } } }"#;

#[test]
fn item_gated_choice() {
    let store = store(HEALER);
    let npc = Npc::new("healer", "Healer");

    let mut empty_handed = Player::new("Aria", "Recruit");
    let run = talk(
        &store,
        &npc,
        &mut empty_handed,
        ScriptedChooser::default(),
        Arena::default(),
        &mut Closed,
    );
    assert_eq!(run.chooser.menus, vec![vec!["I'm fine".to_string()]]);

    let mut prepared = Player::new("Aria", "Recruit").with_item("potion_health");
    let run = talk(
        &store,
        &npc,
        &mut prepared,
        ScriptedChooser::new(vec![Some(1)]),
        Arena::default(),
        &mut Closed,
    );
    assert_eq!(run.sink, vec!["You look pale.", "Drink it, then."]);
}

#[test]
fn npc_without_conversations_is_silent() {
    let store = store(r#"{ "npcs": { "rat": { "name": "Rat", "health": 3 } } }"#);
    assert!(store.is_empty());

    let npc = Npc::new("rat", "Rat");
    let mut player = Player::new("Aria", "Recruit");
    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::default(),
        Arena::default(),
        &mut Closed,
    );

    assert_eq!(run.outcome, Ok(ConversationOutcome::NotStarted));
    assert!(run.sink.is_empty());
    assert!(run.chooser.menus.is_empty());
}

const PEDDLER: &str = r#"{ "npcs": { "peddler": { "conversations": [
    { "player": "", "text": "Take a look at my wares.", "condition": "none", "action": "trade", "response": [1, 2] },
    { "player": "Nothing for me", "text": "Suit yourself.", "condition": "none", "action": "none" },
    { "player": "About this potion", "text": "Fresh from the still.", "condition": "item=potion_health", "action": "none" }
] } } }"#;

const CIRCLE: &str = r#"{ "npcs": { "circle": { "conversations": [
    { "player": "", "text": "A", "condition": "none", "action": "attack", "response": [1] },
    { "player": "Again", "text": "B", "condition": "none", "action": "none", "response": [0] }
] } } }"#;

#[test]
fn back_edges_revisit_lines_and_refire_actions() {
    let store = store(CIRCLE);
    let npc = Npc::new("circle", "Loop");
    let mut player = Player::new("Aria", "Recruit");

    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::new(vec![Some(0), Some(0), Some(0)]),
        Arena::default(),
        &mut Closed,
    );

    assert_eq!(run.outcome, Ok(ConversationOutcome::Abandoned { lines: 4 }));
    assert_eq!(
        run.sink,
        vec![
            "A",
            "\nLoop is now attacking you!\n",
            "B",
            "A",
            "\nLoop is now attacking you!\n",
            "B"
        ]
    );
    assert_eq!(run.combat.fights, vec!["Loop", "Loop"]);
    assert_eq!(run.chooser.menus.len(), 4);
}

#[test]
fn conditions_see_what_the_trade_changed() {
    let store = store(PEDDLER);
    let npc = Npc::new("peddler", "Peddler").with_item("potion_health");

    let mut player = Player::new("Aria", "Recruit");
    let mut closed = Closed;
    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::default(),
        Arena::default(),
        &mut closed,
    );
    assert_eq!(run.chooser.menus, vec![vec!["Nothing for me".to_string()]]);

    let mut player = Player::new("Aria", "Recruit");
    let mut generous = Generous::default();
    let run = talk(
        &store,
        &npc,
        &mut player,
        ScriptedChooser::default(),
        Arena::default(),
        &mut generous,
    );
    assert_eq!(generous.sessions, 1);
    assert_eq!(
        run.chooser.menus,
        vec![vec![
            "Nothing for me".to_string(),
            "About this potion".to_string()
        ]]
    );
    assert!(player.has_item(&ItemId::new("potion_health")));
}

/// Console that interleaves NPC lines and the player's picks.
#[derive(Clone, Default)]
struct Transcript(Rc<RefCell<Vec<String>>>);

impl MessageSink for Transcript {
    fn offer(&mut self, text: &str) {
        self.0.borrow_mut().push(text.trim().to_string());
    }
}

struct TranscriptChooser {
    log: Transcript,
    picks: Vec<usize>,
}

impl ChoiceProvider for TranscriptChooser {
    fn choose(&mut self, prompts: &[&str]) -> Option<usize> {
        if self.picks.is_empty() {
            return None;
        }
        let pick = self.picks.remove(0);
        self.log.0.borrow_mut().push(format!("> {}", prompts[pick]));
        Some(pick)
    }
}

#[test]
fn gatekeeper_transcript() {
    let json = r#"{ "npcs": { "gatekeeper": { "conversations": [
        { "player": "", "text": "Halt! State your business.", "condition": "enemy", "action": "none", "response": [2] },
        { "player": "", "text": "Welcome back, friend.", "condition": "none", "action": "none", "response": [2, 3] },
        { "player": "Just passing through", "text": "Keep your blade sheathed.", "condition": "none", "action": "none" },
        { "player": "Any news?", "text": "Wolves on the north road.", "condition": "ally", "action": "none", "response": [2] }
    ] } } }"#;
    let store = store(json);
    let npc = Npc::new("gatekeeper", "Gatekeeper")
        .with_ally("Recruit")
        .with_enemy("Syndicate Member");
    let mut player = Player::new("Aria", "Recruit");

    let items = catalog();
    let driver = ConversationDriver::new(&store, &items);
    let mut sink = Transcript::default();
    let mut chooser = TranscriptChooser {
        log: sink.clone(),
        picks: vec![1, 0],
    };
    let mut combat = Arena::default();
    let mut trading = Closed;
    let mut ctx = ConversationContext::new(&mut sink, &mut chooser, &mut combat, &mut trading);
    let outcome = driver.start_conversation(&npc, &mut player, &mut ctx).unwrap();

    assert_eq!(outcome, ConversationOutcome::Finished { lines: 3 });
    let transcript = sink.0.borrow().join("\n");
    insta::assert_snapshot!(transcript, @r"
    Welcome back, friend.
    > Any news?
    Wolves on the north road.
    > Just passing through
    Keep your blade sheathed.
    ");
}

#[test]
fn bundled_sample_data_loads_strictly() {
    let config = StoreConfig::default().with_policy(pv_dialogue::LoadPolicy::FailFast);
    let store = DialogueStore::from_json_str(include_str!("../../../json/npcs.json"), &config)
        .unwrap();

    let ids: Vec<_> = store.npc_ids().into_iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["brotherhood_member", "recruit"]);
    assert!(store.failures().is_empty());
}
