//! Line-oriented terminal I/O for conversations and trade menus.

use std::collections::VecDeque;
use std::io::{self, Write};

use pv_dialogue::{ChoiceProvider, MessageSink};

/// Replies that walk away from any menu.
const LEAVE_WORDS: [&str; 3] = ["q", "quit", "leave"];

/// Somewhere the player's typed lines come from.
pub trait LineSource {
    /// The next line without its terminator, or `None` once input is closed.
    fn next_line(&mut self) -> Option<String>;
}

impl LineSource for io::Stdin {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read player input");
                None
            }
        }
    }
}

impl LineSource for VecDeque<String> {
    fn next_line(&mut self) -> Option<String> {
        self.pop_front()
    }
}

/// Prints NPC lines and numbered menus, and reads the player's picks.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: LineSource, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Print one line of text.
    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            tracing::warn!(error = %e, "cannot write to terminal");
        }
    }

    /// Show `options` as a numbered menu and wait for a valid pick.
    ///
    /// Accepts a number or the option text (case-insensitive). Closed input
    /// or a leave word returns `None`.
    pub fn menu(&mut self, options: &[&str]) -> Option<usize> {
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {option}", i + 1));
        }

        loop {
            if write!(self.output, "> ").and_then(|()| self.output.flush()).is_err() {
                return None;
            }
            let line = self.input.next_line()?;
            let reply = line.trim();

            if LEAVE_WORDS.iter().any(|w| reply.eq_ignore_ascii_case(w)) {
                return None;
            }
            if let Some(pick) = parse_pick(reply, options) {
                return Some(pick);
            }
            self.say(&format!("Choose 1-{} or type \"leave\".", options.len()));
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }
}

fn parse_pick(reply: &str, options: &[&str]) -> Option<usize> {
    match reply.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(n - 1),
        Ok(_) => None,
        Err(_) => options.iter().position(|o| o.eq_ignore_ascii_case(reply)),
    }
}

impl<I: LineSource, O: Write> MessageSink for Console<I, O> {
    fn offer(&mut self, text: &str) {
        self.say(text);
    }
}

impl<I: LineSource, O: Write> ChoiceProvider for Console<I, O> {
    fn choose(&mut self, prompts: &[&str]) -> Option<usize> {
        self.menu(prompts)
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Console<VecDeque<String>, Vec<u8>> {
    Console::new(lines.iter().map(|l| l.to_string()).collect(), Vec::new())
}
