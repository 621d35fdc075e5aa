//! Error types, including the terminal player-death signal.

use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading world records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The data file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A required top-level section is missing.
    #[error("document has no \"{0}\" object")]
    MissingSection(&'static str),
}

/// The player died. Raised by combat and carried unchanged through every
/// frame of a conversation back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{player} was slain by {killer}")]
pub struct PlayerDeath {
    /// Name of the player who died.
    pub player: String,
    /// Name of whoever dealt the final blow.
    pub killer: String,
}

impl PlayerDeath {
    /// Create a death signal.
    pub fn new(player: impl Into<String>, killer: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            killer: killer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_message_names_both_sides() {
        let death = PlayerDeath::new("Aria", "Syndicate Member");
        assert_eq!(death.to_string(), "Aria was slain by Syndicate Member");
    }

    #[test]
    fn missing_section_message() {
        let err = CoreError::MissingSection("npcs");
        assert_eq!(err.to_string(), "document has no \"npcs\" object");
    }
}
