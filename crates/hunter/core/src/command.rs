use std::str::FromStr;

/// Chat commands the agent reacts to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChatCommand {
    /// Withdraw supplies from the nearest container.
    Restock,
    /// Store general inventory in the nearest container.
    Deposit,
    /// Log the nearby entities and report how many there are.
    Scan,
    /// Guard the speaker's current position.
    Guard,
    Stop,
    /// Engage the nearest valid target right away.
    Attack,
    Hunt,
    /// Walk to the speaker.
    Come,
}

impl ChatCommand {
    /// Parses a whole chat message. Anything other than a bare command word is ignored.
    pub fn parse(message: &str) -> Option<Self> {
        Self::from_str(message.trim()).ok()
    }

    /// Whether the command runs under the exclusion gate.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Restock | Self::Deposit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_words() {
        assert_eq!(ChatCommand::parse("guard"), Some(ChatCommand::Guard));
        assert_eq!(ChatCommand::parse("  Restock\n"), Some(ChatCommand::Restock));
        assert_eq!(ChatCommand::parse("come"), Some(ChatCommand::Come));
    }

    #[test]
    fn ignores_sentences_and_unknown_words() {
        assert_eq!(ChatCommand::parse("please guard"), None);
        assert_eq!(ChatCommand::parse("dance"), None);
        assert_eq!(ChatCommand::parse(""), None);
    }

    #[test]
    fn only_container_commands_are_exclusive() {
        assert!(ChatCommand::Deposit.is_exclusive());
        assert!(!ChatCommand::Attack.is_exclusive());
    }
}
