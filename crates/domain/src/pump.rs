//! Pump command: the single `ON` / `OFF` value every decision resolves to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Command sent to the pump, and the manual target a human last asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PumpCommand {
    On,
    #[default]
    Off,
}

impl PumpCommand {
    /// Wire token, `"ON"` or `"OFF"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PumpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PumpCommand {
    type Err = ValidationError;

    /// Accepts the wire tokens case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("on") => Ok(Self::On),
            t if t.eq_ignore_ascii_case("off") => Ok(Self::Off),
            _ => Err(ValidationError::InvalidPumpCommand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        assert_eq!(PumpCommand::default(), PumpCommand::Off);
    }

    #[test]
    fn should_display_wire_tokens() {
        assert_eq!(PumpCommand::On.to_string(), "ON");
        assert_eq!(PumpCommand::Off.to_string(), "OFF");
    }

    #[test]
    fn should_parse_case_insensitively() {
        assert_eq!("on".parse::<PumpCommand>().unwrap(), PumpCommand::On);
        assert_eq!(" Off ".parse::<PumpCommand>().unwrap(), PumpCommand::Off);
    }

    #[test]
    fn should_reject_unknown_token() {
        assert!(matches!(
            "AUTO".parse::<PumpCommand>(),
            Err(ValidationError::InvalidPumpCommand(_))
        ));
    }

    #[test]
    fn should_serialize_as_uppercase_token() {
        assert_eq!(serde_json::to_string(&PumpCommand::On).unwrap(), "\"ON\"");
        let parsed: PumpCommand = serde_json::from_str("\"OFF\"").unwrap();
        assert_eq!(parsed, PumpCommand::Off);
    }
}
