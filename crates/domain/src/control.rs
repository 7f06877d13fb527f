//! Control record: the singleton holding the manual target and pause deadline.

use serde::{Deserialize, Serialize};

use crate::pump::PumpCommand;
use crate::time::Timestamp;

/// The one control record of the installation.
///
/// `pause_until` is always in the future when it is written; once the clock
/// reaches it the pause counts as expired and reconciliation clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlState {
    /// Last explicit ON/OFF a human asked for.
    pub manual_target: PumpCommand,
    /// While present and in the future the pump is held OFF.
    pub pause_until: Option<Timestamp>,
}

impl ControlState {
    #[must_use]
    pub fn new(manual_target: PumpCommand) -> Self {
        Self {
            manual_target,
            pause_until: None,
        }
    }

    #[must_use]
    pub fn paused_until(mut self, until: Timestamp) -> Self {
        self.pause_until = Some(until);
        self
    }

    /// The pause deadline if it has been reached at `now`.
    #[must_use]
    pub fn expired_pause(&self, now: Timestamp) -> Option<Timestamp> {
        self.pause_until.filter(|until| now >= *until)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause_until.is_some()
    }

    /// Resolve the pump command for a state whose expired pause has already
    /// been cleared.
    ///
    /// Precedence, lowest first: manual target, a matching schedule, a pause.
    #[must_use]
    pub fn resolve(&self, schedule_matches: bool) -> PumpCommand {
        let mut decision = self.manual_target;
        if schedule_matches {
            decision = PumpCommand::On;
        }
        if self.is_paused() {
            decision = PumpCommand::Off;
        }
        decision
    }
}
