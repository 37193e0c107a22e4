//! Specialist agent state
//!
//! Each agent type keeps its last dice roll and an availability flag.
//! Absence durations are tracked separately on the game state as a
//! per-agent countdown of remaining days.

use crate::models::column::AgentType;
use serde::{Deserialize, Serialize};

/// Per-agent daily state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    #[serde(rename = "type")]
    agent_type: AgentType,

    /// Last dice value rolled (0 until the first roll)
    last_dice: u8,

    available: bool,
}

impl AgentState {
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            last_dice: 0,
            available: true,
        }
    }

    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    pub fn last_dice(&self) -> u8 {
        self.last_dice
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn record_roll(&mut self, dice: u8) {
        self.last_dice = dice;
    }

    pub(crate) fn mark_absent(&mut self) {
        self.available = false;
    }

    pub(crate) fn mark_available(&mut self) {
        self.available = true;
    }
}
