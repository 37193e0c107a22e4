//! Board columns and specialist agent types
//!
//! The board is a fixed, ordered sequence of six columns. Three of them are
//! work columns, each staffed by one agent type whose specialty it is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing a column or agent name fails
#[derive(Debug, Error, PartialEq)]
pub enum ParseNameError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown agent type: {0}")]
    UnknownAgent(String),
}

/// One of the six ordered workflow stages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Backlog,
    Ready,
    Analysis,
    Development,
    Testing,
    Deployed,
}

impl Column {
    /// All columns in board order
    pub const ALL: [Column; 6] = [
        Column::Backlog,
        Column::Ready,
        Column::Analysis,
        Column::Development,
        Column::Testing,
        Column::Deployed,
    ];

    /// Columns where specialist effort is applied
    pub const WORK: [Column; 3] = [Column::Analysis, Column::Development, Column::Testing];

    /// Position in the board order (backlog = 0, deployed = 5)
    pub fn index(self) -> usize {
        match self {
            Column::Backlog => 0,
            Column::Ready => 1,
            Column::Analysis => 2,
            Column::Development => 3,
            Column::Testing => 4,
            Column::Deployed => 5,
        }
    }

    /// Column at the given board position
    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    /// The column immediately to the right, if any
    pub fn next(self) -> Option<Column> {
        Column::from_index(self.index() + 1)
    }

    pub fn is_work_column(self) -> bool {
        self.agent().is_some()
    }

    /// Agent type that works cards in this column
    pub fn agent(self) -> Option<AgentType> {
        match self {
            Column::Analysis => Some(AgentType::Analyst),
            Column::Development => Some(AgentType::Developer),
            Column::Testing => Some(AgentType::Tester),
            _ => None,
        }
    }

    /// Machine name, as used in serialized state
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Backlog => "backlog",
            Column::Ready => "ready",
            Column::Analysis => "analysis",
            Column::Development => "development",
            Column::Testing => "testing",
            Column::Deployed => "deployed",
        }
    }

    /// Human-readable name for history entries and reasons
    pub fn display_name(self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::Ready => "Ready",
            Column::Analysis => "Analysis",
            Column::Development => "Development",
            Column::Testing => "Testing",
            Column::Deployed => "Deployed",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Column {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ParseNameError::UnknownColumn(s.to_string()))
    }
}

/// Specialist agent type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Analyst,
    Developer,
    Tester,
}

impl AgentType {
    pub const ALL: [AgentType; 3] = [AgentType::Analyst, AgentType::Developer, AgentType::Tester];

    /// The work column this agent is specialized in
    pub fn specialty_column(self) -> Column {
        match self {
            AgentType::Analyst => Column::Analysis,
            AgentType::Developer => Column::Development,
            AgentType::Tester => Column::Testing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentType::Analyst => "analyst",
            AgentType::Developer => "developer",
            AgentType::Tester => "tester",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgentType::Analyst => "Analyst",
            AgentType::Developer => "Developer",
            AgentType::Tester => "Tester",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AgentType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AgentType::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ParseNameError::UnknownAgent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_matches_index() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(Column::from_index(i), Some(*column));
        }
        assert_eq!(Column::from_index(6), None);
    }

    #[test]
    fn test_next_column() {
        assert_eq!(Column::Backlog.next(), Some(Column::Ready));
        assert_eq!(Column::Testing.next(), Some(Column::Deployed));
        assert_eq!(Column::Deployed.next(), None);
    }

    #[test]
    fn test_work_columns_map_to_specialists() {
        for column in Column::WORK {
            let agent = column.agent().expect("work column has an agent");
            assert_eq!(agent.specialty_column(), column);
        }
        assert!(!Column::Ready.is_work_column());
        assert!(!Column::Deployed.is_work_column());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Development".parse::<Column>(), Ok(Column::Development));
        assert_eq!(" tester ".parse::<AgentType>(), Ok(AgentType::Tester));
        assert_eq!(
            "qa".parse::<Column>(),
            Err(ParseNameError::UnknownColumn("qa".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Column::Deployed).unwrap();
        assert_eq!(json, "\"deployed\"");
        let agent: AgentType = serde_json::from_str("\"analyst\"").unwrap();
        assert_eq!(agent, AgentType::Analyst);
    }
}
