//! Seed deck
//!
//! The twenty automotive-software cards every new game starts with.

use crate::models::card::{Card, Category, Priority};

/// Authored seed card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub effort: u32,
    pub value: i64,
}

const fn seed(
    id: &'static str,
    title: &'static str,
    effort: u32,
    value: i64,
    priority: Priority,
    category: Category,
    description: &'static str,
) -> SeedCard {
    SeedCard {
        id,
        title,
        description,
        category,
        priority,
        effort,
        value,
    }
}

use Category::{Bug, Feature, Improvement, TechDebt};
use Priority::{High, Low, Medium, Urgent};

pub const SAMPLE_CARDS: [SeedCard; 20] = [
    seed("C001", "Instrument Cluster", 3, 200, Medium, Feature, "Build the vehicle instrument cluster"),
    seed("C002", "ECU Update", 5, 500, High, Feature, "Update the control unit firmware"),
    seed("C003", "ABS Sensor Fix", 2, 150, Urgent, Bug, "Fix incorrect ABS sensor readings"),
    seed("C004", "Battery Optimization", 6, 600, High, Improvement, "Reduce system battery drain"),
    seed("C005", "Infotainment UI", 4, 300, Medium, Feature, "New infotainment system interface"),
    seed("C006", "OBD Diagnostics", 3, 250, Low, Feature, "OBD-II diagnostics system"),
    seed("C007", "Telemetry Refactor", 4, 180, Low, TechDebt, "Refactor legacy telemetry code"),
    seed("C008", "Rear Camera", 2, 200, Medium, Feature, "Rear camera integration"),
    seed("C009", "Bluetooth Bug", 1, 100, High, Bug, "Bluetooth connection drops intermittently"),
    seed("C010", "Improved GPS", 5, 400, Medium, Improvement, "Improve GPS accuracy"),
    seed("C011", "Climate Control", 4, 350, Medium, Feature, "Smart climate control system"),
    seed("C012", "Collision Warning", 7, 700, High, Feature, "Forward collision warning system"),
    seed("C013", "USB Code Cleanup", 2, 80, Low, TechDebt, "Clean up the USB driver code"),
    seed("C014", "Digital Speedometer", 3, 220, Medium, Feature, "New HD digital speedometer"),
    seed("C015", "Airbag Fault", 2, 300, Urgent, Bug, "Fix airbag sensor false positive"),
    seed("C016", "Energy Saving", 5, 450, Medium, Improvement, "Advanced energy saving mode"),
    seed("C017", "Voice Assistant", 8, 800, Low, Feature, "Voice assistant integration"),
    seed("C018", "OTA Updates", 6, 550, High, Feature, "Over-the-air update system"),
    seed("C019", "Diagnostic Logs", 3, 150, Low, TechDebt, "Improve diagnostic logging"),
    seed("C020", "Parking Assist", 5, 500, Medium, Feature, "Automatic parking assistant"),
];

impl SeedCard {
    /// Build the backlog card for day 0
    ///
    /// Priority comes from value-based criticality; the authored priority is
    /// kept as the original priority.
    pub fn to_card(&self) -> Card {
        Card::new(self.id.to_string(), self.title.to_string(), self.effort, self.value, 0)
            .with_description(self.description)
            .with_category(self.category)
            .with_original_priority(self.priority)
    }
}

/// Fresh copies of the seed deck, all in the backlog
pub fn seed_cards() -> Vec<Card> {
    SAMPLE_CARDS.iter().map(SeedCard::to_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column::Column;
    use std::collections::HashSet;

    #[test]
    fn test_seed_deck_is_unique_backlog() {
        let cards = seed_cards();
        assert_eq!(cards.len(), 20);
        let ids: HashSet<_> = cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 20);
        assert!(cards.iter().all(|c| c.current_column() == Column::Backlog));
    }

    #[test]
    fn test_seed_priority_from_value() {
        let cards = seed_cards();
        // C017 was authored low but is worth 800
        let voice = cards.iter().find(|c| c.id() == "C017").unwrap();
        assert_eq!(voice.priority(), Priority::Urgent);
        assert_eq!(voice.original_priority(), Priority::Low);
        assert_eq!(voice.deadline(), 6);
    }
}
