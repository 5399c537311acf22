use std::fmt;

use super::grouping::TeamGroup;
use super::scorer::ScoredRow;

pub const ROSTER_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Role {
    /// Slot order used when assembling a roster.
    pub const PRIORITY: [Role; ROSTER_SIZE] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::Bottom,
        Role::Utility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Utility => "UTILITY",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Middle => "Mid",
            Role::Bottom => "ADC",
            Role::Utility => "Support",
        }
    }

    /// Maps raw position labels (and their common aliases) to a canonical slot.
    /// `SOLO`, `DUO` and `NONE` are ambiguous and map to nothing.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TOP" | "TOP_LANE" | "SOLO_TOP" => Some(Role::Top),
            "JUNGLE" | "JUNGLE_LANE" => Some(Role::Jungle),
            "MIDDLE" | "MID" | "MID_LANE" | "MIDDLE_LANE" => Some(Role::Middle),
            "BOTTOM" | "BOT" | "BOT_LANE" | "BOTTOM_LANE" | "ADC" | "AD_CARRY" | "CARRY"
            | "DUO_CARRY" => Some(Role::Bottom),
            "UTILITY" | "SUPPORT" | "DUO_SUPPORT" | "UTILITY_LANE" => Some(Role::Utility),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical name when the label is recognized, otherwise the upper-cased raw label.
pub fn normalize_role_label(raw: &str) -> String {
    match Role::parse(raw) {
        Some(role) => role.as_str().to_string(),
        None => raw.trim().to_ascii_uppercase(),
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedTeam<'a> {
    /// Role-priority order first, then leftover champions by confidence.
    pub roster: Vec<String>,
    /// Highest-confidence row of the group.
    pub representative: &'a ScoredRow,
}

/// Rows of a group ordered by descending confidence; ties keep input order.
pub fn by_confidence(group: &TeamGroup) -> Vec<&ScoredRow> {
    let mut sorted: Vec<&ScoredRow> = group.rows.iter().collect();
    sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    sorted
}

/// Assigns one champion per role slot, then fills the roster with unassigned champions.
///
/// The first row (in confidence order) claiming a role owns that slot. Returns `None`
/// when the group cannot produce exactly five distinct champions.
pub fn resolve_roster(group: &TeamGroup) -> Option<ResolvedTeam<'_>> {
    let sorted = by_confidence(group);
    let representative = *sorted.first()?;

    let mut slots: [Option<&str>; ROSTER_SIZE] = [None; ROSTER_SIZE];
    for row in &sorted {
        let Some(role) = Role::parse(&row.row.role) else {
            continue;
        };
        let slot = &mut slots[role as usize];
        if slot.is_none() {
            *slot = Some(row.row.champion_id.as_str());
        }
    }

    let mut roster: Vec<String> = Vec::with_capacity(ROSTER_SIZE);
    for champion in slots.iter().flatten() {
        if !roster.iter().any(|c| c == champion) {
            roster.push((*champion).to_string());
        }
    }

    for row in &sorted {
        if roster.len() == ROSTER_SIZE {
            break;
        }
        if !roster.iter().any(|c| *c == row.row.champion_id) {
            roster.push(row.row.champion_id.clone());
        }
    }

    if roster.len() != ROSTER_SIZE {
        return None;
    }

    Some(ResolvedTeam {
        roster,
        representative,
    })
}
