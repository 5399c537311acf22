use std::collections::HashMap;

use tracing::debug;

use super::roles::ROSTER_SIZE;
use super::scorer::ScoredRow;

/// All rows one side contributed to one match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGroup {
    pub match_id: String,
    pub team_id: i32,
    pub rows: Vec<ScoredRow>,
}

#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Complete groups, in order of first appearance.
    pub groups: Vec<TeamGroup>,
    pub incomplete: usize,
}

/// Partitions rows by `(match_id, team_id)` and drops groups without exactly five rows.
pub fn group_by_team(rows: Vec<ScoredRow>) -> Grouping {
    let mut positions: HashMap<(String, i32), usize> = HashMap::new();
    let mut all: Vec<TeamGroup> = Vec::new();

    for scored in rows {
        let key = (scored.row.match_id.clone(), scored.row.team_id);
        let idx = *positions.entry(key).or_insert_with(|| {
            all.push(TeamGroup {
                match_id: scored.row.match_id.clone(),
                team_id: scored.row.team_id,
                rows: Vec::with_capacity(ROSTER_SIZE),
            });
            all.len() - 1
        });
        all[idx].rows.push(scored);
    }

    let mut grouping = Grouping::default();
    for group in all {
        if group.rows.len() == ROSTER_SIZE {
            grouping.groups.push(group);
        } else {
            debug!(
                match_id = %group.match_id,
                team_id = group.team_id,
                rows = group.rows.len(),
                "dropping incomplete team group"
            );
            grouping.incomplete += 1;
        }
    }
    grouping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{full_team, scored};

    #[test]
    fn groups_by_match_and_side_in_first_seen_order() {
        let mut rows = full_team("M2", 200, ["A", "B", "C", "D", "E"], 0.5);
        rows.extend(full_team("M1", 100, ["F", "G", "H", "I", "J"], 0.5));
        rows.swap(0, 7);

        let grouping = group_by_team(rows);
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.incomplete, 0);
        assert_eq!(grouping.groups[0].match_id, "M1");
        assert_eq!(grouping.groups[1].match_id, "M2");
        assert!(grouping.groups.iter().all(|g| g.rows.len() == 5));
    }

    #[test]
    fn short_and_oversized_groups_are_dropped() {
        let mut rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.5);
        rows.pop();
        rows.extend(full_team("M1", 200, ["F", "G", "H", "I", "J"], 0.5));
        rows.push(scored("M1", 200, "TOP", "K", 0.5));
        rows.extend(full_team("M3", 100, ["A", "B", "C", "D", "E"], 0.5));

        let grouping = group_by_team(rows);
        assert_eq!(grouping.incomplete, 2);
        assert_eq!(grouping.groups.len(), 1);
        assert_eq!(grouping.groups[0].match_id, "M3");
    }

    #[test]
    fn same_match_id_different_sides_are_separate() {
        let mut rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.5);
        rows.extend(full_team("M1", 200, ["F", "G", "H", "I", "J"], 0.5));
        let grouping = group_by_team(rows);
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.groups[0].team_id, 100);
        assert_eq!(grouping.groups[1].team_id, 200);
    }
}
