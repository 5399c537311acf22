use std::collections::BTreeSet;

use super::grouping::TeamGroup;
use super::roles::ROSTER_SIZE;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub mean_confidence: f64,
    pub sample_count: usize,
    pub wins: usize,
    pub enemy_sample: Vec<String>, // sorted, at most five
}

impl TeamStats {
    pub fn from_group(group: &TeamGroup) -> Self {
        let sample_count = group.rows.len();
        let wins = group.rows.iter().filter(|r| r.row.win).count();
        let total_confidence: f64 = group.rows.iter().map(|r| r.confidence).sum();
        let mean_confidence = if sample_count == 0 {
            0.0
        } else {
            total_confidence / sample_count as f64
        };

        TeamStats {
            mean_confidence,
            sample_count,
            wins,
            enemy_sample: enemy_sample(group),
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            self.wins as f64 / self.sample_count as f64
        }
    }

    pub fn reasoning(&self) -> String {
        format!(
            "Based on {} similar games · {:.1}% observed win rate.",
            self.sample_count,
            self.win_rate() * 100.0
        )
    }
}

/// Union of every enemy the rows declared, deduplicated and sorted, capped at five.
///
/// Rows of one side can disagree about the opposing roster, so this is a sample.
pub fn enemy_sample(group: &TeamGroup) -> Vec<String> {
    let pool: BTreeSet<&str> = group
        .rows
        .iter()
        .flat_map(|r| r.row.enemies.iter().map(String::as_str))
        .collect();

    pool.into_iter()
        .take(ROSTER_SIZE)
        .map(str::to_string)
        .collect()
}

pub fn strengths_narrative(champion: &str, role: &str) -> String {
    format!(
        "Observed synergy around {} in the {} role. The model predicts a high chance of success in this context.",
        champion, role
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{full_team, group};

    #[test]
    fn mean_confidence_and_win_rate() {
        let mut rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.0);
        for (idx, r) in rows.iter_mut().enumerate() {
            r.confidence = 0.1 * (idx + 1) as f64;
            r.row.win = idx < 3;
        }
        let stats = TeamStats::from_group(&group(rows));
        assert!((stats.mean_confidence - 0.3).abs() < 1e-12);
        assert_eq!(stats.sample_count, 5);
        assert_eq!(stats.wins, 3);
        assert!((stats.win_rate() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn reasoning_embeds_count_and_rate() {
        let stats = TeamStats {
            mean_confidence: 0.5,
            sample_count: 5,
            wins: 2,
            enemy_sample: Vec::new(),
        };
        assert_eq!(
            stats.reasoning(),
            "Based on 5 similar games · 40.0% observed win rate."
        );
    }

    #[test]
    fn enemy_sample_is_deduplicated_sorted_and_capped() {
        let mut rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.5);
        rows[0].row.enemies = ["Zed", "Lux", "Ezreal", "Nami", "Sion"].map(String::from);
        rows[1].row.enemies = ["Ashe", "Lux", "Ezreal", "Nami", "Sion"].map(String::from);
        let sample = enemy_sample(&group(rows));
        assert_eq!(sample, ["Ashe", "Ezreal", "Lux", "Nami", "Sion"]);
    }
}
