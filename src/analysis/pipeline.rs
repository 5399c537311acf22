//! One aggregation pass: scored rows in, ranked suggestions out.
//!
//! Scoring → grouping → role resolution + key → aggregation → dedup/rank.
//! Nothing here touches storage; persistence is the emitter's job.

use tracing::{debug, info};

use super::aggregate::{strengths_narrative, TeamStats};
use super::grouping::{group_by_team, TeamGroup};
use super::recommender::{Offer, SuggestionCandidate, SuggestionRanker};
use super::roles::{normalize_role_label, resolve_roster};
use super::scorer::score_rows;
use super::team_key::TeamKey;
use crate::classifier::Classifier;
use crate::config::{Config, DEFAULT_SUGGESTION_LIMIT};
use crate::dataset::CompositionRow;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOptions {
    pub limit: usize,
    pub narratives: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        PassOptions {
            limit: DEFAULT_SUGGESTION_LIMIT,
            narratives: true,
        }
    }
}

impl From<&Config> for PassOptions {
    fn from(config: &Config) -> Self {
        PassOptions {
            limit: config.limit,
            narratives: config.narratives,
        }
    }
}

/// Diagnostic counters for a pass. Filtered groups never abort the pass, they end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub rows_scored: usize,
    pub unknown_champions: usize,
    pub complete_groups: usize,
    pub incomplete_groups: usize,
    pub unresolved_groups: usize,
    pub distinct_keys: usize,
    pub replaced: usize,
    pub kept: usize,
    pub emitted: usize,
}

#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub suggestions: Vec<SuggestionCandidate>,
    pub report: PassReport,
}

pub fn run_pass(
    rows: Vec<CompositionRow>,
    classifier: &dyn Classifier,
    options: &PassOptions,
) -> Result<PassOutcome, AppError> {
    let batch = score_rows(rows, classifier)?;
    let mut report = PassReport {
        rows_scored: batch.rows.len(),
        unknown_champions: batch.unknown_champions,
        ..PassReport::default()
    };

    let grouping = group_by_team(batch.rows);
    report.complete_groups = grouping.groups.len();
    report.incomplete_groups = grouping.incomplete;

    let suggestions = rank_groups(&grouping.groups, options, &mut report);

    info!(
        rows = report.rows_scored,
        groups = report.complete_groups,
        incomplete = report.incomplete_groups,
        unresolved = report.unresolved_groups,
        distinct = report.distinct_keys,
        emitted = report.emitted,
        "aggregation pass finished"
    );

    Ok(PassOutcome {
        suggestions,
        report,
    })
}

/// Resolves, aggregates and deduplicates complete groups, then keeps the top `limit`.
pub fn rank_groups(
    groups: &[TeamGroup],
    options: &PassOptions,
    report: &mut PassReport,
) -> Vec<SuggestionCandidate> {
    let mut ranker = SuggestionRanker::new();

    for group in groups {
        match build_candidate(group, options.narratives) {
            Some(candidate) => {
                let key = candidate.key.clone();
                if ranker.offer(candidate) == Offer::Replaced {
                    debug!(
                        champions = key.champions(),
                        role = key.role(),
                        "higher-confidence duplicate replaced earlier candidate"
                    );
                }
            }
            None => {
                debug!(
                    match_id = %group.match_id,
                    team_id = group.team_id,
                    "group does not resolve to five distinct champions"
                );
                report.unresolved_groups += 1;
            }
        }
    }

    let stats = ranker.stats();
    report.distinct_keys = ranker.len();
    report.replaced = stats.replaced;
    report.kept = stats.kept;

    let ranked = ranker.into_ranked(options.limit);
    report.emitted = ranked.len();
    ranked
}

pub fn build_candidate(group: &TeamGroup, narratives: bool) -> Option<SuggestionCandidate> {
    let resolved = resolve_roster(group)?;
    let representative = &resolved.representative.row;
    let suggested_champion = representative.champion_id.clone();
    let role = normalize_role_label(&representative.role);
    let key = TeamKey::new(&resolved.roster, &role);
    let stats = TeamStats::from_group(group);

    let strengths = narratives.then(|| strengths_narrative(&suggested_champion, &role));

    Some(SuggestionCandidate {
        key,
        suggested_champion,
        team_champions: resolved.roster,
        enemy_champions: stats.enemy_sample.clone(),
        role,
        confidence: stats.mean_confidence,
        sample_count: stats.sample_count,
        win_rate: stats.win_rate(),
        reasoning: stats.reasoning(),
        strengths,
        weaknesses: None,
        playstyle: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{full_team, group};

    #[test]
    fn candidate_uses_top_row_for_role_and_champion() {
        let mut rows = full_team("M1", 100, ["Garen", "Vi", "Ahri", "Jinx", "Lulu"], 0.2);
        rows[3].confidence = 0.9;
        let candidate = build_candidate(&group(rows), true).unwrap();
        assert_eq!(candidate.role, "BOTTOM");
        assert_eq!(candidate.suggested_champion, "Jinx");
        assert_eq!(candidate.key.to_string(), "Ahri|Garen|Jinx|Lulu|Vi@BOTTOM");
        assert_eq!(candidate.team_champions, ["Garen", "Vi", "Ahri", "Jinx", "Lulu"]);
        assert!(candidate.strengths.unwrap().contains("Jinx in the BOTTOM role"));
        assert!(candidate.weaknesses.is_none());
    }

    #[test]
    fn narratives_can_be_disabled() {
        let rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.5);
        let candidate = build_candidate(&group(rows), false).unwrap();
        assert!(candidate.strengths.is_none());
        assert!(candidate.playstyle.is_none());
    }

    #[test]
    fn unresolved_groups_are_counted() {
        let mut rows = full_team("M1", 100, ["A", "B", "C", "D", "E"], 0.5);
        rows[1].row.champion_id = "A".to_string();
        let mut report = PassReport::default();
        let ranked = rank_groups(&[group(rows)], &PassOptions::default(), &mut report);
        assert!(ranked.is_empty());
        assert_eq!(report.unresolved_groups, 1);
        assert_eq!(report.emitted, 0);
    }
}
