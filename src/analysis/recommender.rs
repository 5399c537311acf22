use std::collections::HashMap;

use super::team_key::TeamKey;

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionCandidate {
    pub key: TeamKey,
    pub team_champions: Vec<String>,
    pub enemy_champions: Vec<String>,
    pub role: String,
    pub suggested_champion: String,
    pub confidence: f64,
    pub sample_count: usize,
    pub win_rate: f64,
    pub reasoning: String,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub playstyle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Inserted,
    Replaced,
    Kept,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankerStats {
    pub inserted: usize,
    pub replaced: usize,
    pub kept: usize,
}

/// Best candidate per team key for one aggregation pass.
///
/// Slots keep the order in which keys were first seen, so equal-confidence
/// candidates rank in a stable order for a given input order.
#[derive(Debug, Default)]
pub struct SuggestionRanker {
    slots: HashMap<TeamKey, usize>,
    candidates: Vec<SuggestionCandidate>,
    stats: RankerStats,
}

impl SuggestionRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the candidate unless an equal key already holds a higher or equal confidence.
    pub fn offer(&mut self, candidate: SuggestionCandidate) -> Offer {
        let existing = self.slots.get(&candidate.key).copied();
        let outcome = match existing {
            None => {
                self.slots.insert(candidate.key.clone(), self.candidates.len());
                self.candidates.push(candidate);
                Offer::Inserted
            }
            Some(slot) if candidate.confidence > self.candidates[slot].confidence => {
                self.candidates[slot] = candidate;
                Offer::Replaced
            }
            Some(_) => Offer::Kept,
        };

        match outcome {
            Offer::Inserted => self.stats.inserted += 1,
            Offer::Replaced => self.stats.replaced += 1,
            Offer::Kept => self.stats.kept += 1,
        }
        outcome
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn stats(&self) -> RankerStats {
        self.stats
    }

    pub fn get(&self, key: &TeamKey) -> Option<&SuggestionCandidate> {
        self.slots.get(key).map(|&slot| &self.candidates[slot])
    }

    /// Highest confidence first, truncated to `limit`.
    pub fn into_ranked(self, limit: usize) -> Vec<SuggestionCandidate> {
        let mut ranked = self.candidates;
        // sort_by is stable: ties stay in first-seen key order
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked.truncate(limit);
        ranked
    }
}
