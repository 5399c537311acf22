#![allow(dead_code)]

use league_suggest::dataset::CompositionRow;
use league_suggest::PrecomputedClassifier;

pub const ROLES: [&str; 5] = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];

pub fn team_rows(
    match_id: &str,
    team_id: i32,
    champions: [&str; 5],
    wins: usize,
) -> Vec<CompositionRow> {
    champions
        .iter()
        .enumerate()
        .map(|(idx, champion)| {
            let allies: Vec<String> = champions
                .iter()
                .filter(|c| *c != champion)
                .map(|c| c.to_string())
                .collect();
            CompositionRow {
                match_id: match_id.to_string(),
                team_id,
                role: ROLES[idx].to_string(),
                champion_id: champion.to_string(),
                win: idx < wins,
                allies: [
                    allies[0].clone(),
                    allies[1].clone(),
                    allies[2].clone(),
                    allies[3].clone(),
                ],
                enemies: ["Sion", "Lux", "Ezreal", "Nami", "Zed"].map(String::from),
                queue_id: Some(420),
                patch: Some("14.3".to_string()),
                game_duration: Some(1800),
            }
        })
        .collect()
}

/// Builds a classifier whose probability for each row's own champion is `confidences[i]`.
pub fn classifier_for(
    rows: &[CompositionRow],
    classes: &[&str],
    confidences: &[f64],
) -> PrecomputedClassifier {
    assert_eq!(rows.len(), confidences.len());
    let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
    let matrix = rows
        .iter()
        .zip(confidences)
        .map(|(row, confidence)| {
            classes
                .iter()
                .map(|label| if *label == row.champion_id { *confidence } else { 0.0 })
                .collect()
        })
        .collect();
    PrecomputedClassifier::new(classes, matrix)
}

pub fn champion_pool() -> Vec<String> {
    (0..20).map(|i| format!("C{:02}", i)).collect()
}
