pub mod aggregate;
pub mod grouping;
pub mod pipeline;
pub mod recommender;
pub mod roles;
pub mod scorer;
pub mod team_key;

#[cfg(test)]
mod test_support;

pub use pipeline::{run_pass, PassOptions, PassOutcome, PassReport};
pub use recommender::SuggestionCandidate;
