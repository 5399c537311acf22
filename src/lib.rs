//! Turns classifier-scored match rows into a deduplicated, ranked set of
//! team composition suggestions and stores them.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod display;
pub mod emitter;
pub mod error;
pub mod storage;

pub use analysis::{run_pass, PassOptions, PassOutcome, PassReport, SuggestionCandidate};
pub use classifier::{Classifier, PrecomputedClassifier};
pub use emitter::SuggestionEmitter;
pub use error::AppError;
pub use storage::{JsonSnapshotStore, SqliteSuggestionStore, SuggestionRecord, SuggestionStore};
