// Core matching pipeline: pure computation, no I/O.
pub mod catalog;
pub mod engine;
pub mod normalizer;
pub mod projection;
pub mod schema;
pub mod scoring;
pub mod selector;

pub use catalog::{questions_for, DimensionCategory, QuestionDef, QuestionKind};
pub use engine::{MatchEngine, MatchError};
pub use normalizer::{extract_boost_tags, normalize, NormalizeError};
pub use projection::{project, ProjectionSettings};
pub use schema::DimensionSchema;
pub use scoring::{score, CategoryWeights};
pub use selector::{select_matches, ScoredCandidate, SelectError};
