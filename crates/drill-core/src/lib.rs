//! drill-core: core quiz engine, schemas, and outcome logging.
//!
//! This crate defines the word schemas, the dataset loader, word selection,
//! grading, the outcome logs and the session loop that the `drill` CLI
//! drives.

pub mod config;
pub mod dataset;
pub mod error;
pub mod grading;
pub mod outcome_log;
pub mod schema;
pub mod selector;
pub mod session;
pub mod stats;

pub use config::{load_config_from, DrillConfig};
pub use dataset::{Dataset, WordRecord};
pub use error::DrillError;
pub use grading::{grade, Grade, Outcome};
pub use schema::{builtin_schemas, SelectionMode, WordSchema};
pub use session::{AnswerSource, RoundReporter, Session, SessionEnd};
pub use stats::SessionStats;
