// Item builder: length-indexed line selection for resume items.
// Scoring and search are synchronous and CPU-bound; handlers run them on spawn_blocking.

pub mod category;
pub mod diagnostics;
pub mod error;
pub mod handlers;
pub mod item;
pub mod line;
pub mod scoring;
pub mod selector;

pub use category::{Category, CategoryScore, CategoryScoreModel, CategoryWeight, Requirement};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::ItemError;
pub use item::{BuildResult, Item, ItemRecord, SkillsDict, Style};
pub use line::{Line, LineRecord, LineScorer};
pub use scoring::ScoreBreakdown;
