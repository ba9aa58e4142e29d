//! A single bullet line and its lazily generated, memoised category score.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::items::category::CategoryScore;
use crate::items::diagnostics::{Diagnostic, Diagnostics};

/// Produces the category score for a line's content.
///
/// Called at most once per line; the result is cached on the [`Line`].
pub trait LineScorer: Send + Sync {
    fn score(&self, content: &str) -> CategoryScore;
}

/// Persisted form of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cate_score: Option<CategoryScore>,
}

#[derive(Debug, Clone, Default)]
pub struct Line {
    content: String,
    cate_score: OnceLock<CategoryScore>,
}

impl Line {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            cate_score: OnceLock::new(),
        }
    }

    pub fn with_score(content: impl Into<String>, score: CategoryScore) -> Self {
        Self {
            content: content.into(),
            cate_score: OnceLock::from(score),
        }
    }

    /// An empty stored score counts as "not generated yet".
    pub fn from_record(record: LineRecord) -> Self {
        match record.cate_score {
            Some(score) if !score.is_empty() => Self::with_score(record.content, score),
            _ => Self::new(record.content),
        }
    }

    pub fn to_record(&self) -> LineRecord {
        LineRecord {
            content: self.content.clone(),
            cate_score: self.cate_score.get().cloned(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_score(&self) -> bool {
        self.cate_score.get().is_some()
    }

    /// Returns the cached score, running `scorer` exactly once if there is none.
    pub fn gen_score(&self, scorer: &dyn LineScorer) -> &CategoryScore {
        self.cate_score.get_or_init(|| scorer.score(&self.content))
    }

    /// Same as [`Line::gen_score`], but records a diagnostic when generation was needed.
    /// `index` is the line's position within its item.
    pub fn ensure_score(
        &self,
        index: usize,
        scorer: &dyn LineScorer,
        diagnostics: &mut Diagnostics,
    ) -> &CategoryScore {
        if !self.has_score() {
            diagnostics.push(Diagnostic::ScoreGenerated { line: index });
        }
        self.gen_score(scorer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::items::category::Category;

    struct CountingScorer(AtomicUsize);

    impl LineScorer for CountingScorer {
        fn score(&self, content: &str) -> CategoryScore {
            self.0.fetch_add(1, Ordering::SeqCst);
            BTreeMap::from([(
                Category::Technical,
                BTreeMap::from([(content.to_string(), 1.0)]),
            )])
        }
    }

    #[test]
    fn test_score_is_generated_once() {
        let scorer = CountingScorer(AtomicUsize::new(0));
        let line = Line::new("rust");
        assert!(!line.has_score());

        let first = line.gen_score(&scorer).clone();
        let second = line.gen_score(&scorer).clone();

        assert_eq!(first, second);
        assert_eq!(scorer.0.load(Ordering::SeqCst), 1);
        assert!(line.has_score());
    }

    #[test]
    fn test_ensure_score_reports_generation_only_when_missing() {
        let scorer = CountingScorer(AtomicUsize::new(0));
        let mut diagnostics = Diagnostics::new();

        let fresh = Line::new("go");
        fresh.ensure_score(2, &scorer, &mut diagnostics);
        let cached = Line::with_score("sql", CategoryScore::new());
        cached.ensure_score(3, &scorer, &mut diagnostics);

        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::ScoreGenerated { line: 2 }]
        );
    }

    #[test]
    fn test_empty_stored_score_is_treated_as_missing() {
        let line = Line::from_record(LineRecord {
            content: "Led a team".to_string(),
            cate_score: Some(CategoryScore::new()),
        });
        assert!(!line.has_score());
        assert_eq!(line.to_record().cate_score, None);
    }
}
