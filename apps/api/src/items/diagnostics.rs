//! Non-fatal data-quality findings collected while scoring an item.
//!
//! Every finding is logged through `tracing` on first occurrence and kept in a
//! [`Diagnostics`] collector so callers can inspect exactly which skills were neglected.
//! Repeats (the same line seen in many candidate subsets) are collapsed.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::items::category::Category;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A line carries a skill the requirement does not mention. It contributed nothing.
    SkillNotInRequirement {
        line: usize,
        category: Category,
        skill: String,
    },
    /// A line had no cached category score and one was generated during scoring.
    ScoreGenerated { line: usize },
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    #[serde(skip)]
    seen: HashSet<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.seen.insert(diagnostic.clone()) {
            return;
        }
        match &diagnostic {
            Diagnostic::SkillNotInRequirement {
                line,
                category,
                skill,
            } => warn!(
                line,
                %category,
                skill = skill.as_str(),
                "Skill not in requirement, neglecting it"
            ),
            Diagnostic::ScoreGenerated { line } => {
                warn!(line, "Line has no category scores, generating them")
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(category, skill)` pairs that were skipped because the requirement lacks them.
    pub fn neglected_skills(&self) -> Vec<(Category, &str)> {
        self.entries
            .iter()
            .filter_map(|d| match d {
                Diagnostic::SkillNotInRequirement {
                    category, skill, ..
                } => Some((*category, skill.as_str())),
                Diagnostic::ScoreGenerated { .. } => None,
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_findings_are_collapsed() {
        let mut diagnostics = Diagnostics::new();
        for _ in 0..3 {
            diagnostics.push(Diagnostic::SkillNotInRequirement {
                line: 1,
                category: Category::Soft,
                skill: "mentoring".to_string(),
            });
        }
        diagnostics.push(Diagnostic::ScoreGenerated { line: 1 });
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.neglected_skills(), vec![(Category::Soft, "mentoring")]);
    }

    #[test]
    fn test_many_distinct_findings_keep_first_seen_order() {
        let mut diagnostics = Diagnostics::new();
        for round in 0..3 {
            for line in (0..500).rev() {
                diagnostics.push(Diagnostic::ScoreGenerated { line });
            }
            assert_eq!(diagnostics.len(), 500, "round {round}");
        }
        let lines: Vec<usize> = diagnostics
            .into_vec()
            .into_iter()
            .map(|d| match d {
                Diagnostic::ScoreGenerated { line } => line,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(lines, (0..500).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::ScoreGenerated { line: 4 });
        let value = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(value, serde_json::json!([{ "kind": "score_generated", "line": 4 }]));
    }
}
