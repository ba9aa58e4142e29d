//! Keyword-based line scorer.
//!
//! Scores each line's content against a skill vocabulary (category → skill → keywords).
//! Deterministic, no LLM call. Per skill:
//! - whole-word keyword hit → 1.0
//! - substring-only keyword hit → 0.6
//! - no hit → skill absent from the line's score
//!
//! The value of a skill is its best keyword strength.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::items::{Category, CategoryScore, LineScorer};

const WHOLE_WORD_STRENGTH: f64 = 1.0;
const SUBSTRING_STRENGTH: f64 = 0.6;

/// category → skill → keywords. A skill with no keywords matches on its own name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillVocabulary(pub BTreeMap<Category, BTreeMap<String, Vec<String>>>);

impl SkillVocabulary {
    /// Loads a vocabulary from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid skill vocabulary JSON in '{}'", path.display()))
    }

    /// Small general-purpose vocabulary used when no file is configured.
    pub fn builtin() -> Self {
        fn group(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
            entries
                .iter()
                .map(|(skill, keywords)| {
                    let keywords = keywords.iter().map(|k| k.to_string()).collect();
                    (skill.to_string(), keywords)
                })
                .collect()
        }

        Self(BTreeMap::from([
            (
                Category::Technical,
                group(&[
                    ("python", &["python", "django", "pandas"]),
                    ("rust", &["rust", "tokio", "cargo"]),
                    ("sql", &["sql", "postgres", "mysql"]),
                    ("cloud", &["aws", "gcp", "azure", "kubernetes"]),
                    ("machine learning", &["machine learning", "pytorch", "tensorflow"]),
                ]),
            ),
            (
                Category::Soft,
                group(&[
                    ("leadership", &["led", "managed", "mentored"]),
                    ("communication", &["presented", "wrote", "documented"]),
                    ("collaboration", &["partnered", "cross-functional", "collaborated"]),
                ]),
            ),
            (
                Category::Relevant,
                group(&[
                    ("impact", &["reduced", "increased", "improved", "saved"]),
                    ("scale", &["million", "billion", "thousands"]),
                ]),
            ),
        ]))
    }
}

pub struct KeywordLineScorer {
    vocabulary: SkillVocabulary,
}

impl KeywordLineScorer {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl LineScorer for KeywordLineScorer {
    fn score(&self, content: &str) -> CategoryScore {
        let haystack = content.to_lowercase();
        let mut result = CategoryScore::new();

        for (category, skills) in &self.vocabulary.0 {
            for (skill, keywords) in skills {
                let strength = if keywords.is_empty() {
                    keyword_strength(&haystack, skill)
                } else {
                    keywords
                        .iter()
                        .map(|k| keyword_strength(&haystack, k))
                        .fold(0.0, f64::max)
                };
                if strength > 0.0 {
                    result
                        .entry(*category)
                        .or_default()
                        .insert(skill.clone(), strength);
                }
            }
        }
        result
    }
}

/// `haystack` must already be lowercase.
fn keyword_strength(haystack: &str, keyword: &str) -> f64 {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return 0.0;
    }
    if contains_word(haystack, &needle) {
        WHOLE_WORD_STRENGTH
    } else if haystack.contains(&needle) {
        SUBSTRING_STRENGTH
    } else {
        0.0
    }
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
