//! Item: a resume content block (heading + bullet lines) and its length-indexed builds.
//!
//! `build` produces one variant per line count, from the empty item up to every line.
//! The layout step downstream picks the highest-scoring variant that fits the space left
//! on the page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::items::category::{skills_in, Category, CategoryScoreModel, Requirement};
use crate::items::diagnostics::Diagnostics;
use crate::items::error::ItemError;
use crate::items::line::{Line, LineRecord, LineScorer};
use crate::items::scoring::{requirement_weighted, ScoreBreakdown};
use crate::items::selector::{best_of_size, binomial};
use crate::render::ItemRenderer;

/// The only record type an item can be rebuilt from.
pub const ITEM_TYPE_TAG: &str = "items";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// How an item is presented. Only line-based items can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    LineBased,
    Paragraph,
}

impl Style {
    /// `"p"` is paragraph; every other code is line-based.
    pub fn from_code(code: &str) -> Self {
        if code == "p" {
            Style::Paragraph
        } else {
            Style::LineBased
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Style::LineBased => "",
            Style::Paragraph => "p",
        }
    }
}

/// Persisted form of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub cate_scores: CategoryScoreModel,
    #[serde(default)]
    pub aux_info: Map<String, Value>,
    #[serde(default)]
    pub paragraph: String,
}

/// One build variant: the best selection of a given size, rendered.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult<A> {
    pub artifact: A,
    pub score: f64,
    pub height: f64,
    /// Selected line indices, ascending.
    pub selection: Vec<usize>,
}

/// Skill names per category across all lines, in first-seen order.
/// `relevance` holds the skills of [`Category::Relevant`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsDict {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub relevance: Vec<String>,
}

impl SkillsDict {
    fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Technical => &mut self.technical,
            Category::Soft => &mut self.soft,
            Category::Relevant => &mut self.relevance,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Item {
    pub titles: Vec<String>,
    pub lines: Vec<Line>,
    pub cate_scores: CategoryScoreModel,
    pub aux_info: Map<String, Value>,
    pub paragraph: String,
    pub style: Style,
}

// ────────────────────────────────────────────────────────────────────────────
// Construction and persistence
// ────────────────────────────────────────────────────────────────────────────

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an item from a raw JSON record.
    ///
    /// The `aux_info.type` tag is checked before anything else is read. Paragraph
    /// records read only `paragraph`; their other fields are never parsed.
    pub fn from_value(value: Value) -> Result<Self, ItemError> {
        let aux_info = value.get("aux_info");
        check_type_tag(
            aux_info
                .and_then(|aux| aux.get("type"))
                .and_then(Value::as_str),
        )?;

        if style_from(aux_info.and_then(|aux| aux.get("style"))) == Style::Paragraph {
            let paragraph = value
                .get("paragraph")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Ok(Self::paragraph_only(paragraph.to_string()));
        }

        let record: ItemRecord = serde_json::from_value(value)?;
        Self::from_record(record)
    }

    pub fn from_record(record: ItemRecord) -> Result<Self, ItemError> {
        check_type_tag(record.aux_info.get("type").and_then(Value::as_str))?;

        let style = style_from(record.aux_info.get("style"));
        if style == Style::Paragraph {
            return Ok(Self::paragraph_only(record.paragraph));
        }

        Ok(Self {
            titles: record.titles,
            lines: record.lines.into_iter().map(Line::from_record).collect(),
            cate_scores: record.cate_scores,
            aux_info: record.aux_info,
            paragraph: String::new(),
            style,
        })
    }

    fn paragraph_only(paragraph: String) -> Self {
        Self {
            paragraph,
            style: Style::Paragraph,
            ..Self::default()
        }
    }

    /// Record for storage. `aux_info` always carries the type tag and the style.
    pub fn to_record(&self) -> ItemRecord {
        let mut aux_info = self.aux_info.clone();
        aux_info.insert("type".to_string(), Value::from(ITEM_TYPE_TAG));

        // Keep an existing line-based code (e.g. a header format letter) when it still
        // maps to the current style.
        let existing = aux_info
            .get("style")
            .and_then(Value::as_str)
            .map(Style::from_code);
        if existing != Some(self.style) {
            aux_info.insert("style".to_string(), Value::from(self.style.code()));
        }

        ItemRecord {
            titles: self.titles.clone(),
            lines: self.lines.iter().map(Line::to_record).collect(),
            cate_scores: self.cate_scores,
            aux_info,
            paragraph: self.paragraph.clone(),
        }
    }
}

fn style_from(code: Option<&Value>) -> Style {
    code.and_then(Value::as_str)
        .map(Style::from_code)
        .unwrap_or_default()
}

/// The record's `aux_info.type` must be [`ITEM_TYPE_TAG`].
fn check_type_tag(found: Option<&str>) -> Result<(), ItemError> {
    let found =
        found.ok_or_else(|| ItemError::MissingInformation("aux_info.type".to_string()))?;
    if found != ITEM_TYPE_TAG {
        return Err(ItemError::TypeMismatch {
            expected: ITEM_TYPE_TAG.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Build
// ────────────────────────────────────────────────────────────────────────────

impl Item {
    /// Builds the best variant of this item for every line count `0..=lines.len()`.
    ///
    /// Results are ordered by cardinality; the first is always the empty item with score 0.
    /// Fails without partial results if the item is paragraph-style or if titles, lines or
    /// the requirement are empty.
    pub fn build<R: ItemRenderer>(
        &self,
        renderer: &R,
        scorer: &dyn LineScorer,
        requirement: &Requirement,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<BuildResult<R::Artifact>>, ItemError> {
        self.ensure_line_based()?;
        if self.titles.is_empty() || self.lines.is_empty() || requirement.is_empty() {
            return Err(ItemError::MissingInformation(
                "titles, lines, or requirement".to_string(),
            ));
        }

        // The score is linear in the lines, so each line's contribution is computed once
        // and every candidate subset is a sum over it.
        let contributions = self.line_contributions(scorer, requirement, diagnostics);
        let n = self.lines.len();

        let mut results = Vec::with_capacity(n + 1);
        for k in 0..=n {
            debug!(cardinality = k, candidates = binomial(n, k), "Selecting lines");
            let best = best_of_size(n, k, |sel| sum_selected(&contributions, sel))
                .ok_or_else(|| ItemError::SelectionOutOfRange { index: k, len: n })?;
            results.push(self.make_specific(best.score, &best.indices, renderer)?);
        }
        Ok(results)
    }

    /// Renders the given selection with a known score.
    ///
    /// Lines appear in ascending index order regardless of the order in `selection`.
    pub fn make_specific<R: ItemRenderer>(
        &self,
        score: f64,
        selection: &[usize],
        renderer: &R,
    ) -> Result<BuildResult<R::Artifact>, ItemError> {
        self.ensure_line_based()?;
        let selection = self.sorted_selection(selection)?;

        let contents: Vec<&str> = selection
            .iter()
            .map(|&i| self.lines[i].content())
            .collect();
        let artifact = renderer.item_builder(&self.titles, &contents);
        let height = renderer.item_height(self, &contents);

        Ok(BuildResult {
            artifact,
            score,
            height,
            selection,
        })
    }

    /// Approximate relevance of a selection against `requirement`. Empty selections score 0.
    pub fn calc_score(
        &self,
        selection: &[usize],
        scorer: &dyn LineScorer,
        requirement: &Requirement,
        diagnostics: &mut Diagnostics,
    ) -> Result<f64, ItemError> {
        self.check_selection(selection)?;
        let mut total = 0.0;
        for &i in selection {
            let score = self.lines[i].ensure_score(i, scorer, diagnostics);
            total += requirement_weighted(i, score, requirement, diagnostics);
        }
        Ok(total)
    }

    /// Per-category totals for a selection, for editing and introspection views.
    ///
    /// Every skill named in `requirement` is present (zero when no line contributes).
    /// Values are scaled by this item's category weights; the item's bias is reported as is.
    pub fn calc_scores(
        &self,
        selection: &[usize],
        scorer: &dyn LineScorer,
        requirement: &Requirement,
        diagnostics: &mut Diagnostics,
    ) -> Result<ScoreBreakdown, ItemError> {
        self.check_selection(selection)?;
        let mut breakdown = ScoreBreakdown::seeded(&self.cate_scores, requirement);
        for &i in selection {
            let score = self.lines[i].ensure_score(i, scorer, diagnostics);
            breakdown.accumulate(i, score, &self.cate_scores, diagnostics);
        }
        Ok(breakdown)
    }

    /// Union of skill names per category over all lines, generating missing line scores.
    pub fn get_skills_dict(&self, scorer: &dyn LineScorer) -> SkillsDict {
        let mut dict = SkillsDict::default();
        for line in &self.lines {
            let score = line.gen_score(scorer);
            for category in Category::ALL {
                let seen = dict.get_mut(category);
                for skill in skills_in(score, category).keys() {
                    if !seen.contains(skill) {
                        seen.push(skill.clone());
                    }
                }
            }
        }
        dict
    }

    fn line_contributions(
        &self,
        scorer: &dyn LineScorer,
        requirement: &Requirement,
        diagnostics: &mut Diagnostics,
    ) -> Vec<f64> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let score = line.ensure_score(i, scorer, diagnostics);
                requirement_weighted(i, score, requirement, diagnostics)
            })
            .collect()
    }

    fn ensure_line_based(&self) -> Result<(), ItemError> {
        match self.style {
            Style::Paragraph => Err(ItemError::ParagraphNotImplemented),
            Style::LineBased => Ok(()),
        }
    }

    fn check_selection(&self, selection: &[usize]) -> Result<(), ItemError> {
        let len = self.lines.len();
        match selection.iter().find(|&&i| i >= len) {
            Some(&index) => Err(ItemError::SelectionOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    fn sorted_selection(&self, selection: &[usize]) -> Result<Vec<usize>, ItemError> {
        self.check_selection(selection)?;
        let mut sorted = selection.to_vec();
        sorted.sort_unstable();
        Ok(sorted)
    }
}

fn sum_selected(contributions: &[f64], selection: &[usize]) -> f64 {
    selection.iter().map(|&i| contributions[i]).sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
