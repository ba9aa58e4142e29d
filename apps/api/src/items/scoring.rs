//! Score aggregation over selected lines.
//!
//! Two independent paths:
//! - [`requirement_weighted`]: the scalar used to rank candidate subsets. It is a linear
//!   approximation of the true relevance function, which is good enough for ranking.
//! - [`ScoreBreakdown`]: per-category raw totals scaled by the item's own weight, with the
//!   item's bias passed through for the caller to apply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::items::category::{
    skills_in, Category, CategoryScore, CategoryScoreModel, Requirement, SkillScores,
};
use crate::items::diagnostics::{Diagnostic, Diagnostics};

/// Contribution of one line to the approximate score:
/// Σ over categories and skills of `value * requirement[category][skill]`.
///
/// Skills missing from the requirement add nothing and are reported.
pub fn requirement_weighted(
    line: usize,
    score: &CategoryScore,
    requirement: &Requirement,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let mut total = 0.0;
    for category in Category::ALL {
        let wanted = skills_in(requirement, category);
        for (skill, value) in skills_in(score, category) {
            match wanted.get(skill) {
                Some(weight) => total += value * weight,
                None => diagnostics.push(Diagnostic::SkillNotInRequirement {
                    line,
                    category,
                    skill: skill.clone(),
                }),
            }
        }
    }
    total
}

/// Totals for one category: weighted skill sums plus the item's bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub scores: SkillScores,
    pub bias: f64,
}

/// category → totals. Always has all three categories and every skill the requirement names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(pub BTreeMap<Category, CategoryTotals>);

impl ScoreBreakdown {
    /// Zero entry for every skill named in `requirement`, with each category's bias from `model`.
    pub fn seeded(model: &CategoryScoreModel, requirement: &Requirement) -> Self {
        let totals = Category::ALL
            .into_iter()
            .map(|category| {
                let scores = skills_in(requirement, category)
                    .keys()
                    .map(|skill| (skill.clone(), 0.0))
                    .collect();
                let totals = CategoryTotals {
                    scores,
                    bias: model.get(category).bias,
                };
                (category, totals)
            })
            .collect();
        Self(totals)
    }

    /// Adds one line's raw values, scaled by the category weight from `model`.
    /// Only pre-seeded skills accumulate; anything else is reported and skipped.
    pub fn accumulate(
        &mut self,
        line: usize,
        score: &CategoryScore,
        model: &CategoryScoreModel,
        diagnostics: &mut Diagnostics,
    ) {
        for category in Category::ALL {
            let weight = model.get(category).weight;
            let Some(totals) = self.0.get_mut(&category) else {
                continue;
            };
            for (skill, value) in skills_in(score, category) {
                match totals.scores.get_mut(skill) {
                    Some(slot) => *slot += value * weight,
                    None => diagnostics.push(Diagnostic::SkillNotInRequirement {
                        line,
                        category,
                        skill: skill.clone(),
                    }),
                }
            }
        }
    }

    pub fn get(&self, category: Category) -> Option<&CategoryTotals> {
        self.0.get(&category)
    }
}
