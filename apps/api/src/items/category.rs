//! Skill categories, the per-item weight/bias model, and the score maps exchanged with
//! the line scorer and callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three skill dimensions every line and requirement is scored along.
///
/// `Item::get_skills_dict` reports `Relevant` under the key `relevance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Soft,
    Relevant,
}

impl Category {
    /// Fixed iteration order used by every scoring path.
    pub const ALL: [Category; 3] = [Category::Technical, Category::Soft, Category::Relevant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Soft => "soft",
            Category::Relevant => "relevant",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// skill → value within one category.
pub type SkillScores = BTreeMap<String, f64>;

/// category → skill → value, as produced by the line scorer and cached on each line.
pub type CategoryScore = BTreeMap<Category, SkillScores>;

/// category → skill → ideal weight. Supplied per call, never owned by an item.
pub type Requirement = BTreeMap<Category, SkillScores>;

/// Skills of `category` in a category-keyed map, or an empty map when the category is absent.
pub fn skills_in(map: &BTreeMap<Category, SkillScores>, category: Category) -> &SkillScores {
    static EMPTY: SkillScores = BTreeMap::new();
    map.get(&category).unwrap_or(&EMPTY)
}

/// Weight and bias for one category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub weight: f64,
    pub bias: f64,
}

impl Default for CategoryWeight {
    fn default() -> Self {
        Self {
            weight: 1.0,
            bias: 1.0,
        }
    }
}

/// Per-item category model. All three categories are always present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScoreModel {
    #[serde(default)]
    pub technical: CategoryWeight,
    #[serde(default)]
    pub soft: CategoryWeight,
    #[serde(default)]
    pub relevant: CategoryWeight,
}

impl CategoryScoreModel {
    pub fn get(&self, category: Category) -> &CategoryWeight {
        match category {
            Category::Technical => &self.technical,
            Category::Soft => &self.soft,
            Category::Relevant => &self.relevant,
        }
    }
}
