//! Rendering collaborator used by `Item::make_specific` and `Item::build`.

pub mod latex;

use crate::items::Item;

pub use latex::LatexRenderer;

/// Turns a line selection into a renderable artifact and measures item height.
pub trait ItemRenderer {
    type Artifact;

    /// Builds the artifact for `titles` followed by `contents` in the given order.
    /// Title arities other than four are up to the implementation.
    fn item_builder(&self, titles: &[String], contents: &[&str]) -> Self::Artifact;

    /// Height of `item` rendered with exactly `contents`, the selected lines in order.
    fn item_height(&self, item: &Item, contents: &[&str]) -> f64;
}
