// Layout metrics used to estimate how tall a rendered item is.
// Estimates are in printed text lines at the configured font and text width.

pub mod font_metrics;

pub use font_metrics::{FontFamily, FontMetrics, PageConfig};
