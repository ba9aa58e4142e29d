//! LaTeX renderer for line-based items, targeting the `\resumeSubheading` /
//! `\resumeItem` macros of the resume templates.

use crate::items::Item;
use crate::layout::PageConfig;
use crate::render::ItemRenderer;

/// Number of title fields `\resumeSubheading` takes.
const SUBHEADING_ARITY: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct LatexRenderer {
    pub page: PageConfig,
}

impl LatexRenderer {
    pub fn new(page: PageConfig) -> Self {
        Self { page }
    }

    /// Printed lines taken by the heading: a subheading spans two rows, a bold title one.
    fn heading_lines(titles: &[String]) -> u32 {
        match titles.len() {
            0 => 0,
            SUBHEADING_ARITY => 2,
            _ => 1,
        }
    }
}

impl ItemRenderer for LatexRenderer {
    type Artifact = String;

    fn item_builder(&self, titles: &[String], contents: &[&str]) -> String {
        let mut latex = String::new();

        if titles.len() == SUBHEADING_ARITY {
            latex.push_str(r"\resumeSubheading");
            for title in titles {
                latex.push('{');
                latex.push_str(&escape_latex(title));
                latex.push('}');
            }
            latex.push('\n');
        } else if !titles.is_empty() {
            let joined: Vec<String> = titles.iter().map(|t| escape_latex(t)).collect();
            latex.push_str(&format!("\\textbf{{{}}}\n", joined.join(" | ")));
        }

        if !contents.is_empty() {
            latex.push_str("\\resumeItemListStart\n");
            for content in contents {
                latex.push_str(&format!("    \\resumeItem{{{}}}\n", escape_latex(content)));
            }
            latex.push_str("\\resumeItemListEnd\n");
        }

        latex
    }

    fn item_height(&self, item: &Item, contents: &[&str]) -> f64 {
        let metrics = self.page.font.metrics();
        let body: u32 = contents
            .iter()
            .map(|content| metrics.estimated_lines(content, &self.page))
            .sum();
        f64::from(Self::heading_lines(&item.titles) + body)
    }
}

/// Escapes characters that LaTeX treats specially.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_four_titles_render_subheading_and_items() {
        let renderer = LatexRenderer::default();
        let latex = renderer.item_builder(
            &titles(&["Acme", "Jan 2022 -- Present", "Engineer", "Berlin"]),
            &["Cut p99 latency by 40%", "Led migration"],
        );
        assert_eq!(
            latex,
            "\\resumeSubheading{Acme}{Jan 2022 -- Present}{Engineer}{Berlin}\n\
             \\resumeItemListStart\n\
             \x20   \\resumeItem{Cut p99 latency by 40\\%}\n\
             \x20   \\resumeItem{Led migration}\n\
             \\resumeItemListEnd\n"
        );
    }

    #[test]
    fn test_empty_selection_omits_item_list() {
        let renderer = LatexRenderer::default();
        let latex = renderer.item_builder(&titles(&["A", "B", "C", "D"]), &[]);
        assert!(!latex.contains("resumeItemListStart"));
        assert!(latex.starts_with("\\resumeSubheading"));
    }

    #[test]
    fn test_other_title_arity_uses_bold_heading() {
        let renderer = LatexRenderer::default();
        let latex = renderer.item_builder(&titles(&["Side Project", "2023"]), &["Wrote a parser"]);
        assert!(latex.starts_with("\\textbf{Side Project | 2023}\n"));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_latex("R&D_team #1"), "R\\&D\\_team \\#1");
        assert_eq!(escape_latex("a~b^c"), "a\\textasciitilde{}b\\textasciicircum{}c");
        assert_eq!(escape_latex(r"C:\path"), "C:\\textbackslash{}path");
    }

    fn long_bullet() -> String {
        "Designed and shipped a distributed ingestion pipeline that ".repeat(4)
    }

    #[test]
    fn test_height_grows_with_selected_lines() {
        let renderer = LatexRenderer::default();
        let item = Item {
            titles: titles(&["A", "B", "C", "D"]),
            ..Item::new()
        };
        assert_eq!(renderer.item_height(&item, &[]), 2.0);
        assert_eq!(renderer.item_height(&item, &["Short bullet"]), 3.0);
        assert_eq!(
            renderer.item_height(&item, &["Short bullet", "Another short bullet"]),
            4.0
        );
    }

    #[test]
    fn test_height_measures_the_given_contents_not_the_first_lines() {
        let renderer = LatexRenderer::default();
        let long = long_bullet();
        let wrapped = renderer
            .page
            .font
            .metrics()
            .estimated_lines(&long, &renderer.page);
        assert!(wrapped > 1);

        let item = Item {
            titles: titles(&["A", "B", "C", "D"]),
            ..Item::new()
        };
        assert_eq!(
            renderer.item_height(&item, &[long.as_str()]),
            f64::from(2 + wrapped)
        );
    }
}
