//! Approximate font metrics for estimating wrapped line counts.
//!
//! Widths are in em units relative to the font size. Characters are bucketed into narrow,
//! regular, and wide classes rather than measured glyph by glyph; item heights only need
//! to be comparable across variants of the same item, not exact.

use serde::{Deserialize, Serialize};

/// Inches of usable text width on US letter with 1" side margins.
const TEXT_WIDTH_IN: f32 = 6.5;
/// TeX points per inch.
const PT_PER_IN: f32 = 72.27;

/// Resume font families supported by the LaTeX templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Humanist sans-serif.
    Inter,
    /// Old-style serif, roughly 85% of Inter's width.
    EbGaramond,
    /// Traditional TeX font, roughly 90% of Inter's width.
    ComputerModern,
}

impl FontFamily {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "inter" => Some(FontFamily::Inter),
            "eb_garamond" | "ebgaramond" | "garamond" => Some(FontFamily::EbGaramond),
            "computer_modern" | "computermodern" | "cm" => Some(FontFamily::ComputerModern),
            _ => None,
        }
    }

    pub fn metrics(&self) -> &'static FontMetrics {
        match self {
            FontFamily::Inter => &INTER,
            FontFamily::EbGaramond => &EB_GARAMOND,
            FontFamily::ComputerModern => &COMPUTER_MODERN,
        }
    }
}

/// Page parameters for height estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: u8,
    /// Usable text width in em at `font_size_pt`.
    pub text_width_em: f32,
}

impl PageConfig {
    /// US letter, 1" margins. 11pt gives 6.5 × 72.27 / 11 ≈ 42.7em.
    pub fn letter(font: FontFamily, font_size_pt: u8) -> Self {
        let size = f32::from(font_size_pt.max(1));
        Self {
            font,
            font_size_pt,
            text_width_em: TEXT_WIDTH_IN * PT_PER_IN / size,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::letter(FontFamily::Inter, 11)
    }
}

pub struct FontMetrics {
    pub narrow: f32,
    pub regular: f32,
    pub wide: f32,
    pub uppercase: f32,
    pub space: f32,
}

impl FontMetrics {
    fn char_width(&self, c: char) -> f32 {
        match c {
            ' ' => self.space,
            'i' | 'j' | 'l' | 't' | 'f' | 'r' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|'
            | '(' | ')' | '[' | ']' => self.narrow,
            'm' | 'w' | 'M' | 'W' | '@' | '%' => self.wide,
            'A'..='Z' => self.uppercase,
            _ => self.regular,
        }
    }

    /// Width of `s` in em.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Printed lines `s` occupies with greedy word wrap at `config.text_width_em`.
    /// A single word wider than the line still counts as one line.
    pub fn estimated_lines(&self, s: &str, config: &PageConfig) -> u32 {
        let mut lines = 0u32;
        let mut current = 0.0_f32;
        for word in s.split_whitespace() {
            let width = self.measure_str(word);
            if lines == 0 {
                lines = 1;
                current = width;
            } else if current + self.space + width > config.text_width_em {
                lines += 1;
                current = width;
            } else {
                current += self.space + width;
            }
        }
        lines
    }
}

static INTER: FontMetrics = FontMetrics {
    narrow: 0.27,
    regular: 0.54,
    wide: 0.82,
    uppercase: 0.64,
    space: 0.25,
};

static EB_GARAMOND: FontMetrics = FontMetrics {
    narrow: 0.23,
    regular: 0.46,
    wide: 0.70,
    uppercase: 0.55,
    space: 0.21,
};

static COMPUTER_MODERN: FontMetrics = FontMetrics {
    narrow: 0.25,
    regular: 0.49,
    wide: 0.75,
    uppercase: 0.58,
    space: 0.23,
};
