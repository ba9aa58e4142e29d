use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::{FontFamily, PageConfig};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub font: FontFamily,
    pub font_size_pt: u8,
    /// JSON skill vocabulary for the keyword line scorer. Built-in vocabulary when unset.
    pub skill_vocabulary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so parsing can be tested without touching
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let font = match lookup("RESUME_FONT") {
            Some(name) => FontFamily::parse(&name)
                .ok_or_else(|| anyhow!("RESUME_FONT '{name}' is not a supported font"))?,
            None => FontFamily::Inter,
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            font,
            font_size_pt: lookup("RESUME_FONT_SIZE_PT")
                .unwrap_or_else(|| "11".to_string())
                .parse::<u8>()
                .context("RESUME_FONT_SIZE_PT must be a whole number of points")?,
            skill_vocabulary_path: lookup("SKILL_VOCABULARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn page_config(&self) -> PageConfig {
        PageConfig::letter(self.font, self.font_size_pt)
    }
}
