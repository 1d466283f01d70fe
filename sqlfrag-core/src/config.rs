//! Quoting and rendering configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output mode of an [`Assembler`](crate::Assembler)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// `?` placeholders with an ordered parameter list
    #[default]
    Parameterized,
    /// Literal values quoted into the text
    Inline,
}

/// Dialect settings for a [`Quoter`](crate::Quoter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoterConfig {
    /// Character wrapped around identifiers
    pub quote_char: char,
    /// Words never quoted as identifiers (matched case-insensitively)
    pub reserved_words: Vec<String>,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            quote_char: '`',
            reserved_words: vec!["AS".to_string(), "LIKE".to_string()],
        }
    }
}

impl QuoterConfig {
    /// ANSI SQL double-quoted identifiers
    pub fn ansi() -> Self {
        Self {
            quote_char: '"',
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let q = self.quote_char;
        if !q.is_ascii_punctuation()
            || matches!(q, '\'' | '\\' | '_' | '-' | '?' | '(' | ')' | ',' | '*' | '.')
        {
            return Err(Error::invalid_config(format!(
                "'{q}' cannot be used as an identifier quote"
            )));
        }

        for word in &self.reserved_words {
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                return Err(Error::invalid_config(format!(
                    "reserved word '{word}' must be a plain ASCII word"
                )));
            }
        }
        Ok(())
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub quoter: QuoterConfig,
    pub mode: RenderMode,
}

impl Config {
    /// Load and validate a configuration from JSON
    ///
    /// # Examples
    /// ```
    /// use sqlfrag_core::{Config, RenderMode};
    ///
    /// let config = Config::from_json(r#"{ "mode": "inline" }"#).unwrap();
    /// assert_eq!(config.mode, RenderMode::Inline);
    /// assert_eq!(config.quoter.quote_char, '`');
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.quoter.validate()?;
        Ok(config)
    }
}
