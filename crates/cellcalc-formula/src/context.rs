//! Parsing context and engine settings

use cellcalc_core::Culture;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::FormulaResult;

/// User-facing engine configuration
///
/// ```rust
/// use cellcalc_formula::{EngineSettings, ParsingContext};
///
/// let settings: EngineSettings = serde_json::from_str(r#"{ "culture": "de-DE" }"#).unwrap();
/// let ctx = ParsingContext::from_settings(&settings).unwrap();
/// assert_eq!(ctx.culture().name(), "de-DE");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Culture name, e.g. `"en-US"`
    pub culture: String,
    /// Pins NOW() and TODAY() to a fixed instant
    pub fixed_now: Option<NaiveDateTime>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            culture: "en-US".to_string(),
            fixed_now: None,
        }
    }
}

/// Per-evaluation state handed to every function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsingContext {
    culture: Culture,
    fixed_now: Option<NaiveDateTime>,
}

impl ParsingContext {
    /// Create a context for the given culture
    pub fn new(culture: Culture) -> Self {
        Self {
            culture,
            fixed_now: None,
        }
    }

    /// Create a simple en-US context (for testing)
    pub fn simple() -> Self {
        Self::new(Culture::EN_US)
    }

    /// Resolve settings into a context
    pub fn from_settings(settings: &EngineSettings) -> FormulaResult<Self> {
        let culture = Culture::lookup(&settings.culture)?;
        Ok(Self {
            culture,
            fixed_now: settings.fixed_now,
        })
    }

    /// Replace the culture
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Pin the current time
    pub fn with_fixed_now(mut self, now: NaiveDateTime) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Active culture
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Current local time, or the pinned instant
    pub fn now(&self) -> NaiveDateTime {
        self.fixed_now
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

impl Default for ParsingContext {
    fn default() -> Self {
        Self::simple()
    }
}
