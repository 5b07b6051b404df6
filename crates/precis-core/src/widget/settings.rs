//! Construction settings and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::WidgetKind;
use super::base::{Taper, WidgetRect};
use crate::defaults;

/// Rejected widget settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("Widget height must be a positive number, got {0}")]
    InvalidHeight(f64),
    #[error("Taper max ({max}) must not be below taper min ({min})")]
    InvertedTaper { min: f64, max: f64 },
    #[error("Taper fine step must be positive, got {0}")]
    InvalidFineStep(f64),
    #[error("Widget id must not be empty")]
    EmptyId,
    #[error("Widget id '{id}' is not namespaced as '{kind}.*'")]
    IdNamespace { id: String, kind: &'static str },
    #[error("Unknown widget kind: {0}")]
    UnknownKind(String),
    #[error("Settings parse error: {0}")]
    Parse(String),
}

/// Result type for settings validation.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Partial rect; missing fields fall back to the kind's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectSettings {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Partial taper; missing fields fall back to [`defaults::TAPER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaperSettings {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub fine_step: Option<f64>,
}

/// Settings supplied by the host when it creates a widget.
///
/// Every field is optional and merged onto per-kind defaults. Dial-only
/// fields (`pointer`, `tick_marks`, `sweep`, `offset`) are ignored by other
/// kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetSettings {
    pub id: Option<String>,
    pub label: Option<String>,
    pub current_value: Option<f64>,
    pub rect: RectSettings,
    pub scale: Option<f64>,
    pub rx: Option<f64>,
    pub taper: TaperSettings,
    pub background: Option<String>,
    pub layer: Option<i32>,
    pub pointer: Option<bool>,
    pub tick_marks: Option<bool>,
    pub sweep: Option<f64>,
    pub offset: Option<f64>,
}

impl WidgetSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_current_value(mut self, value: f64) -> Self {
        self.current_value = Some(value);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.rect.height = Some(height);
        self
    }

    pub fn with_rect(mut self, rect: WidgetRect) -> Self {
        self.rect = RectSettings {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        };
        self
    }

    pub fn with_taper(mut self, taper: Taper) -> Self {
        self.taper = TaperSettings {
            min: Some(taper.min),
            max: Some(taper.max),
            fine_step: Some(taper.fine_step),
        };
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub(crate) fn resolve_id(&self, kind: WidgetKind) -> SettingsResult<String> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => format!("{}.0", kind.tag()),
        };
        if id.is_empty() {
            return Err(SettingsError::EmptyId);
        }
        let namespaced = id
            .strip_prefix(kind.tag())
            .is_some_and(|rest| rest.starts_with('.'));
        if !namespaced {
            return Err(SettingsError::IdNamespace {
                id,
                kind: kind.tag(),
            });
        }
        Ok(id)
    }

    pub(crate) fn resolve_rect(&self, kind: WidgetKind) -> WidgetRect {
        let base = KindDefaults::of(kind).rect;
        WidgetRect {
            x: self.rect.x.unwrap_or(base.x),
            y: self.rect.y.unwrap_or(base.y),
            width: self.rect.width.unwrap_or(base.width),
            height: self.rect.height.unwrap_or(base.height),
        }
    }

    pub(crate) fn resolve_taper(&self) -> Taper {
        let base = defaults::TAPER;
        Taper {
            min: self.taper.min.unwrap_or(base.min),
            max: self.taper.max.unwrap_or(base.max),
            fine_step: self.taper.fine_step.unwrap_or(base.fine_step),
        }
    }
}

/// Per-kind fallback values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KindDefaults {
    pub rect: WidgetRect,
    pub rx: f64,
    pub scale: f64,
    pub background: &'static str,
}

impl KindDefaults {
    pub fn of(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Radial => Self {
                rect: defaults::RECT,
                rx: 0.0,
                scale: defaults::DIAL_SCALE_FACTOR,
                background: defaults::DIAL_BACKGROUND,
            },
            WidgetKind::Fader => Self {
                rect: WidgetRect::new(
                    defaults::X,
                    defaults::Y,
                    defaults::FADER_WIDTH,
                    defaults::FADER_HEIGHT,
                ),
                rx: defaults::FADER_RX,
                scale: defaults::FADER_SCALE_FACTOR,
                background: defaults::FADER_BACKGROUND,
            },
            WidgetKind::Toggle => Self {
                rect: WidgetRect::new(
                    defaults::X,
                    defaults::Y,
                    defaults::BUTTON_WIDTH,
                    defaults::BUTTON_HEIGHT,
                ),
                rx: 0.0,
                scale: defaults::BUTTON_SCALE_FACTOR,
                background: defaults::BUTTON_BACKGROUND,
            },
        }
    }
}
