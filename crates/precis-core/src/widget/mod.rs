//! Widget value model.
//!
//! A [`Widget`] is a shared [`WidgetCore`] record (geometry, taper, raw value,
//! state flags) plus a [`WidgetVariant`] carrying kind-specific state. Value
//! mapping is dispatched through the [`ValueMapping`] trait implemented by
//! each variant.

mod base;
mod fader;
mod radial;
mod settings;
mod state;
mod toggle;

pub use base::{format_readout, Taper, WidgetCore, WidgetRect};
pub use fader::FaderState;
pub use radial::RadialState;
pub use settings::{RectSettings, SettingsError, SettingsResult, TaperSettings, WidgetSettings};
pub use state::{InteractionPhase, StateFlags};
pub use toggle::ToggleState;

use std::fmt;
use std::str::FromStr;

use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

use base::validate_height;
use self::settings::KindDefaults;
use crate::math::{as_logic_value, clamp};

/// The three widget kinds. Ids are namespaced by [`WidgetKind::tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "dial", alias = "radial")]
    Radial,
    #[serde(rename = "fader", alias = "slider")]
    Fader,
    #[serde(rename = "toggle", alias = "button")]
    Toggle,
}

impl WidgetKind {
    /// Id namespace, e.g. `"dial"` for ids like `"dial.0"`.
    pub fn tag(&self) -> &'static str {
        match self {
            WidgetKind::Radial => "dial",
            WidgetKind::Fader => "fader",
            WidgetKind::Toggle => "toggle",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WidgetKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dial" | "radial" => Ok(WidgetKind::Radial),
            "fader" | "slider" => Ok(WidgetKind::Fader),
            "toggle" | "button" => Ok(WidgetKind::Toggle),
            other => Err(SettingsError::UnknownKind(other.to_string())),
        }
    }
}

/// What a pointer-down does to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressBehavior {
    /// Start a drag and take pointer ownership.
    Drag,
    /// Act on the press itself and dispatch at once; no drag follows.
    Immediate,
}

/// Per-kind value behavior.
pub trait ValueMapping {
    /// Externally meaningful output value.
    fn mapped_value(&self, core: &WidgetCore) -> f64 {
        core.linear_mapped_value()
    }

    fn press_behavior(&self) -> PressBehavior {
        PressBehavior::Drag
    }
}

/// Kind-specific widget state.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetVariant {
    Radial(RadialState),
    Fader(FaderState),
    Toggle(ToggleState),
}

impl WidgetVariant {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetVariant::Radial(_) => WidgetKind::Radial,
            WidgetVariant::Fader(_) => WidgetKind::Fader,
            WidgetVariant::Toggle(_) => WidgetKind::Toggle,
        }
    }

    fn mapping(&self) -> &dyn ValueMapping {
        match self {
            WidgetVariant::Radial(s) => s,
            WidgetVariant::Fader(s) => s,
            WidgetVariant::Toggle(s) => s,
        }
    }
}

/// One draggable control.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    core: WidgetCore,
    variant: WidgetVariant,
}

impl Widget {
    /// Build a widget from settings merged onto the defaults for `kind`.
    pub fn from_settings(kind: WidgetKind, settings: WidgetSettings) -> SettingsResult<Self> {
        let id = settings.resolve_id(kind)?;
        let rect = settings.resolve_rect(kind);
        validate_height(rect.height)?;
        let taper = settings.resolve_taper();
        taper.validate()?;

        let defaults = KindDefaults::of(kind);
        let current_value = clamp(settings.current_value.unwrap_or(0.0), (0.0, rect.height));

        let variant = match kind {
            WidgetKind::Radial => {
                let base = RadialState::default();
                WidgetVariant::Radial(RadialState::new(
                    settings.pointer.unwrap_or(base.pointer),
                    settings.tick_marks.unwrap_or(base.tick_marks),
                    settings.sweep.unwrap_or(base.sweep),
                    settings.offset.unwrap_or(base.offset),
                ))
            }
            WidgetKind::Fader => WidgetVariant::Fader(FaderState),
            WidgetKind::Toggle => {
                WidgetVariant::Toggle(ToggleState::new(as_logic_value(current_value, false) == 1))
            }
        };

        log::info!("Constructed -> {}", id);

        Ok(Self {
            core: WidgetCore {
                id,
                rect,
                rx: settings.rx.unwrap_or(defaults.rx),
                taper,
                current_value,
                scale: settings.scale.unwrap_or(defaults.scale),
                flags: StateFlags::default(),
                background: settings
                    .background
                    .unwrap_or_else(|| defaults.background.to_string()),
                label: settings.label.unwrap_or_default(),
                layer: settings.layer.unwrap_or(0),
                registry_index: 0,
            },
            variant,
        })
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.variant.kind()
    }

    pub fn core(&self) -> &WidgetCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    pub fn variant(&self) -> &WidgetVariant {
        &self.variant
    }

    pub fn flags(&self) -> StateFlags {
        self.core.flags
    }

    pub fn phase(&self) -> InteractionPhase {
        self.core.phase()
    }

    pub fn press_behavior(&self) -> PressBehavior {
        self.variant.mapping().press_behavior()
    }

    pub fn norm_value(&self) -> f64 {
        self.core.norm_value()
    }

    pub fn mapped_value(&self) -> f64 {
        self.variant.mapping().mapped_value(&self.core)
    }

    /// Display string for the mapped value.
    pub fn rounded_readout(&self) -> String {
        format_readout(self.mapped_value(), self.core.flags.precis)
    }

    /// Pointer angle in degrees; `None` for non-dial widgets.
    pub fn radial_track(&self) -> Option<f64> {
        match &self.variant {
            WidgetVariant::Radial(radial) => Some(radial.radial_track(&self.core)),
            _ => None,
        }
    }

    /// Regenerate the dial's pointer points; `None` for non-dial widgets.
    pub fn spin_pointer(&mut self) -> Option<&[Point]> {
        match &mut self.variant {
            WidgetVariant::Radial(radial) => Some(radial.spin_pointer(&self.core)),
            _ => None,
        }
    }

    pub fn tick_marks(&self) -> Vec<Line> {
        match &self.variant {
            WidgetVariant::Radial(radial) => radial.tick_marks(),
            _ => Vec::new(),
        }
    }

    pub fn as_radial(&self) -> Option<&RadialState> {
        match &self.variant {
            WidgetVariant::Radial(radial) => Some(radial),
            _ => None,
        }
    }

    pub fn as_radial_mut(&mut self) -> Option<&mut RadialState> {
        match &mut self.variant {
            WidgetVariant::Radial(radial) => Some(radial),
            _ => None,
        }
    }

    /// Toggle bit; `None` for non-toggle widgets.
    pub fn toggle_state(&self) -> Option<bool> {
        match &self.variant {
            WidgetVariant::Toggle(toggle) => Some(toggle.state()),
            _ => None,
        }
    }

    /// Flip a toggle and store the new bit as the raw value.
    ///
    /// Returns `false` for non-toggle widgets.
    pub fn press_toggle(&mut self) -> bool {
        match &mut self.variant {
            WidgetVariant::Toggle(toggle) => {
                let bit = toggle.change_state();
                self.core.set_current_value(f64::from(bit));
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_flags(&mut self, flags: StateFlags) {
        self.core.flags = flags;
    }

    pub(crate) fn flags_mut(&mut self) -> &mut StateFlags {
        &mut self.core.flags
    }

    pub(crate) fn set_registry_index(&mut self, index: usize) {
        self.core.registry_index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in [WidgetKind::Radial, WidgetKind::Fader, WidgetKind::Toggle] {
            assert_eq!(kind.tag().parse::<WidgetKind>().unwrap(), kind);
        }
        assert_eq!("slider".parse::<WidgetKind>().unwrap(), WidgetKind::Fader);
        assert_eq!(
            "knob".parse::<WidgetKind>().unwrap_err(),
            SettingsError::UnknownKind("knob".to_string())
        );
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&WidgetKind::Radial).unwrap(), "\"dial\"");
        let kind: WidgetKind = serde_json::from_str("\"radial\"").unwrap();
        assert_eq!(kind, WidgetKind::Radial);
    }

    #[test]
    fn test_press_behavior_per_kind() {
        let toggle = Widget::from_settings(WidgetKind::Toggle, WidgetSettings::new()).unwrap();
        let fader = Widget::from_settings(WidgetKind::Fader, WidgetSettings::new()).unwrap();
        assert_eq!(toggle.press_behavior(), PressBehavior::Immediate);
        assert_eq!(fader.press_behavior(), PressBehavior::Drag);
    }

    #[test]
    fn test_readout_precision_follows_flag() {
        let mut widget = Widget::from_settings(
            WidgetKind::Fader,
            WidgetSettings::new().with_current_value(100.0),
        )
        .unwrap();
        assert_eq!(widget.rounded_readout(), "0.3");
        widget.set_flags(StateFlags::dragging(true));
        assert_eq!(widget.rounded_readout(), "0.333");
    }

    #[test]
    fn test_dial_settings_override_defaults() {
        let settings = WidgetSettings {
            tick_marks: Some(false),
            sweep: Some(180.0),
            ..WidgetSettings::new()
        };
        let widget = Widget::from_settings(WidgetKind::Radial, settings).unwrap();
        let WidgetVariant::Radial(radial) = &widget.variant else {
            panic!("dial should build a radial variant");
        };
        assert!(radial.pointer);
        assert!(!radial.tick_marks);
        assert!((radial.sweep - 180.0).abs() < f64::EPSILON);
        assert!((radial.offset - 230.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_dial_has_no_pointer() {
        let mut widget = Widget::from_settings(WidgetKind::Fader, WidgetSettings::new()).unwrap();
        assert!(widget.spin_pointer().is_none());
        assert!(widget.tick_marks().is_empty());
        assert!(!widget.press_toggle());
    }
}
