//! Precis Core Library
//!
//! Platform-agnostic value model and interaction logic for Precis draggable
//! dials, faders and toggles.

pub mod defaults;
pub mod dispatch;
pub mod input;
pub mod interaction;
pub mod listener;
pub mod math;
pub mod registry;
pub mod tuning;
pub mod widget;

pub use dispatch::{OutputDispatcher, OutputEvent, SubscriptionId};
pub use input::{Activation, KeyInput, Modifiers, MouseButton};
pub use interaction::InteractionManager;
pub use listener::{HeadlessHost, HostCall, ListenerManager, PointerHost, PointerOwner};
pub use registry::Registry;
pub use tuning::DragTuning;
pub use widget::{
    InteractionPhase, PressBehavior, SettingsError, SettingsResult, StateFlags, Taper, ValueMapping, Widget,
    WidgetKind, WidgetRect, WidgetSettings, WidgetVariant,
};
