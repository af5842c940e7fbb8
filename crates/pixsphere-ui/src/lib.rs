//! Immediate-mode overlay widgets drawn on top of the 3D view.
#![forbid(unsafe_code)]

mod banner;
mod panel;
mod slider;
mod text;
mod theme;

pub use banner::StatusBanner;
pub use panel::{ControlPanel, PanelEvent, PanelLayout};
pub use slider::{PointerInput, Slider, SliderEvent};
pub use text::{Align, LabelPainter, TextMetrics, label_origin};
pub use theme::{IRect, PanelTheme};
