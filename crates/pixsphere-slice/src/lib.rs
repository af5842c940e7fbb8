//! Merged batch ownership and y-axis cut views over a shell index.
#![forbid(unsafe_code)]

mod scene;
mod view;

pub use scene::{Scene, SceneError};
pub use view::{SliceError, SliceView, signed_slice};
