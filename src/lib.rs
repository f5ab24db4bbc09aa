//! Dual-thumb range seek bar.
//!
//! [`RangeSeekBar`] is the toolkit-independent core: bounds of one of the
//! supported [`NumberKind`]s, a normalized selection, and a touch-driven drag
//! state machine. The [`ui`] module hosts it in egui, including a preference
//! dialog that persists its selection through [`Settings`].

pub mod errors;
pub mod logging;
pub mod numeric;
pub mod range_seek;
pub mod settings;
pub mod ui;


pub use errors::{RangeSeekError, Result};
pub use numeric::NumberKind;
pub use range_seek::{
    BarColors, Canvas, MeasureSpec, RangeSeekBar, Thumb, ThumbImage, ThumbMetrics, TouchEvent,
    TouchPhase,
};
pub use settings::Settings;
