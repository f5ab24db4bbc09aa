pub mod common;
pub mod preference_dialog;
pub mod range_seek_widget;
pub mod thumbs;

pub use preference_dialog::{DialogOutcome, RangeSeekPreference};
pub use range_seek_widget::{range_seek, range_seek_ui, PainterCanvas};
pub use thumbs::ThumbTextures;
