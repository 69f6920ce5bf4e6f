pub mod caption_url;
pub mod error;
pub mod item;
pub mod settings;

pub use caption_url::{CaptionUrlDeriver, normalize_video_url};
pub use error::{Error, Result};
pub use item::{CaptionDescriptor, SharedItem, StreamItem};
pub use settings::Settings;
