pub mod config;
pub mod element;
pub mod error;
pub mod hub;
pub mod paths;
pub mod playback;
pub mod source;
pub mod sync;
pub mod time;

pub use config::{JukesyncConfig, ServerConfig, StreamConfig};
pub use element::{AudioElement, Indicator, StateRefresh, StreamControl, VolumeIcon};
pub use error::CoreError;
pub use hub::{StateEvent, StateHub};
pub use paths::{config_dir, config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use playback::{PlaybackState, Song};
pub use source::StateSource;
pub use sync::{StreamSync, SEEK_DEADBAND};
pub use time::DurationExt;
