pub mod config;
pub mod content;
pub mod error;
pub mod scroll;
pub mod settings;

pub use config::{AppConfig, ScrollConfig};
pub use error::{Error, Result};
pub use scroll::ScrollEngine;
pub use settings::{FileSettings, Settings, SettingsPersister};
