mod settings;

pub use settings::{AudioSettings, OpenAiSettings, ServerSettings, Settings, SettingsError};
