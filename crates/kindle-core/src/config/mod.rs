//! User configuration

pub mod settings;

pub use settings::{FeatureDefaults, FeatureFlags, Settings, SETTINGS_FILE};
