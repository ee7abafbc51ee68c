//! Configuration management
//!
//! Handles the live settings bundle, built-in presets, and named profiles with
//! JSON persistence. Profiles merge into the live bundle on load.

pub mod keys;
pub mod manager;
pub mod preset;
pub mod profile;
pub mod serialization;
pub mod settings;
pub mod transfer;

pub use keys::VirtualKey;
pub use manager::{ConfigManager, StatusLevel};
pub use preset::Preset;
pub use profile::ProfileStore;
pub use settings::Settings;
pub use transfer::FixedPicker;
