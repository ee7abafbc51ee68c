//! Top-level owner of the live settings bundle
//!
//! Every configuration action goes through here. Failures never propagate out of
//! these methods: they are logged and recorded as the latest [`StatusMessage`]
//! for the front end to display.

use tracing::{debug, error, info, warn};

use crate::config::preset::Preset;
use crate::config::profile::{LoadOutcome, ProfileEntry, ProfileStore};
use crate::config::settings::Settings;
use crate::config::transfer::{self, PathPicker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

pub struct ConfigManager {
    settings: Settings,
    store: ProfileStore,
    pub status_message: Option<StatusMessage>,
    /// Live settings differ from what was last loaded or saved
    pub settings_changed: bool,
}

impl ConfigManager {
    pub fn new(store: ProfileStore) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: ProfileStore, settings: Settings) -> Self {
        Self {
            settings,
            store,
            status_message: None,
            settings_changed: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access for direct edits; marks the bundle as changed
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.settings_changed = true;
        &mut self.settings
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(level, text));
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        preset.apply(&mut self.settings);
        self.settings_changed = true;
        info!(preset = %preset, "Applied preset configuration");
        self.set_status(StatusLevel::Info, format!("Applied {preset} preset"));
    }

    /// Apply the preset at `index` in [`Preset::ALL`]; out-of-range indices change nothing
    pub fn apply_preset_index(&mut self, index: usize) {
        match Preset::from_index(index) {
            Some(preset) => self.apply_preset(preset),
            None => {
                warn!(index, "Invalid preset index");
                self.set_status(
                    StatusLevel::Warning,
                    format!("Invalid preset index: {index}"),
                );
            }
        }
    }

    /// Save the live settings as profile `name`
    pub fn save_config(&mut self, name: &str) {
        match self.store.save(name, &self.settings) {
            Ok(path) => {
                self.settings_changed = false;
                self.set_status(
                    StatusLevel::Info,
                    format!("Configuration saved: {}", path.display()),
                );
            }
            Err(e) => {
                error!(profile = name, error = ?e, "Failed to save config");
                self.set_status(
                    StatusLevel::Error,
                    format!("Failed to save config '{name}': {e:#}"),
                );
            }
        }
    }

    /// Merge profile `name` into the live settings
    pub fn load_config(&mut self, name: &str) {
        match self.store.load(name, &mut self.settings) {
            Ok(LoadOutcome::Applied(metadata)) => {
                self.settings_changed = true;
                if let Some(metadata) = metadata {
                    debug!(
                        profile = name,
                        version = %metadata.version,
                        created = metadata.created,
                        "Profile metadata"
                    );
                }
                self.set_status(StatusLevel::Info, format!("Configuration loaded: {name}"));
            }
            Ok(LoadOutcome::NotFound) => {
                self.set_status(StatusLevel::Warning, format!("Config file not found: {name}"));
            }
            Err(e) => {
                error!(profile = name, error = ?e, "Failed to load config");
                self.set_status(
                    StatusLevel::Error,
                    format!("Failed to load config '{name}': {e:#}"),
                );
            }
        }
    }

    pub fn reset_to_defaults(&mut self) {
        self.settings.reset_to_defaults();
        self.settings_changed = true;
        info!("All settings reset to defaults");
        self.set_status(StatusLevel::Info, "All settings reset to defaults");
    }

    pub fn export(&mut self, picker: &dyn PathPicker) {
        match transfer::export(picker, &self.settings) {
            Ok(Some(path)) => self.set_status(
                StatusLevel::Info,
                format!("Configuration exported to: {}", path.display()),
            ),
            Ok(None) => {
                debug!("Export cancelled");
                self.status_message = None;
            }
            Err(e) => {
                error!(error = ?e, "Failed to export config");
                self.set_status(StatusLevel::Error, format!("Failed to export config: {e:#}"));
            }
        }
    }

    pub fn import(&mut self, picker: &dyn PathPicker) {
        match transfer::import(picker, &mut self.settings) {
            Ok(Some(path)) => {
                self.settings_changed = true;
                self.set_status(
                    StatusLevel::Info,
                    format!("Configuration imported from: {}", path.display()),
                );
            }
            Ok(None) => {
                debug!("Import cancelled");
                self.status_message = None;
            }
            Err(e) => {
                error!(error = ?e, "Failed to import config");
                self.set_status(StatusLevel::Error, format!("Failed to import config: {e:#}"));
            }
        }
    }

    pub fn delete_config(&mut self, name: &str) {
        match self.store.delete(name) {
            Ok(true) => self.set_status(StatusLevel::Info, format!("Deleted config: {name}")),
            Ok(false) => {
                warn!(profile = name, "Config to delete does not exist");
                self.set_status(StatusLevel::Warning, format!("Config file not found: {name}"));
            }
            Err(e) => {
                error!(profile = name, error = ?e, "Failed to delete config");
                self.set_status(
                    StatusLevel::Error,
                    format!("Failed to delete config '{name}': {e:#}"),
                );
            }
        }
    }

    /// Saved profiles, or an empty list (with an error status) if the directory is unreadable
    pub fn list_configs(&mut self) -> Vec<ProfileEntry> {
        match self.store.list() {
            Ok(profiles) => profiles,
            Err(e) => {
                error!(dir = %self.store.dir().display(), error = ?e, "Failed to list configs");
                self.set_status(StatusLevel::Error, format!("Failed to list configs: {e:#}"));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::transfer::FixedPicker;

    fn manager() -> (tempfile::TempDir, ConfigManager) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(temp_dir.path().join("configs"));
        (temp_dir, ConfigManager::new(store))
    }

    fn level(manager: &ConfigManager) -> Option<StatusLevel> {
        manager.status_message.as_ref().map(|s| s.level)
    }

    #[test]
    fn test_save_and_load_scenario() {
        let (_temp, mut manager) = manager();
        manager.settings_mut().aim.fov = 45.0;
        manager.settings_mut().aim.enable = true;
        manager.save_config("A");
        assert_eq!(level(&manager), Some(StatusLevel::Info));
        assert!(!manager.settings_changed);

        manager.settings_mut().aim.fov = 60.0;
        manager.load_config("A");

        assert_eq!(manager.settings().aim.fov, 45.0);
        assert!(manager.settings().aim.enable);
    }

    #[test]
    fn test_preset_index() {
        let (_temp, mut manager) = manager();

        manager.apply_preset_index(0);
        let settings = manager.settings();
        assert_eq!(settings.aim.smoothing_x, 15.0);
        assert_eq!(settings.aim.fov, 45.0);
        assert_eq!(settings.esp.max_esp_distance, 150);
        assert!(settings.misc.stream_proof);

        let before = manager.settings().clone();
        manager.apply_preset_index(7);
        assert_eq!(manager.settings(), &before);
        assert_eq!(level(&manager), Some(StatusLevel::Warning));
    }

    #[test]
    fn test_failures_are_reported_not_raised() {
        let (_temp, mut manager) = manager();
        manager.settings_mut().esp.enable = true;
        let before = manager.settings().clone();

        manager.load_config("doesnotexist");
        assert_eq!(level(&manager), Some(StatusLevel::Warning));
        assert_eq!(manager.settings(), &before);

        manager.save_config("bad/name");
        assert_eq!(level(&manager), Some(StatusLevel::Error));

        std::fs::create_dir_all(manager.store().dir()).unwrap();
        std::fs::write(manager.store().dir().join("bad.json"), "{ not json").unwrap();
        manager.load_config("bad");
        assert_eq!(level(&manager), Some(StatusLevel::Error));
        assert_eq!(manager.settings(), &before);

        manager.delete_config("never-saved");
        assert_eq!(level(&manager), Some(StatusLevel::Warning));
    }

    #[test]
    fn test_write_failures_keep_settings() {
        let (temp, mut manager) = manager();
        manager.apply_preset(Preset::Legit);
        let before = manager.settings().clone();

        // Profile directory path is a regular file
        std::fs::write(manager.store().dir(), "occupied").unwrap();
        manager.save_config("A");
        assert_eq!(level(&manager), Some(StatusLevel::Error));
        assert_eq!(manager.settings(), &before);

        // Export into a directory that does not exist
        let picker = FixedPicker(Some(temp.path().join("missing").join("share.json")));
        manager.export(&picker);
        assert_eq!(level(&manager), Some(StatusLevel::Error));
        assert_eq!(manager.settings(), &before);
        assert!(!temp.path().join("missing").exists());
    }

    #[test]
    fn test_save_non_finite_reports_error() {
        let (_temp, mut manager) = manager();
        manager.settings_mut().aim.target_lock_range = f32::INFINITY;

        manager.save_config("inf");

        assert_eq!(level(&manager), Some(StatusLevel::Error));
        assert!(!manager.store().dir().join("inf.json").exists());
        assert!(manager.settings_changed);
    }

    #[test]
    fn test_reset_to_defaults() {
        let (_temp, mut manager) = manager();
        manager.apply_preset(Preset::HvH);
        manager.reset_to_defaults();
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_cancelled_transfer_is_silent() {
        let (_temp, mut manager) = manager();
        manager.apply_preset(Preset::Rage);
        let before = manager.settings().clone();

        manager.export(&FixedPicker(None));
        assert!(manager.status_message.is_none());
        manager.import(&FixedPicker(None));
        assert!(manager.status_message.is_none());
        assert_eq!(manager.settings(), &before);
    }

    #[test]
    fn test_export_import_through_manager() {
        let (temp, mut manager) = manager();
        manager.apply_preset(Preset::SemiLegit);
        let exported = manager.settings().clone();
        let picker = FixedPicker(Some(temp.path().join("share.json")));

        manager.export(&picker);
        assert_eq!(level(&manager), Some(StatusLevel::Info));

        manager.reset_to_defaults();
        manager.import(&picker);
        assert_eq!(manager.settings(), &exported);
    }

    #[test]
    fn test_list_configs() {
        let (_temp, mut manager) = manager();
        assert!(manager.list_configs().is_empty());

        manager.save_config("Tournament");
        manager.save_config("Streaming");
        let names: Vec<String> = manager.list_configs().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Streaming", "Tournament"]);

        manager.delete_config("Streaming");
        assert_eq!(manager.list_configs().len(), 1);
    }
}
