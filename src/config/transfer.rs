//! Export/import of settings to a file chosen outside the profile store

use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::info;

use crate::config::profile;
use crate::config::serialization::ProfileMetadata;
use crate::config::settings::Settings;
use crate::constants::config::{EXPORT_NAME_PREFIX, EXTENSION};

/// Source of user-chosen file paths (a native file dialog, or a CLI argument)
///
/// `None` means the user cancelled.
pub trait PathPicker {
    fn pick_save_path(&self) -> Option<PathBuf>;
    fn pick_open_path(&self) -> Option<PathBuf>;
}

/// Picker that answers every prompt with the same preselected path
#[derive(Debug, Clone, Default)]
pub struct FixedPicker(pub Option<PathBuf>);

impl PathPicker for FixedPicker {
    fn pick_save_path(&self) -> Option<PathBuf> {
        self.0.clone()
    }

    fn pick_open_path(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Export `settings` to a picked path; `Ok(None)` when the picker was cancelled
pub fn export(picker: &dyn PathPicker, settings: &Settings) -> Result<Option<PathBuf>> {
    let Some(path) = picker.pick_save_path() else {
        return Ok(None);
    };
    let path = with_default_extension(path);

    let name = format!("{EXPORT_NAME_PREFIX}{}", chrono::Utc::now().timestamp());
    profile::write_to_path(&path, &ProfileMetadata::new(&name), settings)?;

    info!(path = %path.display(), "Exported configuration");
    Ok(Some(path))
}

/// Merge a picked file into `settings`; `Ok(None)` when the picker was cancelled
pub fn import(picker: &dyn PathPicker, settings: &mut Settings) -> Result<Option<PathBuf>> {
    let Some(path) = picker.pick_open_path() else {
        return Ok(None);
    };

    if !path.is_file() {
        bail!("Could not open import file: {}", path.display());
    }

    profile::read_from_path(&path, settings)?;

    info!(path = %path.display(), "Imported configuration");
    Ok(Some(path))
}

/// Save dialogs append the default extension when the user typed none
fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Rgba;

    #[test]
    fn test_cancelled_pickers_are_noops() {
        let cancelled = FixedPicker(None);
        let mut settings = Settings::default();
        settings.aim.enable = true;
        let before = settings.clone();

        assert!(export(&cancelled, &settings).unwrap().is_none());
        assert!(import(&cancelled, &mut settings).unwrap().is_none());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut exported = Settings::default();
        exported.esp.enable = true;
        exported.esp.box_visible_outline_color = Rgba::new(0.2, 0.4, 0.6, 0.8);
        exported.misc.crosshair_size = 22.0;

        let picker = FixedPicker(Some(temp_dir.path().join("shared")));
        let written = export(&picker, &exported).unwrap().unwrap();
        assert_eq!(written, temp_dir.path().join("shared.json"));

        let contents = std::fs::read_to_string(&written).unwrap();
        assert!(contents.contains("\"Export_"));

        let mut imported = Settings::default();
        let picker = FixedPicker(Some(written));
        assert!(import(&picker, &mut imported).unwrap().is_some());
        assert_eq!(imported, exported);
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let picker = FixedPicker(Some(temp_dir.path().join("gone.json")));
        let mut settings = Settings::default();

        assert!(import(&picker, &mut settings).is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("out/cfg")),
            PathBuf::from("out/cfg.json")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("out/cfg.txt")),
            PathBuf::from("out/cfg.txt")
        );
    }
}
