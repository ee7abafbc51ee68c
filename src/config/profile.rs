//! Named profile storage
//!
//! Profiles live one per file as `<dir>/<name>.json`. The store only moves
//! documents between disk and a caller-owned [`Settings`]; it never holds one.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::serialization::{self, ProfileMetadata};
use crate::config::settings::Settings;
use crate::constants::config::{EXTENSION, FORBIDDEN_NAME_CHARS, PROFILE_DIR};

/// Outcome of loading a named profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Document merged into the live settings
    Applied(Option<ProfileMetadata>),
    /// No profile file with that name; nothing was changed
    NotFound,
}

/// A profile file found in the store directory
#[derive(Debug, Clone)]
pub struct ProfileEntry {
    pub name: String,
    pub path: PathBuf,
    /// `None` when the file is not a readable profile document
    pub metadata: Option<ProfileMetadata>,
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(PROFILE_DIR)
    }
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that `name` can be used as a file stem inside the store directory
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            bail!("Profile name must not be empty");
        }
        if name.contains("..") {
            bail!("Profile name must not contain '..': {name:?}");
        }
        if let Some(c) = name
            .chars()
            .find(|c| FORBIDDEN_NAME_CHARS.contains(c) || c.is_control())
        {
            bail!("Profile name contains invalid character {c:?}: {name:?}");
        }
        Ok(())
    }

    /// Deterministic file path for a profile name
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Save `settings` under `name`, overwriting any previous profile with that name
    pub fn save(&self, name: &str, settings: &Settings) -> Result<PathBuf> {
        let path = self.path_for(name)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create profile directory {:?}", self.dir))?;

        write_to_path(&path, &ProfileMetadata::new(name), settings)?;
        info!(profile = name, path = %path.display(), "Saved profile");
        Ok(path)
    }

    /// Merge the profile `name` into `settings`
    ///
    /// A missing profile file is not an error and leaves `settings` unchanged.
    pub fn load(&self, name: &str, settings: &mut Settings) -> Result<LoadOutcome> {
        let path = self.path_for(name)?;

        if !path.exists() {
            warn!(profile = name, path = %path.display(), "Profile file not found");
            return Ok(LoadOutcome::NotFound);
        }

        let metadata = read_from_path(&path, settings)?;
        info!(profile = name, path = %path.display(), "Loaded profile");
        Ok(LoadOutcome::Applied(metadata))
    }

    /// List all profiles, sorted by name
    pub fn list(&self) -> Result<Vec<ProfileEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read profile directory {:?}", self.dir))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };

            let metadata = read_metadata(&path);
            profiles.push(ProfileEntry {
                name,
                path,
                metadata,
            });
        }

        profiles.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(profiles)
    }

    /// Delete a profile file; returns `false` if it did not exist
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete profile file {:?}", path))?;
        info!(profile = name, "Deleted profile");
        Ok(true)
    }
}

/// Write a profile document to an arbitrary path
///
/// Written to a `.tmp` sibling and renamed into place; an interrupted write never
/// leaves a truncated file at `path`. Concurrent writers are not coordinated.
pub fn write_to_path(path: &Path, metadata: &ProfileMetadata, settings: &Settings) -> Result<()> {
    let json = serialization::to_document_string(settings, metadata)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    if let Err(e) = fs::write(&tmp_path, json) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to write profile to {:?}", tmp_path));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to move profile into place at {:?}", path));
    }
    Ok(())
}

/// Merge the document at `path` into `settings`
///
/// On any error `settings` is left exactly as it was.
pub fn read_from_path(path: &Path, settings: &mut Settings) -> Result<Option<ProfileMetadata>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile from {:?}", path))?;

    let parsed = serialization::merge_document(settings, &contents)
        .with_context(|| format!("Failed to parse profile {:?}", path))?;

    *settings = parsed.settings;
    Ok(parsed.metadata)
}

fn read_metadata(path: &Path) -> Option<ProfileMetadata> {
    let contents = fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    serde_json::from_value(value.get("metadata")?.clone()).ok()
}
