//! Profile document format
//!
//! A profile file is one JSON object with the sections `aim`, `esp`, `settings`
//! and `metadata`. Loading merges: only keys present in the document overwrite
//! the live values. The merge is staged on a copy of the bundle so a document
//! with any bad value leaves the live bundle untouched.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::constants::config::FORMAT_VERSION;

/// Sections of the document that map onto the settings bundle
const SECTIONS: [&str; 3] = ["aim", "esp", "settings"];

/// Identity and provenance of a saved profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Unix seconds
    #[serde(default, alias = "createdUnixSeconds")]
    pub created: i64,
}

impl ProfileMetadata {
    /// Metadata for a document written now
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: FORMAT_VERSION.to_string(),
            created: chrono::Utc::now().timestamp(),
        }
    }

    pub fn created_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.created, 0).single()
    }

    /// Documents from another major format version may use different field meanings
    pub fn is_compatible(&self) -> bool {
        major(&self.version) == major(FORMAT_VERSION)
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or_default()
}

/// Borrowed view written to disk (settings sections followed by metadata)
#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(flatten)]
    settings: &'a Settings,
    metadata: &'a ProfileMetadata,
}

/// Result of merging a document over the current bundle
#[derive(Debug)]
pub struct ParsedDocument {
    pub settings: Settings,
    pub metadata: Option<ProfileMetadata>,
}

/// Serialize the full bundle plus metadata as pretty JSON (4-space indent)
pub fn to_document_string(settings: &Settings, metadata: &ProfileMetadata) -> Result<String> {
    // serde_json writes NaN/infinity as null, which would never load back
    settings
        .validate()
        .context("Refusing to write settings that cannot be read back")?;

    let document = DocumentRef { settings, metadata };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .context("Failed to serialize settings to JSON")?;

    String::from_utf8(buf).context("Serialized JSON was not valid UTF-8")
}

/// Merge a profile document over `current`, returning the merged bundle
///
/// Every key present in a known section replaces the staged value; absent keys
/// keep the value from `current`. Unknown keys are ignored. Any type mismatch
/// (wrong JSON type, enum index out of range, color that is not a 4-element
/// array) fails the whole merge.
pub fn merge_document(current: &Settings, contents: &str) -> Result<ParsedDocument> {
    let document: Value = serde_json::from_str(contents).context("Malformed JSON")?;
    let Value::Object(mut document) = document else {
        bail!("Profile document must be a JSON object");
    };

    current
        .validate()
        .context("Current settings cannot be staged for merging")?;
    let mut staged =
        serde_json::to_value(current).context("Failed to stage current settings")?;

    for section in SECTIONS {
        let Some(incoming) = document.remove(section) else {
            continue;
        };
        let Value::Object(fields) = incoming else {
            bail!("Section '{section}' must be a JSON object");
        };
        let target = staged
            .get_mut(section)
            .and_then(Value::as_object_mut)
            .with_context(|| format!("Staged settings are missing section '{section}'"))?;

        overlay_section(section, target, fields);
    }

    let settings: Settings =
        serde_json::from_value(staged).context("Profile contains a value of the wrong type")?;
    // Numbers beyond the f32 range deserialize as infinity
    settings
        .validate()
        .context("Profile contains an out-of-range number")?;

    let metadata = document
        .remove("metadata")
        .and_then(|value| match serde_json::from_value::<ProfileMetadata>(value) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable profile metadata");
                None
            }
        });

    if let Some(metadata) = &metadata
        && !metadata.is_compatible()
    {
        warn!(
            version = %metadata.version,
            expected = FORMAT_VERSION,
            "Profile was written by a different format version"
        );
    }

    Ok(ParsedDocument { settings, metadata })
}

fn overlay_section(section: &str, target: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        match target.get_mut(&key) {
            Some(slot) => *slot = value,
            None => debug!(section, key = %key, "Ignoring unknown profile field"),
        }
    }
}
