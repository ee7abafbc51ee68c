//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Profile storage paths and filenames
pub mod config {
    /// Directory (relative to the working directory) holding one JSON file per profile
    pub const PROFILE_DIR: &str = "configs";

    /// Extension used for profile files
    pub const EXTENSION: &str = "json";

    /// Environment variable overriding the profile directory
    pub const DIR_ENV_VAR: &str = "OVERLAY_CONFIG_DIR";

    /// Profile the CLI reads and writes back when no `--profile` is given
    pub const WORKING_PROFILE: &str = "current";

    /// Document format version written into `metadata.version`
    pub const FORMAT_VERSION: &str = "2.1.0";

    /// Prefix of the metadata name given to exported documents
    pub const EXPORT_NAME_PREFIX: &str = "Export_";

    /// Characters that cannot appear in a profile name (not portable in file names)
    pub const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
}

/// Default configuration values
/// These are the baseline restored by a reset and used for fields a fresh bundle starts with
pub mod defaults {
    /// Aimbot settings
    pub mod aim {
        pub const ENABLE: bool = false;
        pub const SMOOTHING: f32 = 5.0;
        pub const FOV: f32 = 60.0;
        pub const VISIBLE_CHECK: bool = true;
        pub const TARGET_LOCK_TIMEOUT: f32 = 3.0;
        pub const TARGET_LOCK_RANGE: f32 = 1.5;
        pub const MAX_DISTANCE: f32 = 150.0;

        /// Smart target selection priority weights (distance, health, angle)
        pub const DISTANCE_WEIGHT: f32 = 0.4;
        pub const HEALTH_WEIGHT: f32 = 0.3;
        pub const ANGLE_WEIGHT: f32 = 0.3;
    }

    /// ESP settings
    pub mod esp {
        pub const MAX_DISTANCE: i32 = 200;
    }

    /// Crosshair overlay settings
    pub mod crosshair {
        pub const SIZE: f32 = 10.0;
        pub const THICKNESS: f32 = 2.0;
        pub const GAP: f32 = 4.0;
    }
}
