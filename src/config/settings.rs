//! Live settings bundle read by the aim, ESP and overlay subsystems
//!
//! One `Settings` value is owned by the top-level [`ConfigManager`](super::ConfigManager)
//! and handed out by reference. It carries no internal synchronization: every
//! write is expected on the UI thread, and a caller that mutates it from another
//! thread must wrap it in its own lock first.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::common::Rgba;
use crate::config::keys::VirtualKey;
use crate::constants::defaults;

/// Bone the aimbot targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AimBone {
    #[default]
    Head,
    Neck,
    Chest,
    Pelvis,
    /// Picks the best visible bone per target
    Smart,
}

/// ESP box style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum BoxType {
    #[default]
    Normal,
    Cornered,
}

/// Side of the ESP box the health bar is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum HealthBarPos {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

/// Persisted as plain integer indices; out-of-range values are rejected
macro_rules! index_enum {
    ($ty:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        impl TryFrom<i32> for $ty {
            type Error = String;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(format!(
                        concat!("invalid ", stringify!($ty), " index: {}"),
                        other
                    )),
                }
            }
        }

        impl From<$ty> for i32 {
            fn from(value: $ty) -> Self {
                match value {
                    $($ty::$variant => $value,)+
                }
            }
        }
    };
}

index_enum!(AimBone { Head = 0, Neck = 1, Chest = 2, Pelvis = 3, Smart = 4 });
index_enum!(BoxType { Normal = 0, Cornered = 1 });
index_enum!(HealthBarPos { Left = 0, Right = 1, Top = 2, Bottom = 3 });

/// Aimbot parameters (JSON section `aim`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimSettings {
    pub enable: bool,
    #[serde(rename = "smoothingX")]
    pub smoothing_x: f32,
    #[serde(rename = "smoothingY")]
    pub smoothing_y: f32,
    #[serde(rename = "FOV")]
    pub fov: f32,
    #[serde(rename = "aimbone")]
    pub aim_bone: AimBone,
    #[serde(rename = "visibleCheck")]
    pub visible_check: bool,
    #[serde(rename = "targetLock")]
    pub target_lock: bool,
    /// Seconds a locked target is kept after leaving the FOV
    #[serde(rename = "targetLockTimeout")]
    pub target_lock_timeout: f32,
    /// Multiplier applied to the FOV while a target is locked
    #[serde(rename = "targetLockRange")]
    pub target_lock_range: f32,
    #[serde(rename = "showFOV")]
    pub show_fov: bool,
    #[serde(rename = "targetLine")]
    pub target_line: bool,
    #[serde(rename = "maxAimbotDistance")]
    pub max_aimbot_distance: f32,
    #[serde(rename = "aimkey")]
    pub aim_key: VirtualKey,
    #[serde(rename = "targetLineColor")]
    pub target_line_color: Rgba,

    // Smart target selection
    #[serde(rename = "smartTargetSelection")]
    pub smart_target_selection: bool,
    #[serde(rename = "distanceWeight")]
    pub distance_weight: f32,
    #[serde(rename = "healthWeight")]
    pub health_weight: f32,
    #[serde(rename = "angleWeight")]
    pub angle_weight: f32,
}

impl Default for AimSettings {
    fn default() -> Self {
        Self {
            enable: defaults::aim::ENABLE,
            smoothing_x: defaults::aim::SMOOTHING,
            smoothing_y: defaults::aim::SMOOTHING,
            fov: defaults::aim::FOV,
            aim_bone: AimBone::Head,
            visible_check: defaults::aim::VISIBLE_CHECK,
            target_lock: false,
            target_lock_timeout: defaults::aim::TARGET_LOCK_TIMEOUT,
            target_lock_range: defaults::aim::TARGET_LOCK_RANGE,
            show_fov: false,
            target_line: false,
            max_aimbot_distance: defaults::aim::MAX_DISTANCE,
            aim_key: VirtualKey::default(),
            target_line_color: Rgba::RED,
            smart_target_selection: false,
            distance_weight: defaults::aim::DISTANCE_WEIGHT,
            health_weight: defaults::aim::HEALTH_WEIGHT,
            angle_weight: defaults::aim::ANGLE_WEIGHT,
        }
    }
}

/// ESP toggles and colors (JSON section `esp`)
///
/// Each drawable feature has a color for targets in line of sight and one for occluded targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspSettings {
    pub enable: bool,
    #[serde(rename = "box")]
    pub draw_box: bool,
    pub box_type: BoxType,
    pub box_filled: bool,
    pub nickname: bool,
    pub health: bool,
    pub health_bar_pos: HealthBarPos,
    pub snaplines: bool,
    pub distance: bool,
    pub skeleton: bool,
    pub indicator: bool,
    #[serde(rename = "maxESPDistance")]
    pub max_esp_distance: i32,

    pub box_visible_outline_color: Rgba,
    pub box_invisible_outline_color: Rgba,
    pub box_visible_filled_color: Rgba,
    pub box_invisible_filled_color: Rgba,
    pub nickname_visible_color: Rgba,
    pub nickname_invisible_color: Rgba,
    pub snaplines_visible_color: Rgba,
    pub snaplines_invisible_color: Rgba,
    pub distance_visible_color: Rgba,
    pub distance_invisible_color: Rgba,
    pub skeleton_visible_color: Rgba,
    pub skeleton_invisible_color: Rgba,
}

impl Default for EspSettings {
    fn default() -> Self {
        Self {
            enable: false,
            draw_box: false,
            box_type: BoxType::Normal,
            box_filled: false,
            nickname: false,
            health: false,
            health_bar_pos: HealthBarPos::Left,
            snaplines: false,
            distance: false,
            skeleton: false,
            indicator: false,
            max_esp_distance: defaults::esp::MAX_DISTANCE,
            box_visible_outline_color: Rgba::GREEN,
            box_invisible_outline_color: Rgba::RED,
            box_visible_filled_color: Rgba::new(0.0, 1.0, 0.0, 0.3),
            box_invisible_filled_color: Rgba::new(1.0, 0.0, 0.0, 0.3),
            nickname_visible_color: Rgba::WHITE,
            nickname_invisible_color: Rgba::LIGHT_GRAY,
            snaplines_visible_color: Rgba::GREEN,
            snaplines_invisible_color: Rgba::RED,
            distance_visible_color: Rgba::WHITE,
            distance_invisible_color: Rgba::LIGHT_GRAY,
            skeleton_visible_color: Rgba::WHITE,
            skeleton_invisible_color: Rgba::LIGHT_GRAY,
        }
    }
}

/// Miscellaneous overlay settings (JSON section `settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiscSettings {
    /// Exclude the overlay window from screen capture
    pub stream_proof: bool,
    pub enable_crosshair: bool,
    pub crosshair_size: f32,
    pub crosshair_thickness: f32,
    pub crosshair_gap: f32,
    pub crosshair_dot: bool,
    pub crosshair_color: Rgba,
}

impl Default for MiscSettings {
    fn default() -> Self {
        Self {
            stream_proof: false,
            enable_crosshair: false,
            crosshair_size: defaults::crosshair::SIZE,
            crosshair_thickness: defaults::crosshair::THICKNESS,
            crosshair_gap: defaults::crosshair::GAP,
            crosshair_dot: false,
            crosshair_color: Rgba::WHITE,
        }
    }
}

/// Complete set of live tunable values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub aim: AimSettings,
    pub esp: EspSettings,
    #[serde(rename = "settings")]
    pub misc: MiscSettings,
}

impl Settings {
    /// Overwrite every field with the hard-coded baseline
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Fail on the first NaN or infinite value (JSON has no representation for them)
    pub fn validate(&self) -> Result<()> {
        let (aim, esp, misc) = (&self.aim, &self.esp, &self.misc);

        let scalars = [
            ("aim.smoothingX", aim.smoothing_x),
            ("aim.smoothingY", aim.smoothing_y),
            ("aim.FOV", aim.fov),
            ("aim.targetLockTimeout", aim.target_lock_timeout),
            ("aim.targetLockRange", aim.target_lock_range),
            ("aim.maxAimbotDistance", aim.max_aimbot_distance),
            ("aim.distanceWeight", aim.distance_weight),
            ("aim.healthWeight", aim.health_weight),
            ("aim.angleWeight", aim.angle_weight),
            ("settings.crosshairSize", misc.crosshair_size),
            ("settings.crosshairThickness", misc.crosshair_thickness),
            ("settings.crosshairGap", misc.crosshair_gap),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                bail!("Setting '{field}' is not a finite number: {value}");
            }
        }

        let colors = [
            ("aim.targetLineColor", aim.target_line_color),
            ("esp.boxVisibleOutlineColor", esp.box_visible_outline_color),
            ("esp.boxInvisibleOutlineColor", esp.box_invisible_outline_color),
            ("esp.boxVisibleFilledColor", esp.box_visible_filled_color),
            ("esp.boxInvisibleFilledColor", esp.box_invisible_filled_color),
            ("esp.nicknameVisibleColor", esp.nickname_visible_color),
            ("esp.nicknameInvisibleColor", esp.nickname_invisible_color),
            ("esp.snaplinesVisibleColor", esp.snaplines_visible_color),
            ("esp.snaplinesInvisibleColor", esp.snaplines_invisible_color),
            ("esp.distanceVisibleColor", esp.distance_visible_color),
            ("esp.distanceInvisibleColor", esp.distance_invisible_color),
            ("esp.skeletonVisibleColor", esp.skeleton_visible_color),
            ("esp.skeletonInvisibleColor", esp.skeleton_invisible_color),
            ("settings.crosshairColor", misc.crosshair_color),
        ];
        for (field, color) in colors {
            if !color.to_array().iter().all(|c| c.is_finite()) {
                bail!("Color '{field}' has a non-finite channel: {:?}", color.to_array());
            }
        }

        Ok(())
    }
}
