//! Built-in presets
//!
//! A preset is a partial overlay: it writes a fixed subset of fields and leaves
//! everything else (aim key, colors, crosshair, smart targeting) as it was.

use std::fmt;
use std::str::FromStr;

use crate::config::settings::{AimBone, BoxType, HealthBarPos, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Legit,
    SemiLegit,
    Rage,
    HvH,
}

/// Field values written by a preset
struct Overlay {
    smoothing: f32,
    fov: f32,
    aim_bone: AimBone,
    visible_check: bool,
    target_lock: bool,
    /// (timeout seconds, range multiplier); `None` keeps the current values
    target_lock_tuning: Option<(f32, f32)>,
    show_fov: bool,
    target_line: bool,
    max_aimbot_distance: f32,
    box_type: BoxType,
    box_filled: bool,
    nickname: bool,
    skeleton: bool,
    indicator: bool,
    max_esp_distance: i32,
    stream_proof: bool,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Legit, Preset::SemiLegit, Preset::Rage, Preset::HvH];

    /// Position in the preset list (as shown in the preset picker)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Legit => "Legit",
            Preset::SemiLegit => "Semi-Legit",
            Preset::Rage => "Rage",
            Preset::HvH => "HvH",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Legit => "Low smoothing, human-like aim, minimal ESP",
            Preset::SemiLegit => "Moderate settings, balanced for competitive",
            Preset::Rage => "High aggression, maximum settings",
            Preset::HvH => "Optimized for HvH scenarios",
        }
    }

    fn overlay(self) -> Overlay {
        match self {
            Preset::Legit => Overlay {
                smoothing: 15.0,
                fov: 45.0,
                aim_bone: AimBone::Head,
                visible_check: true,
                target_lock: false,
                target_lock_tuning: None,
                show_fov: false,
                target_line: false,
                max_aimbot_distance: 100.0,
                box_type: BoxType::Normal,
                box_filled: false,
                nickname: false,
                skeleton: false,
                indicator: false,
                max_esp_distance: 150,
                stream_proof: true,
            },
            Preset::SemiLegit => Overlay {
                smoothing: 8.0,
                fov: 75.0,
                aim_bone: AimBone::Smart,
                visible_check: true,
                target_lock: true,
                target_lock_tuning: Some((2.0, 1.5)),
                show_fov: false,
                target_line: false,
                max_aimbot_distance: 200.0,
                box_type: BoxType::Cornered,
                box_filled: false,
                nickname: true,
                skeleton: true,
                indicator: true,
                max_esp_distance: 250,
                stream_proof: false,
            },
            Preset::Rage => Overlay {
                smoothing: 2.0,
                fov: 180.0,
                aim_bone: AimBone::Head,
                visible_check: false,
                target_lock: true,
                target_lock_tuning: Some((5.0, 2.5)),
                show_fov: true,
                target_line: true,
                max_aimbot_distance: 300.0,
                box_type: BoxType::Cornered,
                box_filled: true,
                nickname: true,
                skeleton: true,
                indicator: true,
                max_esp_distance: 300,
                stream_proof: false,
            },
            Preset::HvH => Overlay {
                smoothing: 1.0,
                fov: 360.0,
                aim_bone: AimBone::Smart,
                visible_check: false,
                target_lock: true,
                target_lock_tuning: Some((1.0, 3.0)),
                show_fov: true,
                target_line: true,
                max_aimbot_distance: 300.0,
                box_type: BoxType::Cornered,
                box_filled: true,
                nickname: true,
                skeleton: true,
                indicator: true,
                max_esp_distance: 300,
                stream_proof: false,
            },
        }
    }

    /// Write this preset's fields into `settings`
    pub fn apply(self, settings: &mut Settings) {
        let o = self.overlay();

        let aim = &mut settings.aim;
        aim.enable = true;
        aim.smoothing_x = o.smoothing;
        aim.smoothing_y = o.smoothing;
        aim.fov = o.fov;
        aim.aim_bone = o.aim_bone;
        aim.visible_check = o.visible_check;
        aim.target_lock = o.target_lock;
        if let Some((timeout, range)) = o.target_lock_tuning {
            aim.target_lock_timeout = timeout;
            aim.target_lock_range = range;
        }
        aim.show_fov = o.show_fov;
        aim.target_line = o.target_line;
        aim.max_aimbot_distance = o.max_aimbot_distance;

        let esp = &mut settings.esp;
        esp.enable = true;
        esp.draw_box = true;
        esp.box_type = o.box_type;
        esp.box_filled = o.box_filled;
        esp.nickname = o.nickname;
        esp.health = true;
        esp.health_bar_pos = HealthBarPos::Left;
        // Snaplines clutter the screen at every preset level
        esp.snaplines = false;
        esp.distance = true;
        esp.skeleton = o.skeleton;
        esp.indicator = o.indicator;
        esp.max_esp_distance = o.max_esp_distance;

        settings.misc.stream_proof = o.stream_proof;
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "legit" => Ok(Preset::Legit),
            "semilegit" => Ok(Preset::SemiLegit),
            "rage" => Ok(Preset::Rage),
            "hvh" => Ok(Preset::HvH),
            _ => Err(format!(
                "Unknown preset '{s}' (expected one of: legit, semi-legit, rage, hvh)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Rgba;
    use crate::config::keys::VirtualKey;

    #[test]
    fn test_legit_values() {
        let mut settings = Settings::default();
        Preset::Legit.apply(&mut settings);

        assert!(settings.aim.enable);
        assert_eq!(settings.aim.smoothing_x, 15.0);
        assert_eq!(settings.aim.smoothing_y, 15.0);
        assert_eq!(settings.aim.fov, 45.0);
        assert!(settings.aim.visible_check);
        assert_eq!(settings.esp.max_esp_distance, 150);
        assert!(settings.esp.distance);
        assert!(settings.misc.stream_proof);
    }

    #[test]
    fn test_apply_twice_matches_once() {
        for preset in Preset::ALL {
            let mut once = Settings::default();
            preset.apply(&mut once);

            let mut twice = once.clone();
            preset.apply(&mut twice);

            assert_eq!(once, twice, "{preset} is not idempotent");
        }
    }

    #[test]
    fn test_uncovered_fields_untouched() {
        let mut settings = Settings::default();
        settings.aim.aim_key = VirtualKey(0x06);
        settings.aim.target_line_color = Rgba::GREEN;
        settings.aim.smart_target_selection = true;
        settings.esp.nickname_visible_color = Rgba::RED;
        settings.misc.enable_crosshair = true;
        settings.misc.crosshair_gap = 9.0;
        let before = settings.clone();

        for preset in Preset::ALL {
            preset.apply(&mut settings);
            assert_eq!(settings.aim.aim_key, before.aim.aim_key);
            assert_eq!(settings.aim.target_line_color, before.aim.target_line_color);
            assert!(settings.aim.smart_target_selection);
            assert_eq!(
                settings.esp.nickname_visible_color,
                before.esp.nickname_visible_color
            );
            assert_eq!(settings.misc.enable_crosshair, before.misc.enable_crosshair);
            assert_eq!(settings.misc.crosshair_gap, before.misc.crosshair_gap);
        }
    }

    #[test]
    fn test_legit_keeps_target_lock_tuning() {
        let mut settings = Settings::default();
        Preset::Rage.apply(&mut settings);
        assert_eq!(settings.aim.target_lock_timeout, 5.0);

        Preset::Legit.apply(&mut settings);
        assert!(!settings.aim.target_lock);
        assert_eq!(settings.aim.target_lock_timeout, 5.0);
        assert_eq!(settings.aim.target_lock_range, 2.5);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Preset::from_index(0), Some(Preset::Legit));
        assert_eq!(Preset::from_index(3), Some(Preset::HvH));
        assert_eq!(Preset::from_index(4), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Semi-Legit".parse::<Preset>(), Ok(Preset::SemiLegit));
        assert_eq!("semilegit".parse::<Preset>(), Ok(Preset::SemiLegit));
        assert_eq!("HVH".parse::<Preset>(), Ok(Preset::HvH));
        assert!("aggressive".parse::<Preset>().is_err());

        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
    }
}
