//! Command-line front end over [`ConfigManager`]
//!
//! Each invocation works on a working profile: it is merged into a default
//! bundle first and written back if the command changed the live settings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::config::{
    ConfigManager, FixedPicker, Preset, ProfileStore, Settings, StatusLevel, VirtualKey,
};
use crate::constants::config::{DIR_ENV_VAR, PROFILE_DIR, WORKING_PROFILE};

#[derive(Parser)]
#[command(name = "overlay-config")]
#[command(version)]
#[command(about = "Manage overlay presets and saved configuration profiles", long_about = None)]
pub struct Cli {
    /// Directory holding one JSON file per profile
    #[arg(long, global = true, env = DIR_ENV_VAR, default_value = PROFILE_DIR)]
    config_dir: PathBuf,

    /// Working profile loaded before the command and saved after it if settings changed
    #[arg(long, global = true, default_value = WORKING_PROFILE)]
    profile: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in presets
    Presets,
    /// Apply a built-in preset by name or index
    Preset { preset: String },
    /// Save the working settings as a named profile
    Save { name: String },
    /// Merge a named profile into the working settings
    Load { name: String },
    /// Reset the working settings to defaults
    Reset,
    /// Export the working settings to a file (omit the path to cancel)
    Export { path: Option<PathBuf> },
    /// Merge settings from a file (omit the path to cancel)
    Import { path: Option<PathBuf> },
    /// List saved profiles
    List,
    /// Delete a saved profile
    Delete { name: String },
    /// Print the working settings
    Show,
    /// Set the aim key (name like "Mouse4" or "F", or a virtual-key code)
    SetKey { key: VirtualKey },
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let store = ProfileStore::new(&cli.config_dir);
    let mut manager = ConfigManager::new(store);

    if manager.store().path_for(&cli.profile)?.exists() {
        manager.load_config(&cli.profile);
        if let Some(status) = &manager.status_message
            && status.level == StatusLevel::Error
        {
            // Don't overwrite a working profile we could not read
            eprintln!("{}", status.text);
            return Ok(ExitCode::FAILURE);
        }
    }
    manager.settings_changed = false;
    manager.status_message = None;

    match cli.command {
        Command::Presets => {
            for (idx, preset) in Preset::ALL.iter().enumerate() {
                println!("{idx}: {:<10} {}", preset.name(), preset.description());
            }
        }
        Command::Preset { preset } => match preset.parse::<usize>() {
            Ok(index) => manager.apply_preset_index(index),
            Err(_) => match preset.parse::<Preset>() {
                Ok(preset) => manager.apply_preset(preset),
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
            },
        },
        Command::Save { name } => manager.save_config(&name),
        Command::Load { name } => manager.load_config(&name),
        Command::Reset => manager.reset_to_defaults(),
        Command::Export { path } => manager.export(&FixedPicker(path)),
        Command::Import { path } => manager.import(&FixedPicker(path)),
        Command::List => {
            for profile in manager.list_configs() {
                match profile.metadata.as_ref().and_then(|m| m.created_local()) {
                    Some(created) => println!(
                        "{:<24} {}",
                        profile.name,
                        created.format("%Y-%m-%d %H:%M:%S")
                    ),
                    None => println!(
                        "{:<24} (unreadable: {})",
                        profile.name,
                        profile.path.display()
                    ),
                }
            }
        }
        Command::Delete { name } => manager.delete_config(&name),
        Command::Show => print_settings(manager.settings()),
        Command::SetKey { key } => {
            manager.settings_mut().aim.aim_key = key;
            info!(key = %key, "Aim key set");
        }
    }

    // Report the command's own result before the write-back can replace it
    let status = manager.status_message.take();

    if manager.settings_changed {
        manager.save_config(&cli.profile);
        if let Some(save_status) = &manager.status_message
            && save_status.level == StatusLevel::Error
        {
            eprintln!("{}", save_status.text);
            return Ok(ExitCode::FAILURE);
        }
    }

    match status {
        Some(status) if status.level == StatusLevel::Error => {
            eprintln!("{}", status.text);
            Ok(ExitCode::FAILURE)
        }
        Some(status) => {
            println!("{}", status.text);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn print_settings(settings: &Settings) {
    let aim = &settings.aim;
    println!("[aim]");
    println!("  enabled:          {}", on_off(aim.enable));
    println!("  smoothing:        {:.1} x {:.1}", aim.smoothing_x, aim.smoothing_y);
    println!("  fov:              {:.1} (shown: {})", aim.fov, on_off(aim.show_fov));
    println!("  bone:             {:?}", aim.aim_bone);
    println!("  visible check:    {}", on_off(aim.visible_check));
    println!(
        "  target lock:      {} ({:.1}s, x{:.1})",
        on_off(aim.target_lock),
        aim.target_lock_timeout,
        aim.target_lock_range
    );
    println!(
        "  target line:      {} {}",
        on_off(aim.target_line),
        aim.target_line_color
    );
    println!("  max distance:     {:.0}", aim.max_aimbot_distance);
    println!("  aim key:          {}", aim.aim_key);
    println!(
        "  smart targeting:  {} (distance {:.2}, health {:.2}, angle {:.2})",
        on_off(aim.smart_target_selection),
        aim.distance_weight,
        aim.health_weight,
        aim.angle_weight
    );

    let esp = &settings.esp;
    println!("[esp]");
    println!("  enabled:          {}", on_off(esp.enable));
    println!(
        "  box:              {} {:?} filled={} {} / {}",
        on_off(esp.draw_box),
        esp.box_type,
        on_off(esp.box_filled),
        esp.box_visible_outline_color,
        esp.box_invisible_outline_color
    );
    println!(
        "  nickname:         {} {} / {}",
        on_off(esp.nickname),
        esp.nickname_visible_color,
        esp.nickname_invisible_color
    );
    println!(
        "  health bar:       {} {:?}",
        on_off(esp.health),
        esp.health_bar_pos
    );
    println!(
        "  snaplines:        {} {} / {}",
        on_off(esp.snaplines),
        esp.snaplines_visible_color,
        esp.snaplines_invisible_color
    );
    println!(
        "  distance:         {} {} / {}",
        on_off(esp.distance),
        esp.distance_visible_color,
        esp.distance_invisible_color
    );
    println!(
        "  skeleton:         {} {} / {}",
        on_off(esp.skeleton),
        esp.skeleton_visible_color,
        esp.skeleton_invisible_color
    );
    println!("  indicator:        {}", on_off(esp.indicator));
    println!("  max distance:     {}", esp.max_esp_distance);

    let misc = &settings.misc;
    println!("[settings]");
    println!("  stream proof:     {}", on_off(misc.stream_proof));
    println!(
        "  crosshair:        {} size={:.1} thickness={:.1} gap={:.1} dot={} {}",
        on_off(misc.enable_crosshair),
        misc.crosshair_size,
        misc.crosshair_thickness,
        misc.crosshair_gap,
        on_off(misc.crosshair_dot),
        misc.crosshair_color
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    fn run_args(dir: &std::path::Path, args: &[&str]) -> ExitCode {
        let mut full = vec!["overlay-config", "--config-dir", dir.to_str().unwrap()];
        full.extend_from_slice(args);
        run(Cli::parse_from(full)).unwrap()
    }

    fn working(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        ProfileStore::new(dir)
            .load(WORKING_PROFILE, &mut settings)
            .unwrap();
        settings
    }

    #[test]
    fn test_preset_persists_to_working_profile() {
        let temp_dir = tempfile::tempdir().unwrap();

        assert_eq!(run_args(temp_dir.path(), &["preset", "legit"]), ExitCode::SUCCESS);
        assert_eq!(working(temp_dir.path()).aim.fov, 45.0);

        assert_eq!(run_args(temp_dir.path(), &["set-key", "mouse5"]), ExitCode::SUCCESS);
        let settings = working(temp_dir.path());
        assert_eq!(settings.aim.aim_key, VirtualKey(0x06));
        assert_eq!(settings.aim.fov, 45.0);
    }

    #[test]
    fn test_save_then_load_named() {
        let temp_dir = tempfile::tempdir().unwrap();

        run_args(temp_dir.path(), &["preset", "rage"]);
        run_args(temp_dir.path(), &["save", "Tournament"]);
        run_args(temp_dir.path(), &["reset"]);
        assert_eq!(working(temp_dir.path()), Settings::default());

        run_args(temp_dir.path(), &["load", "Tournament"]);
        assert_eq!(working(temp_dir.path()).aim.fov, 180.0);
    }

    #[test]
    fn test_invalid_preset_index_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();

        assert_eq!(run_args(temp_dir.path(), &["preset", "9"]), ExitCode::SUCCESS);
        assert!(!temp_dir.path().join("current.json").exists());

        assert_eq!(run_args(temp_dir.path(), &["preset", "casual"]), ExitCode::FAILURE);
    }

    #[test]
    fn test_broken_working_profile_is_not_overwritten() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("current.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert_eq!(run_args(temp_dir.path(), &["reset"]), ExitCode::FAILURE);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }
}
