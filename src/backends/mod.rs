//! Platform backends: thin glue that pushes a composed theme into a desktop
//! environment's configuration mechanisms.

pub mod gnome;
pub mod kde;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::theme::ThemeRecord;

/// Capability set every platform implements. Selected by explicit
/// [`Platform`] configuration, never by name lookup.
pub trait ThemeBackend {
    fn name(&self) -> &'static str;

    /// Apply the theme's colors through the platform's configuration tools.
    fn apply_colors(&self, theme: &ThemeRecord) -> Result<()>;

    /// Set the desktop wallpaper.
    fn set_wallpaper(&self, wallpaper: &Path) -> Result<()>;

    /// Snapshot of the currently configured theme, as key/value pairs.
    fn current_theme(&self) -> Result<BTreeMap<String, String>>;

    /// Nudge the environment to pick up changes, where needed.
    fn refresh(&self) -> Result<()> {
        Ok(())
    }
}

/// Supported desktop platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    Gnome,
    Kde,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Gnome, Platform::Kde];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Gnome => "gnome",
            Platform::Kde => "kde",
        }
    }

    /// Detect the platform from `XDG_CURRENT_DESKTOP` (a colon-separated
    /// list, e.g. `ubuntu:GNOME`).
    pub fn detect() -> Option<Platform> {
        let desktop = std::env::var("XDG_CURRENT_DESKTOP").ok()?.to_lowercase();
        if desktop.contains("gnome") {
            Some(Platform::Gnome)
        } else if desktop.contains("kde") {
            Some(Platform::Kde)
        } else {
            None
        }
    }

    pub fn backend(self) -> Box<dyn ThemeBackend> {
        match self {
            Platform::Gnome => Box::new(gnome::GnomeBackend),
            Platform::Kde => Box::new(kde::KdeBackend),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct AppliedRecord<'a> {
    platform: &'static str,
    applied_at: String,
    theme: &'a ThemeRecord,
}

#[derive(Serialize)]
struct BackupRecord {
    platform: &'static str,
    captured_at: String,
    theme: BTreeMap<String, String>,
}

/// Applies themes through a platform backend and records what was applied.
pub struct ThemeManager {
    platform: Platform,
    backend: Box<dyn ThemeBackend>,
    config_dir: PathBuf,
}

impl ThemeManager {
    pub fn new(platform: Platform) -> Self {
        Self::with_backend(platform, platform.backend(), config_dir())
    }

    fn with_backend(
        platform: Platform,
        backend: Box<dyn ThemeBackend>,
        config_dir: PathBuf,
    ) -> Self {
        Self {
            platform,
            backend,
            config_dir,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Apply a theme: back up the current one, set the wallpaper, push the
    /// colors, persist the applied record, then refresh.
    ///
    /// Wallpaper and backup failures are logged but do not abort the apply;
    /// a color-application failure does.
    pub fn apply(&self, theme: &ThemeRecord, wallpaper: Option<&Path>) -> Result<()> {
        info!(platform = %self.platform, theme = %theme.name, "applying theme");

        if let Err(err) = self.backup_current() {
            warn!(error = %err, "could not back up current theme");
        }

        if let Some(wallpaper) = wallpaper {
            match self.backend.set_wallpaper(wallpaper) {
                Ok(()) => info!(wallpaper = %wallpaper.display(), "wallpaper set"),
                Err(err) => warn!(error = %err, "could not set wallpaper"),
            }
        }

        self.backend
            .apply_colors(theme)
            .with_context(|| format!("applying colors via {}", self.backend.name()))?;

        self.save_applied(theme)?;

        if let Err(err) = self.backend.refresh() {
            warn!(error = %err, "refresh failed");
        }
        Ok(())
    }

    /// Current theme snapshot from the backend.
    pub fn current_theme(&self) -> Result<BTreeMap<String, String>> {
        self.backend.current_theme()
    }

    fn backup_current(&self) -> Result<()> {
        let theme = self.backend.current_theme()?;
        let record = BackupRecord {
            platform: self.platform.as_str(),
            captured_at: chrono::Local::now().to_rfc3339(),
            theme,
        };
        let path = self.config_dir.join("backup.json");
        write_json(&path, &record)?;
        info!(path = %path.display(), "current theme backed up");
        Ok(())
    }

    fn save_applied(&self, theme: &ThemeRecord) -> Result<()> {
        let record = AppliedRecord {
            platform: self.platform.as_str(),
            applied_at: chrono::Local::now().to_rfc3339(),
            theme,
        };
        let path = self
            .config_dir
            .join(format!("theme_{}.json", self.platform));
        write_json(&path, &record)?;
        info!(path = %path.display(), "applied theme saved");
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Resolve the walltint config directory (`$XDG_CONFIG_HOME/walltint`).
pub fn config_dir() -> PathBuf {
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    config_home.join("walltint")
}

pub(crate) fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "~".to_string()))
}

/// Run a command and capture stdout. Non-zero exit becomes an error carrying
/// the command's stderr.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to run {program}"))?;
    if !output.status.success() {
        bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compose, DEFAULT_PALETTE};
    use crate::theme::Mode;

    struct StubBackend;

    impl ThemeBackend for StubBackend {
        fn name(&self) -> &'static str {
            "stub"
        }
        fn apply_colors(&self, _theme: &ThemeRecord) -> Result<()> {
            Ok(())
        }
        fn set_wallpaper(&self, _wallpaper: &Path) -> Result<()> {
            bail!("no display")
        }
        fn current_theme(&self) -> Result<BTreeMap<String, String>> {
            Ok(BTreeMap::from([(
                "gtk_theme".to_string(),
                "Adwaita".to_string(),
            )]))
        }
    }

    fn test_theme() -> ThemeRecord {
        compose::compose_theme(&DEFAULT_PALETTE, Mode::Dark)
    }

    #[test]
    fn apply_writes_backup_and_applied_records() {
        let dir = std::env::temp_dir().join("walltint-test-manager-apply");
        let manager =
            ThemeManager::with_backend(Platform::Gnome, Box::new(StubBackend), dir.clone());

        manager
            .apply(&test_theme(), Some(Path::new("/tmp/wall.png")))
            .unwrap();

        let backup: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("backup.json")).unwrap())
                .unwrap();
        assert_eq!(backup["platform"], "gnome");
        assert_eq!(backup["theme"]["gtk_theme"], "Adwaita");

        let applied: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("theme_gnome.json")).unwrap())
                .unwrap();
        assert_eq!(applied["theme"]["mode"], "dark");
        assert!(applied["applied_at"].is_string());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn wallpaper_failure_does_not_abort_apply() {
        let dir = std::env::temp_dir().join("walltint-test-manager-wallpaper");
        let manager =
            ThemeManager::with_backend(Platform::Kde, Box::new(StubBackend), dir.clone());

        // StubBackend's set_wallpaper always fails; apply must still succeed.
        let result = manager.apply(&test_theme(), Some(Path::new("/tmp/wall.png")));
        assert!(result.is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn detect_matches_desktop_names() {
        std::env::set_var("XDG_CURRENT_DESKTOP", "ubuntu:GNOME");
        assert_eq!(Platform::detect(), Some(Platform::Gnome));
        std::env::set_var("XDG_CURRENT_DESKTOP", "KDE");
        assert_eq!(Platform::detect(), Some(Platform::Kde));
        std::env::set_var("XDG_CURRENT_DESKTOP", "sway");
        assert_eq!(Platform::detect(), None);
        std::env::remove_var("XDG_CURRENT_DESKTOP");
    }

    #[test]
    fn platform_display_is_lowercase() {
        assert_eq!(Platform::Gnome.to_string(), "gnome");
        assert_eq!(Platform::Kde.to_string(), "kde");
    }
}
