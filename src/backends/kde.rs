use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::theme::ThemeRecord;

use super::{home_dir, run_command, ThemeBackend};

/// KDE Plasma backend: generated color-scheme files plus the
/// `plasma-apply-*` tools.
pub struct KdeBackend;

impl ThemeBackend for KdeBackend {
    fn name(&self) -> &'static str {
        "KDE Plasma"
    }

    fn apply_colors(&self, theme: &ThemeRecord) -> Result<()> {
        let path = install_color_scheme(theme, &schemes_dir())?;
        debug!(path = %path.display(), "color scheme written");
        run_command("plasma-apply-colorscheme", &[&scheme_name(theme)])?;
        Ok(())
    }

    fn set_wallpaper(&self, wallpaper: &Path) -> Result<()> {
        let path = wallpaper.to_string_lossy();
        if run_command("plasma-apply-wallpaperimage", &[path.as_ref()]).is_ok() {
            return Ok(());
        }
        // Older Plasma: drive the shell through its scripting interface.
        let script = wallpaper_script(wallpaper);
        run_command(
            "qdbus",
            &[
                "org.kde.plasmashell",
                "/PlasmaShell",
                "org.kde.PlasmaShell.evaluateScript",
                &script,
            ],
        )?;
        Ok(())
    }

    fn current_theme(&self) -> Result<BTreeMap<String, String>> {
        let mut theme = BTreeMap::new();
        let scheme = run_command(
            "kreadconfig5",
            &["--file", "kdeglobals", "--group", "General", "--key", "ColorScheme"],
        )?;
        theme.insert("color_scheme".to_string(), scheme);
        let name = run_command(
            "kreadconfig5",
            &["--file", "kdeglobals", "--group", "General", "--key", "Name"],
        )
        .unwrap_or_default();
        theme.insert("name".to_string(), name);
        Ok(theme)
    }
}

fn scheme_name(theme: &ThemeRecord) -> String {
    let mode = theme.mode.as_str();
    let mut capitalized = mode.to_string();
    capitalized[..1].make_ascii_uppercase();
    format!("Walltint{capitalized}")
}

fn schemes_dir() -> PathBuf {
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_home.join("color-schemes")
}

/// KDE color-scheme file contents (INI).
fn color_scheme_ini(theme: &ThemeRecord) -> String {
    let name = scheme_name(theme);
    let s = &theme.semantic;
    let accent = theme
        .accent_colors
        .first()
        .copied()
        .unwrap_or(theme.primary);
    format!(
        "[General]\n\
         Name={name}\n\
         ColorScheme={name}\n\
         \n\
         [ColorScheme]\n\
         ColorPalette={},{},{}\n\
         \n\
         [Colors:View]\n\
         BackgroundNormal={}\n\
         ForegroundNormal={}\n\
         DecorationFocus={}\n\
         \n\
         [Colors:Window]\n\
         BackgroundNormal={}\n\
         ForegroundNormal={}\n\
         \n\
         [Colors:Selection]\n\
         BackgroundNormal={}\n\
         ForegroundNormal={}\n",
        theme.primary,
        theme.secondary,
        accent,
        s.background,
        s.on_background,
        theme.primary,
        s.surface,
        s.on_surface,
        theme.primary,
        s.on_primary,
    )
}

/// Write the scheme file and return its path.
fn install_color_scheme(theme: &ThemeRecord, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.colors", scheme_name(theme)));
    std::fs::write(&path, color_scheme_ini(theme))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Plasma shell script that points every desktop at the wallpaper.
fn wallpaper_script(wallpaper: &Path) -> String {
    format!(
        "var allDesktops = desktops();\n\
         for (var i = 0; i < allDesktops.length; i++) {{\n\
             var desktop = allDesktops[i];\n\
             desktop.wallpaperPlugin = \"org.kde.image\";\n\
             desktop.currentConfigGroup = Array(\"Wallpaper\", \"org.kde.image\", \"General\");\n\
             desktop.writeConfig(\"Image\", \"file://{}\");\n\
         }}\n",
        wallpaper.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compose, DEFAULT_PALETTE};
    use crate::theme::Mode;

    fn test_theme(mode: Mode) -> ThemeRecord {
        compose::compose_theme(&DEFAULT_PALETTE, mode)
    }

    #[test]
    fn scheme_name_capitalizes_mode() {
        assert_eq!(scheme_name(&test_theme(Mode::Dark)), "WalltintDark");
        assert_eq!(scheme_name(&test_theme(Mode::Mixed)), "WalltintMixed");
    }

    #[test]
    fn ini_has_expected_sections_and_colors() {
        let theme = test_theme(Mode::Dark);
        let ini = color_scheme_ini(&theme);

        assert!(ini.starts_with("[General]\n"));
        for section in ["[ColorScheme]", "[Colors:View]", "[Colors:Window]", "[Colors:Selection]"] {
            assert!(ini.contains(section), "missing section {section}");
        }
        assert!(ini.contains("Name=WalltintDark"));
        assert!(ini.contains("BackgroundNormal=#121212"));
        assert!(ini.contains(&format!(
            "ColorPalette={},{},{}",
            theme.primary, theme.secondary, theme.accent_colors[0]
        )));
    }

    #[test]
    fn install_writes_scheme_file() {
        let dir = std::env::temp_dir().join("walltint-test-kde-install");
        let theme = test_theme(Mode::Light);

        let path = install_color_scheme(&theme, &dir).unwrap();
        assert_eq!(path, dir.join("WalltintLight.colors"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, color_scheme_ini(&theme));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn wallpaper_script_embeds_file_uri() {
        let script = wallpaper_script(Path::new("/tmp/wall.png"));
        assert!(script.contains("file:///tmp/wall.png"));
        assert!(script.contains("org.kde.image"));
    }
}
