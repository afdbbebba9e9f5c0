use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::theme::{Mode, ThemeRecord};

use super::{home_dir, run_command, ThemeBackend};

const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";
const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

/// GNOME backend: generated GTK themes plus gsettings.
pub struct GnomeBackend;

impl ThemeBackend for GnomeBackend {
    fn name(&self) -> &'static str {
        "GNOME"
    }

    fn apply_colors(&self, theme: &ThemeRecord) -> Result<()> {
        let slug = install_gtk_theme(theme, &home_dir().join(".themes"))?;
        install_libadwaita_css(theme)?;

        let scheme = match theme.mode {
            Mode::Dark => "prefer-dark",
            Mode::Light | Mode::Mixed => "prefer-light",
        };
        run_command(
            "gsettings",
            &["set", INTERFACE_SCHEMA, "color-scheme", scheme],
        )?;
        run_command("gsettings", &["set", INTERFACE_SCHEMA, "gtk-theme", &slug])?;
        Ok(())
    }

    fn set_wallpaper(&self, wallpaper: &Path) -> Result<()> {
        let uri = format!("file://{}", wallpaper.display());
        run_command(
            "gsettings",
            &["set", BACKGROUND_SCHEMA, "picture-uri", &uri],
        )?;
        run_command(
            "gsettings",
            &["set", BACKGROUND_SCHEMA, "picture-uri-dark", &uri],
        )?;
        Ok(())
    }

    fn current_theme(&self) -> Result<BTreeMap<String, String>> {
        let mut theme = BTreeMap::new();
        let gtk_theme = run_command("gsettings", &["get", INTERFACE_SCHEMA, "gtk-theme"])?;
        theme.insert("gtk_theme".to_string(), unquote(&gtk_theme));
        let scheme = run_command("gsettings", &["get", INTERFACE_SCHEMA, "color-scheme"])?;
        theme.insert("color_scheme".to_string(), unquote(&scheme));
        Ok(theme)
    }
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches('\'').to_string()
}

fn theme_slug(theme: &ThemeRecord) -> String {
    format!("walltint-{}", theme.mode)
}

/// GTK CSS shared by the gtk-3.0 and gtk-4.0 theme directories.
fn gtk_css(theme: &ThemeRecord) -> String {
    let s = &theme.semantic;
    format!(
        "@define-color theme_bg_color {};\n\
         @define-color theme_base_color {};\n\
         @define-color theme_fg_color {};\n\
         @define-color theme_text_color {};\n\
         @define-color theme_selected_bg_color {};\n\
         @define-color theme_selected_fg_color {};\n\
         @define-color warning_color {};\n\
         @define-color error_color {};\n\
         @define-color success_color {};\n",
        s.background,
        s.surface,
        s.on_background,
        s.on_surface,
        theme.primary,
        s.on_primary,
        s.warning,
        s.error,
        s.success,
    )
}

/// libadwaita override CSS for `$XDG_CONFIG_HOME/gtk-4.0/gtk.css`.
fn libadwaita_css(theme: &ThemeRecord) -> String {
    let s = &theme.semantic;
    format!(
        "@define-color accent_color {};\n\
         @define-color accent_bg_color {};\n\
         @define-color window_bg_color {};\n\
         @define-color view_bg_color {};\n\
         @define-color text_color {};\n\
         @define-color window_fg_color {};\n",
        theme.primary, theme.primary, s.background, s.surface, s.on_background, s.on_background,
    )
}

/// Write the generated GTK theme under `themes_root/<slug>/gtk-{3.0,4.0}/`.
/// Returns the slug for `gsettings set gtk-theme`.
fn install_gtk_theme(theme: &ThemeRecord, themes_root: &Path) -> Result<String> {
    let slug = theme_slug(theme);
    let css = gtk_css(theme);
    for version in ["gtk-3.0", "gtk-4.0"] {
        let dir = themes_root.join(&slug).join(version);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        std::fs::write(dir.join("gtk.css"), &css)
            .with_context(|| format!("failed to write gtk.css under {}", dir.display()))?;
    }
    Ok(slug)
}

fn install_libadwaita_css(theme: &ThemeRecord) -> Result<()> {
    let dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("gtk-4.0");
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(dir.join("gtk.css"), libadwaita_css(theme))
        .with_context(|| format!("failed to write {}", dir.join("gtk.css").display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compose, DEFAULT_PALETTE};

    fn test_theme(mode: Mode) -> ThemeRecord {
        compose::compose_theme(&DEFAULT_PALETTE, mode)
    }

    #[test]
    fn gtk_css_carries_semantic_colors() {
        let theme = test_theme(Mode::Light);
        let css = gtk_css(&theme);
        assert!(css.contains("@define-color theme_bg_color #ffffff;"));
        assert!(css.contains("@define-color theme_fg_color #212529;"));
        assert!(css.contains(&format!(
            "@define-color theme_selected_bg_color {};",
            theme.primary
        )));
    }

    #[test]
    fn libadwaita_css_uses_primary_as_accent() {
        let theme = test_theme(Mode::Dark);
        let css = libadwaita_css(&theme);
        assert!(css.contains(&format!("@define-color accent_color {};", theme.primary)));
        assert!(css.contains("@define-color window_bg_color #121212;"));
    }

    #[test]
    fn slug_includes_mode() {
        assert_eq!(theme_slug(&test_theme(Mode::Mixed)), "walltint-mixed");
    }

    #[test]
    fn install_writes_both_gtk_versions() {
        let root = std::env::temp_dir().join("walltint-test-gnome-install");
        let theme = test_theme(Mode::Dark);

        let slug = install_gtk_theme(&theme, &root).unwrap();
        assert_eq!(slug, "walltint-dark");
        for version in ["gtk-3.0", "gtk-4.0"] {
            let css_path = root.join(&slug).join(version).join("gtk.css");
            let content = std::fs::read_to_string(&css_path).unwrap();
            assert_eq!(content, gtk_css(&theme));
        }

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn every_css_color_is_lowercase_hex() {
        let css = gtk_css(&test_theme(Mode::Mixed));
        for line in css.lines() {
            let hex = line
                .rsplit(' ')
                .next()
                .unwrap()
                .trim_end_matches(';');
            assert_eq!(hex.len(), 7, "bad color in line: {line}");
            assert!(hex.starts_with('#'));
            assert_eq!(hex, hex.to_lowercase());
        }
    }
}
