/*
 * The palette file that drives every redraw. It lives next to the injected
 * module as `<module-filename>.ini`, holds six `key = r,g,b` lines, and is
 * generated with the default dark palette the first time the shim runs.
 *
 * Reading is forgiving: a missing or malformed key yields a black color rather
 * than an error, because a bad palette must never take the host down.
 */

use crate::error::{Result, ShimError};
use crate::styling_primitives::Color;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The six palette entries, in the order they appear in the default file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    MenuBarText,
    MenuBarTextDisabled,
    MenuBarBackground,
    MenuItemBackground,
    MenuItemBackgroundHot,
    MenuItemBackgroundSelected,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 6] = [
        ThemeKey::MenuBarText,
        ThemeKey::MenuBarTextDisabled,
        ThemeKey::MenuBarBackground,
        ThemeKey::MenuItemBackground,
        ThemeKey::MenuItemBackgroundHot,
        ThemeKey::MenuItemBackgroundSelected,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ThemeKey::MenuBarText => "menubar_textcolor",
            ThemeKey::MenuBarTextDisabled => "menubar_textcolor_disabled",
            ThemeKey::MenuBarBackground => "menubar_bgcolor",
            ThemeKey::MenuItemBackground => "menubaritem_bgcolor",
            ThemeKey::MenuItemBackgroundHot => "menubaritem_bgcolor_hot",
            ThemeKey::MenuItemBackgroundSelected => "menubaritem_bgcolor_selected",
        }
    }

    pub const fn default_color(self) -> Color {
        match self {
            ThemeKey::MenuBarText => Color::rgb(200, 200, 200),
            ThemeKey::MenuBarTextDisabled => Color::rgb(160, 160, 160),
            ThemeKey::MenuBarBackground | ThemeKey::MenuItemBackground => Color::rgb(48, 48, 48),
            ThemeKey::MenuItemBackgroundHot | ThemeKey::MenuItemBackgroundSelected => {
                Color::rgb(62, 62, 62)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeConfig {
    pub menubar_text: Color,
    pub menubar_text_disabled: Color,
    pub menubar_bg: Color,
    pub menuitem_bg: Color,
    pub menuitem_bg_hot: Color,
    pub menuitem_bg_selected: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::from_lookup(|key| key.default_color())
    }
}

impl ThemeConfig {
    fn from_lookup(mut lookup: impl FnMut(ThemeKey) -> Color) -> Self {
        ThemeConfig {
            menubar_text: lookup(ThemeKey::MenuBarText),
            menubar_text_disabled: lookup(ThemeKey::MenuBarTextDisabled),
            menubar_bg: lookup(ThemeKey::MenuBarBackground),
            menuitem_bg: lookup(ThemeKey::MenuItemBackground),
            menuitem_bg_hot: lookup(ThemeKey::MenuItemBackgroundHot),
            menuitem_bg_selected: lookup(ThemeKey::MenuItemBackgroundSelected),
        }
    }

    pub fn color(&self, key: ThemeKey) -> Color {
        match key {
            ThemeKey::MenuBarText => self.menubar_text,
            ThemeKey::MenuBarTextDisabled => self.menubar_text_disabled,
            ThemeKey::MenuBarBackground => self.menubar_bg,
            ThemeKey::MenuItemBackground => self.menuitem_bg,
            ThemeKey::MenuItemBackgroundHot => self.menuitem_bg_hot,
            ThemeKey::MenuItemBackgroundSelected => self.menuitem_bg_selected,
        }
    }

    /*
     * Builds a config from INI-style text. Only keys of the leading unnamed
     * section count; later `[section]` blocks are ignored. A key that is absent
     * or whose value does not parse as `r,g,b` becomes black.
     */
    pub fn parse(text: &str) -> Self {
        let values = global_section_values(text);
        Self::from_lookup(|key| match values.get(key.name()) {
            Some(raw) => raw.parse::<Color>().unwrap_or_else(|err| {
                log::warn!("ThemeConfig: {}: {err}; using black", key.name());
                Color::BLACK
            }),
            None => {
                log::warn!("ThemeConfig: key '{}' missing; using black", key.name());
                Color::BLACK
            }
        })
    }
}

/// Text of the palette file written when none exists yet.
pub fn default_config_text() -> String {
    ThemeKey::ALL
        .iter()
        .map(|key| format!("{} = {}\n", key.name(), key.default_color()))
        .collect()
}

/// `C:\...\UnityEditorDarkMode.dll` -> `C:\...\UnityEditorDarkMode.dll.ini`.
pub fn config_path_for_module(module_path: &Path) -> PathBuf {
    let mut path = module_path.as_os_str().to_owned();
    path.push(".ini");
    PathBuf::from(path)
}

/*
 * Reads the palette at `path`, first writing the default file if nothing is
 * there. I/O failures are returned so the caller can decide how to degrade.
 */
pub fn load_or_create(path: &Path) -> Result<ThemeConfig> {
    if !path.exists() {
        log::debug!("ThemeConfig: writing default palette to {path:?}");
        fs::write(path, default_config_text()).map_err(|err| ShimError::io(path, err))?;
    }
    let text = fs::read_to_string(path).map_err(|err| ShimError::io(path, err))?;
    let config = ThemeConfig::parse(&text);
    log::debug!("ThemeConfig: loaded {config:?} from {path:?}");
    Ok(config)
}

fn global_section_values(text: &str) -> HashMap<&str, &str> {
    let mut values = HashMap::new();
    let mut in_global_section = true;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_global_section = false;
            continue;
        }
        if !in_global_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.entry(key.trim()).or_insert(value.trim());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = "\
menubar_textcolor = 1,2,3
menubar_textcolor_disabled = 4,5,6
menubar_bgcolor = 7,8,9
menubaritem_bgcolor = 10,11,12
menubaritem_bgcolor_hot = 13,14,15
menubaritem_bgcolor_selected = 16,17,18
";

    #[test]
    fn parse_reads_all_six_keys() {
        let config = ThemeConfig::parse(CUSTOM);
        assert_eq!(config.menubar_text, Color::rgb(1, 2, 3));
        assert_eq!(config.menubar_text_disabled, Color::rgb(4, 5, 6));
        assert_eq!(config.menubar_bg, Color::rgb(7, 8, 9));
        assert_eq!(config.menuitem_bg, Color::rgb(10, 11, 12));
        assert_eq!(config.menuitem_bg_hot, Color::rgb(13, 14, 15));
        assert_eq!(config.menuitem_bg_selected, Color::rgb(16, 17, 18));
    }

    #[test]
    fn missing_and_malformed_keys_fall_back_to_black() {
        let config = ThemeConfig::parse("menubar_textcolor = 10,20\nmenubar_bgcolor = 7,8,9\n");
        assert_eq!(config.menubar_text, Color::BLACK);
        assert_eq!(config.menuitem_bg_hot, Color::BLACK);
        assert_eq!(config.menubar_bg, Color::rgb(7, 8, 9));
    }

    #[test]
    fn comments_and_named_sections_are_ignored() {
        let text = "; palette\n# note\nmenubar_bgcolor = 1,1,1\n[other]\nmenubar_textcolor = 9,9,9\n";
        let config = ThemeConfig::parse(text);
        assert_eq!(config.menubar_bg, Color::rgb(1, 1, 1));
        assert_eq!(config.menubar_text, Color::BLACK);
    }

    #[test]
    fn first_occurrence_of_a_duplicate_key_wins() {
        let config = ThemeConfig::parse("menubar_bgcolor = 1,1,1\nmenubar_bgcolor = 2,2,2\n");
        assert_eq!(config.menubar_bg, Color::rgb(1, 1, 1));
    }

    #[test]
    fn default_text_has_the_six_documented_lines() {
        let text = default_config_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "menubar_textcolor = 200,200,200",
                "menubar_textcolor_disabled = 160,160,160",
                "menubar_bgcolor = 48,48,48",
                "menubaritem_bgcolor = 48,48,48",
                "menubaritem_bgcolor_hot = 62,62,62",
                "menubaritem_bgcolor_selected = 62,62,62",
            ]
        );
    }

    #[test]
    fn config_path_appends_ini_extension() {
        let path = config_path_for_module(Path::new("plugins/UnityEditorDarkMode.dll"));
        assert_eq!(path, PathBuf::from("plugins/UnityEditorDarkMode.dll.ini"));
    }

    #[test]
    fn load_or_create_writes_defaults_and_reloads_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shim.dll.ini");

        let config = load_or_create(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), default_config_text());
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.menubar_bg, Color::rgb(48, 48, 48));
        assert_eq!(config.menuitem_bg, Color::rgb(48, 48, 48));
        assert_eq!(config.menuitem_bg_hot, Color::rgb(62, 62, 62));
        assert_eq!(config.menuitem_bg_selected, Color::rgb(62, 62, 62));
        assert_eq!(config.menubar_text, Color::rgb(200, 200, 200));
        assert_eq!(config.menubar_text_disabled, Color::rgb(160, 160, 160));
    }

    #[test]
    fn load_or_create_keeps_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shim.dll.ini");
        fs::write(&path, CUSTOM).unwrap();

        let first = load_or_create(&path).unwrap();
        let second = load_or_create(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), CUSTOM);
        assert_eq!(first, second);
        assert_eq!(first.color(ThemeKey::MenuItemBackgroundSelected), Color::rgb(16, 17, 18));
    }

    #[test]
    fn load_or_create_reports_io_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("shim.dll.ini");
        assert!(matches!(load_or_create(&path), Err(ShimError::Io { .. })));
    }
}
