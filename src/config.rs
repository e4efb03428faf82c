use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::system::collector::DEFAULT_TOP_N;
use crate::system::reader::SourcePaths;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub paths: PathsConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// How many processes the table lists.
    pub max_processes: usize,
    pub show_command: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            max_processes: DEFAULT_TOP_N,
            show_command: true,
        }
    }
}

/// Locations of the OS status sources. Pointing these elsewhere lets the
/// monitor read a host `/proc` mounted inside a container.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let defaults = SourcePaths::default();
        PathsConfig {
            proc_root: defaults.proc_root,
            os_release: defaults.os_release,
            passwd: defaults.passwd,
        }
    }
}

impl PathsConfig {
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            proc_root: self.proc_root.clone(),
            os_release: self.os_release.clone(),
            passwd: self.passwd.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub color_support: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            color_support: "auto".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub refresh: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            refresh: "r".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parses a keybind name such as `q`, `Enter` or `F5`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("proctop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config; using defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.max_processes, 10);
        assert!(config.general.show_command);
        assert_eq!(config.paths.proc_root, PathBuf::from("/proc"));
        assert_eq!(config.paths.passwd, PathBuf::from("/etc/passwd"));
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
max_processes = 25
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.max_processes, 25);
        assert!(config.general.show_command);
        assert_eq!(config.paths.os_release, PathBuf::from("/etc/os-release"));
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
max_processes = 5
show_command = false

[paths]
proc_root = "/host/proc"
os_release = "/host/etc/os-release"
passwd = "/host/etc/passwd"

[colors]
theme = "light"
color_support = "256"

[keybinds]
quit = "x"
refresh = "F5"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.max_processes, 5);
        assert!(!config.general.show_command);
        let paths = config.paths.source_paths();
        assert_eq!(paths.proc_root, PathBuf::from("/host/proc"));
        assert_eq!(paths.passwd, PathBuf::from("/host/etc/passwd"));
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.color_support, "256");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.help, "?");
    }

    #[test]
    fn parses_key_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("F5"), Some(KeyCode::F(5)));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key("nonsense"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.max_processes, 10);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("proctop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.max_processes, 10);
        let _ = std::fs::remove_file(&temp);
    }
}
