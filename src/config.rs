use std::{
    borrow::Cow,
    env,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use egui::Color32;
use serde::{Deserialize, Deserializer};

use crate::model::Exec;

pub const BACKGROUND_COLOR: Color32 = Color32::BLACK;
pub const ROW_HEIGHT: f32 = 36.0;

/// `~/.config/slate/config.toml`: default shortcut seeds plus the dialer and
/// camera commands. Missing or invalid config falls back to the built-ins.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "shortcut")]
    pub shortcuts: Vec<Seed>,

    #[serde(deserialize_with = "deserialize_exec")]
    pub dialer: Exec,

    #[serde(deserialize_with = "deserialize_exec")]
    pub camera: Exec,
}

/// A default-shortcut candidate. Only an id and a label; whether the
/// application is actually installed is not checked at seed time.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Seed {
    pub id: String,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        let seed = |id: &str, name: &str| Seed {
            id: id.to_owned(),
            name: name.to_owned(),
        };

        Config {
            shortcuts: vec![
                seed("org.gnome.Calls", "Phone"),
                seed("org.gnome.Calendar", "Calendar"),
                seed("org.gnome.Calculator", "Calculator"),
                seed("sm.puri.Chatty", "Messages"),
            ],
            dialer: Exec {
                cmd: "gnome-calls".to_owned(),
                args: vec![],
            },
            camera: Exec {
                cmd: "snapshot".to_owned(),
                args: vec![],
            },
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;

        let cfg = toml::from_str(&buf)?;

        Ok(cfg)
    }

    /// Loads the user config, falling back to defaults when it is absent or
    /// unreadable. Never fails.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(&path)
            .map_err(|err| {
                log::warn!("failed to load config from {}: {err}", path.display());
            })
            .unwrap_or_default()
    }
}

fn config_path() -> Option<PathBuf> {
    let base = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config_home)
    } else if let Ok(home) = env::var("HOME") {
        let mut dir = PathBuf::from(home);
        dir.push(".config");
        dir
    } else {
        return None;
    };

    Some(base.join("slate").join("config.toml"))
}

fn deserialize_exec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Exec, D::Error> {
    let s = Cow::<'static, str>::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}
