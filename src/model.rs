use std::hash::{Hash, Hasher};
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;

use anyhow::{Context, Result};

/// A launchable application as shown on the home screen.
///
/// `id` is the desktop-entry id (the `.desktop` file stem) and is the only
/// field that participates in equality — two entries with the same id are the
/// same application. `exec` is present for entries discovered in the desktop
/// database and absent for entries seeded from configuration.
#[derive(Debug, Clone)]
pub struct AppEntry {
    pub name: String,
    pub id: String,
    pub icon: Option<String>,
    pub exec: Option<Exec>,
}

impl PartialEq for AppEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AppEntry {}

impl Hash for AppEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl AppEntry {
    /// Parses a `.desktop` file. Returns `Ok(None)` for entries that should
    /// not appear in a launcher (`NoDisplay`, `Hidden`, non-application
    /// types).
    pub fn from_desktop_file(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let entry = freedesktop_entry_parser::parse_entry(path)?;
        let section = entry.section("Desktop Entry");

        if section.attr("Type") != Some("Application") {
            return Ok(None);
        }

        if section.attr("NoDisplay") == Some("true") || section.attr("Hidden") == Some("true") {
            return Ok(None);
        }

        let name = section
            .attr("Name")
            .map(str::to_owned)
            .context("Name not found")?;

        let exec = section
            .attr("Exec")
            .context("Exec not found")?
            .parse::<Exec>()?;

        let icon = section.attr("Icon").map(str::to_owned);

        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .context("invalid desktop file name")?
            .to_owned();

        Ok(Some(AppEntry {
            name,
            id,
            icon,
            exec: Some(exec),
        }))
    }
}

/// Resolves an application id against the installed catalog. `None` means
/// there is nothing launchable behind the id; the caller decides to skip.
pub fn resolve_launch<'a>(catalog: &'a [AppEntry], id: &str) -> Option<&'a Exec> {
    catalog
        .iter()
        .find(|entry| entry.id == id)
        .and_then(|entry| entry.exec.as_ref())
}

/// A command line split into program and arguments, with desktop-entry field
/// codes (`%U` etc.) stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec {
    pub cmd: String,
    pub args: Vec<String>,
}

impl FromStr for Exec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = shell_words::split(s)?
            .into_iter()
            .filter(|word| !word.starts_with('%'));

        let cmd = words.next().context("empty exec line")?;

        Ok(Exec {
            cmd,
            args: words.collect(),
        })
    }
}

impl Exec {
    /// Fire and forget: spawn with stdio detached, never wait.
    pub fn spawn(&self) -> Result<()> {
        Command::new(&self.cmd)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.cmd))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}/test/data/applications/{name}",
            env!("CARGO_MANIFEST_DIR")
        ))
    }

    #[test]
    fn test_parse_desktop_file() {
        let app = AppEntry::from_desktop_file(fixture("org.example.Mango.desktop"))
            .unwrap()
            .unwrap();

        assert_eq!(app.name, "Mango");
        assert_eq!(app.id, "org.example.Mango");
        assert_eq!(app.icon.as_deref(), Some("mango"));
        assert_eq!(
            app.exec,
            Some(Exec {
                cmd: "mango".to_owned(),
                args: vec!["--fresh".to_owned()],
            })
        );
    }

    #[test]
    fn test_no_display_entry_is_skipped() {
        let app = AppEntry::from_desktop_file(fixture("org.example.Hidden.desktop")).unwrap();
        assert!(app.is_none());
    }

    #[test]
    fn test_exec_strips_field_codes() {
        let exec: Exec = "zebra --new-window %U".parse().unwrap();
        assert_eq!(exec.cmd, "zebra");
        assert_eq!(exec.args, vec!["--new-window".to_owned()]);
    }

    #[test]
    fn test_empty_exec_is_an_error() {
        assert!("%U".parse::<Exec>().is_err());
    }

    #[test]
    fn test_resolve_launch() {
        let catalog = vec![
            AppEntry {
                name: "Alpha".to_owned(),
                id: "org.example.Alpha".to_owned(),
                icon: None,
                exec: Some(Exec {
                    cmd: "alpha".to_owned(),
                    args: vec![],
                }),
            },
            AppEntry {
                name: "Seeded".to_owned(),
                id: "org.example.Seeded".to_owned(),
                icon: None,
                exec: None,
            },
        ];

        assert_eq!(
            resolve_launch(&catalog, "org.example.Alpha").map(|e| e.cmd.as_str()),
            Some("alpha")
        );

        // in the model but with nothing launchable behind it
        assert!(resolve_launch(&catalog, "org.example.Seeded").is_none());

        // not installed at all
        assert!(resolve_launch(&catalog, "org.example.Gone").is_none());
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = AppEntry {
            name: "Phone".to_owned(),
            id: "org.gnome.Calls".to_owned(),
            icon: None,
            exec: None,
        };
        let b = AppEntry {
            name: "Calls".to_owned(),
            id: "org.gnome.Calls".to_owned(),
            icon: Some("call-start".to_owned()),
            exec: None,
        };

        assert_eq!(a, b);
    }
}
