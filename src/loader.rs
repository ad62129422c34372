use std::{collections::HashSet, env, path::PathBuf, time::Instant};

use walkdir::WalkDir;

use crate::model::AppEntry;

/// Queries the desktop-entry database for everything launchable.
///
/// Entries from the user data dir override system entries with the same id.
/// A file that cannot be parsed is logged and omitted; the query itself never
/// fails. The result is sorted ascending by display name.
pub fn load_apps() -> Vec<AppEntry> {
    let timer = Instant::now();
    let AppDirs { system, user } = app_dirs();

    let mut set: HashSet<AppEntry> = HashSet::new();

    for dir in system {
        let apps = process_dir(dir);

        set.extend(apps);
    }

    if let Some(user) = user {
        let user_apps = process_dir(user);

        for app in user_apps {
            if let Some(system) = set.replace(app) {
                log::info!("user entry overrides {}", system.name);
            }
        }
    }

    let mut apps: Vec<_> = set.into_iter().collect();
    sort_catalog(&mut apps);

    log::info!(
        "loaded {} apps in {}ms",
        apps.len(),
        timer.elapsed().as_millis()
    );

    apps
}

fn sort_catalog(apps: &mut [AppEntry]) {
    apps.sort_unstable_by(|l, r| l.name.cmp(&r.name));
}

fn process_dir(dir: PathBuf) -> Vec<AppEntry> {
    let dir = dir.join("applications");

    log::debug!("processing dir: {}", dir.display());

    let walkdir = WalkDir::new(dir);

    let mut apps = vec![];
    for file in walkdir.into_iter() {
        let file = match file {
            Ok(file) if file.path().extension().and_then(|x| x.to_str()) == Some("desktop") => file,
            _ => continue,
        };

        let file = file.path();

        log::debug!("processing file: {}", file.display());

        let app = match AppEntry::from_desktop_file(file) {
            Ok(Some(app)) => app,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("failed to parse {}: {err}", file.display());
                continue;
            }
        };

        apps.push(app);
    }

    apps
}

struct AppDirs {
    system: Vec<PathBuf>,
    user: Option<PathBuf>,
}

fn app_dirs() -> AppDirs {
    let system = if let Ok(xdg_data_dirs) = env::var("XDG_DATA_DIRS") {
        xdg_data_dirs.split(':').map(PathBuf::from).collect()
    } else {
        vec![
            PathBuf::from("/usr/local/share"),
            PathBuf::from("/usr/share"),
        ]
    };

    let user = if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg_data_home))
    } else if let Ok(home) = env::var("HOME") {
        let mut dir = PathBuf::from(home);
        dir.push(".local/share");
        Some(dir)
    } else {
        None
    };

    AppDirs { system, user }
}
