use std::{
    env,
    fs::{self, File},
    os::unix::fs::OpenOptionsExt,
    path::PathBuf,
};

use nix::{
    fcntl::{Flock, FlockArg},
    libc::O_CLOEXEC,
};

/// Per-display single-instance lock. A home screen must not run twice on the
/// same display; the second instance fails to take the lock and exits.
pub struct InstanceLock {
    flock: Option<Flock<File>>,
    path: Option<PathBuf>,
}

impl InstanceLock {
    /// `None` means another instance already holds the lock. Failure to set
    /// the lock up at all is not fatal; we run unlocked rather than refuse
    /// to start.
    pub fn obtain() -> Option<Self> {
        let dir = env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_owned());
        let display = env::var("WAYLAND_DISPLAY")
            .or_else(|_| env::var("DISPLAY").map(|c| c.replace(':', "x")))
            .unwrap_or_default();

        let path = PathBuf::from(dir).join(format!("slate-{display}.lock"));

        log::debug!("flock file: {}", path.display());

        let file = match fs::OpenOptions::new()
            .create(true)
            .write(true)
            .custom_flags(O_CLOEXEC)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) => {
                log::warn!("failed to open lock file {}: {err}", path.display());
                return Some(Self {
                    flock: None,
                    path: None,
                });
            }
        };

        let flock = Flock::lock(file, FlockArg::LockExclusiveNonblock).ok()?;

        Some(Self {
            flock: Some(flock),
            path: Some(path),
        })
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let Some(flock) = self.flock.take() else {
            return;
        };

        let Ok(file) = flock.unlock() else {
            return;
        };

        drop(file);

        if let Some(path) = &self.path {
            let _ = fs::remove_file(path);
        }
    }
}
