//! Advisory PID lock next to the store file.
//!
//! Serializes mutating commands across `leakwatch` processes sharing a store.
//! The lock is `<store>.lock` holding the owner's PID. A lock whose owner is
//! gone is reclaimed only while holding `<store>.lock.reclaim`, and only if
//! the file still names the dead PID observed earlier, so two processes
//! racing on the same stale lock cannot both end up holding it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(300);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Owns a PID file; removes it on drop if it still carries our PID.
#[derive(Debug)]
pub struct WriteLockGuard {
    path: PathBuf,
    pid: u32,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        if read_pid(&self.path) == Some(self.pid) {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Lock file path for a store: `<store path>.lock`.
pub fn lock_path_for(store_path: &str) -> PathBuf {
    PathBuf::from(format!("{store_path}.lock"))
}

fn reclaim_path_for(lock_path: &Path) -> PathBuf {
    let mut name = lock_path.as_os_str().to_owned();
    name.push(".reclaim");
    PathBuf::from(name)
}

/// Take the store's write lock, waiting for a live holder to finish.
pub async fn acquire_for_store(store_path: &str) -> anyhow::Result<WriteLockGuard> {
    let lock_path = lock_path_for(store_path);
    let started = Instant::now();

    loop {
        let state = match try_acquire(&lock_path) {
            Ok(guard) => {
                tracing::debug!(path = %lock_path.display(), "write lock acquired");
                return Ok(guard);
            }
            Err(LockState::Stale(pid)) if reclaim_stale(&lock_path, pid) => {
                tracing::warn!(pid, path = %lock_path.display(), "removed stale write lock");
                continue;
            }
            Err(state) => state,
        };

        if started.elapsed() >= LOCK_WAIT_TIMEOUT {
            match state {
                LockState::HeldBy(pid) => anyhow::bail!(
                    "another leakwatch run is writing to this store (pid {pid}); try again after it finishes"
                ),
                LockState::Stale(_) | LockState::Unknown => anyhow::bail!(
                    "could not acquire write lock at {}; remove it and {} if no leakwatch process is running",
                    lock_path.display(),
                    reclaim_path_for(&lock_path).display()
                ),
            }
        }
        tokio::time::sleep(LOCK_RETRY_DELAY).await;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LockState {
    HeldBy(u32),
    Stale(u32),
    Unknown,
}

/// Create `path` exclusively and write our PID into it.
fn try_acquire(path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new().create_new(true).write(true).open(path) {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(WriteLockGuard {
                path: path.to_path_buf(),
                pid,
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => match read_pid(path) {
            Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
            Some(pid) => Err(LockState::Stale(pid)),
            None => Err(LockState::Unknown),
        },
        Err(_) => Err(LockState::Unknown),
    }
}

/// Remove a lock left behind by `stale_pid`.
///
/// Returns `false` without touching anything if another process is already
/// reclaiming, or if the lock no longer names `stale_pid`. While the reclaim
/// file is held the stale lock cannot be replaced by anyone else, because
/// fresh locks are only ever created with `create_new`.
fn reclaim_stale(lock_path: &Path, stale_pid: u32) -> bool {
    let Ok(_reclaim) = try_acquire(&reclaim_path_for(lock_path)) else {
        return false;
    };
    if read_pid(lock_path) != Some(stale_pid) {
        return false;
    }
    std::fs::remove_file(lock_path).is_ok()
}

fn read_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
