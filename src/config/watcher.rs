//! Policy file watcher for recompilation on change.
//!
//! The parent directory is watched rather than the file itself: editors that
//! save by writing a temporary file and renaming it over the policy replace
//! the inode, which would silently end a watch held on the file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_policy;
use crate::config::schema::PolicyConfig;

/// Publishes every valid revision of a policy file.
pub struct PolicyWatcher {
    path: PathBuf,
    dir: PathBuf,
    file_name: OsString,
    update_tx: mpsc::UnboundedSender<PolicyConfig>,
}

impl PolicyWatcher {
    /// Returns the watcher and a receiver for validated policy updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<PolicyConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path.file_name().map(OsString::from).unwrap_or_default();

        (
            Self {
                path: path.to_path_buf(),
                dir,
                file_name,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            dir,
            file_name,
            update_tx,
        } = self;
        let policy_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_policy(&event, &file_name) => {
                    reload(&policy_path, &update_tx);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Policy watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), dir = %dir.display(), "Policy watcher started");
        Ok(watcher)
    }
}

/// Creations, writes and renames that land on the policy file name.
fn touches_policy(event: &Event, file_name: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

fn reload(path: &Path, tx: &mpsc::UnboundedSender<PolicyConfig>) {
    match load_policy(path) {
        Ok(policy) => {
            tracing::info!(path = %path.display(), sites = policy.sites.len(), "Policy reloaded");
            let _ = tx.send(policy);
        }
        // Partial writes land here too; the next event carries the full file.
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Policy reload rejected"),
    }
}
