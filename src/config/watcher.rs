//! Route table watcher for hot reload.
//!
//! # Design Decisions
//! - Watches the parent directory, not the file: editors and deploy tools
//!   save by renaming a temp file over the original, which replaces the inode
//! - Events for sibling files (temp files, backups) are ignored
//! - An invalid edit is logged and the running routes stay in place

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServerConfig;

/// Watches a route table file and sends every valid new version.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServerConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiver its reloads arrive on.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching on notify's background thread.
    ///
    /// The returned watcher must be kept alive; dropping it stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let directory = watched_directory(&self.path);
        let file_name = self.path.file_name().map(|name| name.to_os_string()).ok_or_else(|| {
            notify::Error::generic("route table path has no file name")
                .add_path(self.path.clone())
        })?;

        let path = self.path.clone();
        let tx = self.update_tx;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_file(&event, &file_name) => reload(&path, &tx),
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Route table watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, directory = ?directory, "Route table watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; a bare file name lives in the working directory.
fn watched_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True for a write, create or rename-into-place of the watched file.
fn touches_file(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}

fn reload(path: &Path, tx: &mpsc::UnboundedSender<ServerConfig>) {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(routes = config.routes.len(), "Route table reloaded");
            if tx.send(config).is_err() {
                tracing::warn!(path = ?path, "Route table reloaded but no server is listening for updates");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload route table, keeping current routes");
        }
    }
}
