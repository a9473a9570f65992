//! Rebuild the site whenever the content tree changes

use anyhow::{Context, Result};
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::build;
use crate::Site;

/// What to do when a rebuild fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and wait for the next change
    #[default]
    KeepGoing,
    /// Stop watching and return the error
    FailFast,
}

/// Build once, then rebuild on every change until interrupted
pub async fn watch(site: &Site, policy: FailurePolicy) -> Result<()> {
    build::run(site)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;

    watcher
        .watch(&site.config.content_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {:?}", site.config.content_dir))?;

    tracing::info!(
        "Watching {:?} for changes. Press Ctrl+C to stop.",
        site.config.content_dir
    );

    let rebuilds = run_loop(site, rx, policy).await?;
    tracing::info!("Stopped watching after {} rebuilds", rebuilds);

    Ok(())
}

/// Consume change events one at a time, rebuilding after each
///
/// Returns the number of rebuilds attempted once the channel closes or
/// Ctrl+C is received.
pub async fn run_loop(
    site: &Site,
    mut rx: UnboundedReceiver<notify::Result<Event>>,
    policy: FailurePolicy,
) -> Result<usize> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut rebuilds = 0;

    loop {
        let event = tokio::select! {
            event = rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
        };

        match event {
            Ok(event) => tracing::info!("Change detected ({:?}), rebuilding...", event.paths),
            Err(e) => {
                tracing::warn!("Watch error: {}", e);
                continue;
            }
        }

        rebuilds += 1;
        if let Err(e) = build::run(site) {
            match policy {
                FailurePolicy::FailFast => return Err(e),
                FailurePolicy::KeepGoing => tracing::error!("Build failed: {:#}", e),
            }
        }
    }

    Ok(rebuilds)
}
