//! Phase 1: concurrent tree walk and definition discovery.
//!
//! A single coordinator owns the [`RegistryBuilder`]. Workers only list and
//! fetch; every listing result is turned into new tasks on the same set,
//! so the walk is complete exactly when the set drains.

use crate::analyzer::{Context, Deadline};
use crate::tasks::PathTasks;
use rgc_core::{
    AnalysisWarning, ComponentCandidate, Error, RegistryBuilder, Result, TraversalKey,
    WarningKind,
};
use rgc_provider::{DirEntry, ProviderError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything phase 1 produced.
#[derive(Debug, Default)]
pub(crate) struct WalkOutcome {
    pub builder: RegistryBuilder,
    pub warnings: Vec<AnalysisWarning>,
    pub directories_listed: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// The deadline fired in best-effort mode.
    pub expired: bool,
}

impl WalkOutcome {
    fn warn(&mut self, kind: WarningKind, path: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(kind = %kind, path, %message, "Skipping entry");
        self.warnings.push(AnalysisWarning::new(kind, path, message));
    }
}

enum Step {
    Listed {
        path: String,
        key: TraversalKey,
        result: std::result::Result<Vec<DirEntry>, ProviderError>,
    },
    Scanned {
        path: String,
        key: TraversalKey,
        result: std::result::Result<Vec<ComponentCandidate>, ProviderError>,
    },
}

/// Walk the tree under `root` and collect definition candidates.
///
/// # Errors
///
/// - [`Error::Provider`] if the root itself cannot be listed
/// - [`Error::Timeout`] if the deadline expires (strict mode) or a provider
///   reports a timeout
pub(crate) async fn walk(ctx: &Context, root: &str, deadline: &Deadline) -> Result<WalkOutcome> {
    let mut outcome = WalkOutcome::default();
    let mut tasks: PathTasks<Step> = PathTasks::new();
    spawn_listing(ctx, &mut tasks, root.to_string(), TraversalKey::root());

    loop {
        let joined = match tokio::time::timeout_at(deadline.at(), tasks.join_next()).await {
            Ok(Some(joined)) => joined,
            Ok(None) => break,
            Err(_) => {
                tasks.abort_all();
                if !ctx.options.best_effort {
                    return Err(deadline.timeout_error());
                }
                outcome.warn(
                    WarningKind::DeadlineExpired,
                    root,
                    format!("walk stopped with {} tasks outstanding", tasks.len()),
                );
                outcome.expired = true;
                break;
            }
        };

        match joined {
            Ok(Step::Listed { path, key, result }) => {
                handle_listing(ctx, &mut tasks, &mut outcome, deadline, path, key, result)?;
            }
            Ok(Step::Scanned { path, key, result }) => match result {
                Ok(candidates) => {
                    debug!(path = %path, candidates = candidates.len(), "Scanned file");
                    outcome.files_scanned += 1;
                    outcome.builder.submit(key, path, candidates);
                }
                Err(e) if e.is_timeout() => return Err(deadline.timeout_error()),
                Err(e) => {
                    outcome.files_skipped += 1;
                    outcome.warn(WarningKind::FileUnreadable, &path, e.to_string());
                }
            },
            Err((path, e)) => outcome.warn(WarningKind::WorkerFailed, &path, e.to_string()),
        }
    }

    info!(
        directories = outcome.directories_listed,
        files_scanned = outcome.files_scanned,
        files_skipped = outcome.files_skipped,
        defining_files = outcome.builder.file_count(),
        "Walk finished"
    );
    Ok(outcome)
}

fn handle_listing(
    ctx: &Context,
    tasks: &mut PathTasks<Step>,
    outcome: &mut WalkOutcome,
    deadline: &Deadline,
    path: String,
    key: TraversalKey,
    result: std::result::Result<Vec<DirEntry>, ProviderError>,
) -> Result<()> {
    let entries = match result {
        Ok(entries) => entries,
        Err(e) if e.is_timeout() => return Err(deadline.timeout_error()),
        Err(e) if key.depth() == 0 => {
            return Err(Error::Provider {
                path,
                message: e.to_string(),
            })
        }
        Err(e) => {
            outcome.warn(WarningKind::ListingFailed, &path, e.to_string());
            return Ok(());
        }
    };

    outcome.directories_listed += 1;
    debug!(path = %path, entries = entries.len(), "Listed directory");

    for (index, entry) in entries.into_iter().enumerate() {
        let child_key = key.child(index as u32);

        if ctx.ignore.is_ignored(&entry.path, entry.is_dir) {
            debug!(path = %entry.path, "Ignored by pattern");
            continue;
        }

        if entry.is_dir {
            if child_key.depth() > ctx.options.max_depth {
                outcome.warn(
                    WarningKind::DepthExceeded,
                    &entry.path,
                    format!("deeper than max_depth {}", ctx.options.max_depth),
                );
                continue;
            }
            spawn_listing(ctx, tasks, entry.path, child_key);
        } else if ctx.options.is_source_file(entry.extension()) {
            if entry.size_bytes > ctx.options.max_file_size {
                outcome.files_skipped += 1;
                outcome.warn(
                    WarningKind::FileTooLarge,
                    &entry.path,
                    format!(
                        "{} bytes exceeds limit of {} bytes",
                        entry.size_bytes, ctx.options.max_file_size
                    ),
                );
                continue;
            }
            spawn_scan(ctx, tasks, entry.path, child_key);
        }
    }
    Ok(())
}

fn spawn_listing(
    ctx: &Context,
    tasks: &mut PathTasks<Step>,
    path: String,
    key: TraversalKey,
) {
    let provider = Arc::clone(&ctx.provider);
    let semaphore = Arc::clone(&ctx.semaphore);
    tasks.spawn(path.clone(), async move {
        let _permit = semaphore.acquire().await.ok();
        let result = provider.list_directory(&path).await;
        Step::Listed { path, key, result }
    });
}

fn spawn_scan(ctx: &Context, tasks: &mut PathTasks<Step>, path: String, key: TraversalKey) {
    let provider = Arc::clone(&ctx.provider);
    let extractor = Arc::clone(&ctx.extractor);
    let semaphore = Arc::clone(&ctx.semaphore);
    tasks.spawn(path.clone(), async move {
        let text = {
            let _permit = semaphore.acquire().await.ok();
            provider.get_file_content(&path).await
        };
        let result = text.map(|text| extractor.definitions(&path, &text));
        Step::Scanned { path, key, result }
    });
}
