//! Phase 2: reference scanning and forest construction.

use crate::analyzer::{Context, Deadline};
use crate::tasks::PathTasks;
use rgc_core::{AnalysisWarning, Forest, ForestBuilder, Registry, Result, WarningKind};
use rgc_provider::ProviderError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything phase 2 produced.
#[derive(Debug)]
pub(crate) struct UsageOutcome {
    pub forest: Forest,
    pub warnings: Vec<AnalysisWarning>,
    pub expired: bool,
}

type Scan = (String, std::result::Result<Vec<String>, ProviderError>);

/// Fetch every defining file once, collect its registered references and
/// link the forest.
///
/// Workers never touch the forest; edges are inserted here after the join,
/// in registry order.
pub(crate) async fn link(
    ctx: &Context,
    registry: Arc<Registry>,
    deadline: &Deadline,
) -> Result<UsageOutcome> {
    let mut warnings = Vec::new();
    let mut expired = false;
    let mut references: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let paths: Vec<String> = registry.by_path().keys().map(|p| p.to_string()).collect();
    info!(files = paths.len(), "Scanning references");

    let mut tasks: PathTasks<Scan> = PathTasks::new();
    for path in paths {
        spawn_scan(ctx, &mut tasks, &registry, path);
    }

    loop {
        let joined = match tokio::time::timeout_at(deadline.at(), tasks.join_next()).await {
            Ok(Some(joined)) => joined,
            Ok(None) => break,
            Err(_) => {
                tasks.abort_all();
                if !ctx.options.best_effort {
                    return Err(deadline.timeout_error());
                }
                let message = format!("reference scan stopped with {} files pending", tasks.len());
                warn!(%message, "Deadline expired");
                warnings.push(AnalysisWarning::new(
                    WarningKind::DeadlineExpired,
                    "",
                    message,
                ));
                expired = true;
                break;
            }
        };

        match joined {
            Ok((path, Ok(found))) => {
                debug!(path = %path, references = found.len(), "Scanned references");
                references.insert(path, found);
            }
            Ok((_, Err(e))) if e.is_timeout() => return Err(deadline.timeout_error()),
            Ok((path, Err(e))) => {
                // Components of an unreadable file keep no children.
                warn!(path = %path, error = %e, "Skipping references");
                warnings.push(AnalysisWarning::new(
                    WarningKind::FileUnreadable,
                    path,
                    e.to_string(),
                ));
            }
            Err((path, e)) => {
                warn!(path = %path, error = %e, "Reference worker failed");
                warnings.push(AnalysisWarning::new(
                    WarningKind::WorkerFailed,
                    path,
                    e.to_string(),
                ));
            }
        }
    }

    let forest = build_forest(&registry, &references);
    info!(
        components = forest.len(),
        edges = forest.edge_count(),
        roots = forest.roots().len(),
        "Forest built"
    );

    Ok(UsageOutcome {
        forest,
        warnings,
        expired,
    })
}

/// Link every definer to the references found in its file.
pub(crate) fn build_forest(
    registry: &Registry,
    references: &BTreeMap<String, Vec<String>>,
) -> Forest {
    let mut builder = ForestBuilder::new(registry);
    for def in registry.iter() {
        if let Some(found) = references.get(&def.path) {
            builder.link_all(&def.name, found);
        }
    }
    builder.finish()
}

fn spawn_scan(
    ctx: &Context,
    tasks: &mut PathTasks<Scan>,
    registry: &Arc<Registry>,
    path: String,
) {
    let provider = Arc::clone(&ctx.provider);
    let extractor = Arc::clone(&ctx.extractor);
    let semaphore = Arc::clone(&ctx.semaphore);
    let registry = Arc::clone(registry);
    tasks.spawn(path.clone(), async move {
        let text = {
            let _permit = semaphore.acquire().await.ok();
            provider.get_file_content(&path).await
        };
        let result = text.map(|text| {
            extractor
                .references(&text)
                .into_iter()
                .filter(|name| registry.contains(name))
                .collect()
        });
        (path, result)
    });
}
