//! Two-phase analysis driver.

use crate::options::{AnalyzerOptions, IgnoreMatcher};
use crate::{usage, walker};
use rgc_core::{
    classify, export_orphans, AnalysisReport, ClassificationResult, ComponentExtractor, Error,
    OrphanedCycleDetector, PatternExtractor, Result, Statistics,
};
use rgc_provider::ContentProvider;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, info};

/// Shared, read-only state handed to both phases.
pub(crate) struct Context {
    pub provider: Arc<dyn ContentProvider>,
    pub extractor: Arc<dyn ComponentExtractor>,
    pub semaphore: Arc<Semaphore>,
    pub ignore: IgnoreMatcher,
    pub options: AnalyzerOptions,
}

/// One deadline for the whole operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    started: Instant,
    at: Instant,
}

impl Deadline {
    fn after(timeout: std::time::Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            at: started + timeout,
        }
    }

    pub fn at(&self) -> Instant {
        self.at
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    pub fn timeout_error(&self) -> Error {
        Error::Timeout {
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

/// Discovers components behind a [`ContentProvider`] and classifies them.
///
/// # Example
///
/// ```no_run
/// use rgc_engine::{Analyzer, AnalyzerOptions};
/// use rgc_provider::LocalProvider;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Arc::new(LocalProvider::new("./web")?);
/// let analyzer = Analyzer::new(provider, AnalyzerOptions::default())?;
/// let report = analyzer.run("src").await?;
/// println!("{} used, {} unused", report.result.used_count, report.result.unused_count);
/// # Ok(())
/// # }
/// ```
pub struct Analyzer {
    ctx: Context,
}

impl Analyzer {
    /// Create an analyzer using the pattern-based extractor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] for unusable options and [`Error::Pattern`]
    /// if the detection patterns fail to compile.
    pub fn new(provider: Arc<dyn ContentProvider>, options: AnalyzerOptions) -> Result<Self> {
        let extractor = PatternExtractor::new()?.components_only(options.components_only);
        Self::with_extractor(provider, Arc::new(extractor), options)
    }

    /// Create an analyzer with a custom extractor.
    pub fn with_extractor(
        provider: Arc<dyn ContentProvider>,
        extractor: Arc<dyn ComponentExtractor>,
        options: AnalyzerOptions,
    ) -> Result<Self> {
        options.validate()?;
        let ignore = IgnoreMatcher::new(&options.ignore_patterns)?;
        Ok(Self {
            ctx: Context {
                provider,
                extractor,
                semaphore: Arc::new(Semaphore::new(options.max_concurrency)),
                ignore,
                options,
            },
        })
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.ctx.options
    }

    /// Classify the components under `root`.
    ///
    /// Strict contract: either the complete result or an error. A best-effort
    /// run that hit its deadline is reported as [`Error::Timeout`] here; use
    /// [`Analyzer::run`] to receive partial results.
    pub async fn analyze(&self, root: &str) -> Result<ClassificationResult> {
        let report = self.run(root).await?;
        if !report.complete {
            return Err(Error::Timeout {
                elapsed_ms: u128::from(report.statistics.duration_ms),
            });
        }
        Ok(report.result)
    }

    /// Run both phases and build the full report.
    ///
    /// # Errors
    ///
    /// - [`Error::Provider`] if the root listing fails
    /// - [`Error::Timeout`] if the deadline expires outside best-effort mode,
    ///   or a provider reports a timeout
    /// - [`Error::Serialization`] if exporting the forest breaks an invariant
    pub async fn run(&self, root: &str) -> Result<AnalysisReport> {
        let deadline = Deadline::after(self.ctx.options.timeout);
        let root = root.trim_matches('/');
        info!(
            provider = %self.ctx.provider.describe(),
            root,
            max_concurrency = self.ctx.options.max_concurrency,
            "Starting analysis"
        );

        let walk = walker::walk(&self.ctx, root, &deadline).await?;
        let mut warnings = walk.warnings;
        let mut complete = !walk.expired;

        let (registry, shadowed) = walk.builder.build();
        for dup in &shadowed {
            debug!(
                name = %dup.name,
                kept = %dup.kept,
                dropped = %dup.dropped,
                "Duplicate definition ignored"
            );
        }
        info!(components = registry.len(), "Registry frozen");
        let registry = Arc::new(registry);

        // An expired walk leaves no time to fetch; classify without edges.
        let forest = if complete {
            let linked = usage::link(&self.ctx, Arc::clone(&registry), &deadline).await?;
            warnings.extend(linked.warnings);
            complete = !linked.expired;
            linked.forest
        } else {
            usage::build_forest(&registry, &Default::default())
        };

        let result = classify(&forest)?;
        let orphans = OrphanedCycleDetector::new(&forest).detect();
        let orphaned = export_orphans(&forest, &orphans.entry_points)?;
        let orphaned_cycles = orphans.cycles;

        let statistics = Statistics {
            directories_listed: walk.directories_listed,
            files_scanned: walk.files_scanned,
            files_skipped: walk.files_skipped,
            components: registry.len(),
            edges: forest.edge_count(),
            duration_ms: u64::try_from(deadline.elapsed_ms()).unwrap_or(u64::MAX),
        };

        info!(
            used = result.used_count,
            unused = result.unused_count,
            orphaned_cycles = orphaned_cycles.len(),
            warnings = warnings.len(),
            complete,
            duration_ms = statistics.duration_ms,
            "Analysis finished"
        );

        Ok(AnalysisReport {
            result,
            orphaned_cycles,
            orphaned,
            warnings,
            statistics,
            complete,
        })
    }
}
