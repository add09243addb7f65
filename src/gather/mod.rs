//! Batch driver: sequentially gathers links for a list of identifiers.
//!
//! Each identifier is routed, resolved, extracted and its page closed. Any
//! failure along the way is recorded as an empty [`LinkSet`] for that
//! identifier and the batch moves on; nothing short of a bug aborts the run.

mod range;

pub use range::{OUTPUT_BASE_NAME, RangeSelection, partition_name, select_range};

use indicatif::ProgressBar;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::extractor::{LinkSet, extractor_for};
use crate::parser::Identifier;
use crate::resolver::{IdentifierResolver, ResolveError, Route};

/// Identifier to link-set mapping in processing order.
#[derive(Debug, Clone, Default)]
pub struct ResultMapping {
    entries: Vec<(Identifier, LinkSet)>,
}

impl ResultMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the links for `id`.
    ///
    /// A new identifier is appended; an identifier already present keeps its
    /// position and has its links replaced.
    pub fn push(&mut self, id: Identifier, links: LinkSet) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == id) {
            entry.1 = links;
        } else {
            self.entries.push((id, links));
        }
    }

    /// Returns the links recorded for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LinkSet> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == id)
            .map(|(_, links)| links)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &LinkSet)> {
        self.entries.iter().map(|(id, links)| (id, links))
    }
}

impl Serialize for ResultMapping {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Result of processing one identifier.
#[derive(Debug, Clone)]
pub enum GatherOutcome {
    /// The page was rendered and extracted (the set may be empty)
    Found(LinkSet),
    /// Resolution or extraction failed
    Failed(ResolveError),
}

impl GatherOutcome {
    /// Collapses the outcome to the persisted link set; failures become empty.
    #[must_use]
    pub fn into_links(self) -> LinkSet {
        match self {
            Self::Found(links) => links,
            Self::Failed(_) => LinkSet::new(),
        }
    }
}

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatherSummary {
    /// Identifiers with at least one link
    pub with_links: usize,
    /// Identifiers whose page rendered but had no document links
    pub without_links: usize,
    /// Identifiers that failed to resolve or extract
    pub failed: usize,
}

impl GatherSummary {
    fn record(&mut self, outcome: &GatherOutcome) {
        match outcome {
            GatherOutcome::Found(links) if links.is_empty() => self.without_links += 1,
            GatherOutcome::Found(_) => self.with_links += 1,
            GatherOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Returns the number of identifiers processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.with_links + self.without_links + self.failed
    }
}

/// Mapping plus summary for one run.
#[derive(Debug, Clone, Default)]
pub struct GatherReport {
    /// Links per identifier
    pub mapping: ResultMapping,
    /// Counts by outcome
    pub summary: GatherSummary,
}

/// Drives resolution and extraction over an identifier list.
#[derive(Debug)]
pub struct LinkGatherer {
    resolver: IdentifierResolver,
    progress: ProgressBar,
}

impl LinkGatherer {
    /// Creates a gatherer with no visible progress output.
    #[must_use]
    pub fn new(resolver: IdentifierResolver) -> Self {
        Self {
            resolver,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports per-identifier progress on `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the resolver used by this gatherer.
    #[must_use]
    pub fn resolver(&self) -> &IdentifierResolver {
        &self.resolver
    }

    /// Processes one identifier.
    ///
    /// The page opened for `id` is closed whether or not extraction succeeds.
    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub async fn gather_one(&self, id: &Identifier) -> GatherOutcome {
        let route = Route::for_identifier(id);
        let page = match self.resolver.open(id, route).await {
            Ok(page) => page,
            Err(error) => return GatherOutcome::Failed(error),
        };

        let extractor = extractor_for(route);
        debug!(route = %route, extractor = extractor.name(), "Extracting links");
        let extracted = extractor.extract(page.as_ref()).await;

        if let Err(error) = page.close().await {
            warn!(error = %error, "Failed to close page");
        }

        match extracted {
            Ok(links) => GatherOutcome::Found(links),
            Err(error) => GatherOutcome::Failed(error),
        }
    }

    /// Processes identifiers strictly in order and returns the accumulated report.
    ///
    /// Every identifier gets exactly one mapping entry.
    pub async fn gather(&self, ids: &[Identifier]) -> GatherReport {
        self.progress.set_length(ids.len() as u64);
        let mut report = GatherReport::default();

        for id in ids {
            self.progress.set_message(id.to_string());
            let outcome = self.gather_one(id).await;
            report.summary.record(&outcome);

            match &outcome {
                GatherOutcome::Found(links) => {
                    info!(id = %id, links = ?links.as_slice(), "Gathered links");
                }
                GatherOutcome::Failed(error) => {
                    warn!(id = %id, error = %error, "Identifier failed; recording no links");
                }
            }

            report.mapping.push(id.clone(), outcome.into_links());
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        info!(
            total = report.summary.total(),
            with_links = report.summary.with_links,
            without_links = report.summary.without_links,
            failed = report.summary.failed,
            "Gathering complete"
        );
        report
    }
}
