//! Scan orchestration
//!
//! Runs the selected stages strictly in sequence. Within a stage every
//! query is processed as:
//!
//! 1. Build the query from the dork template and term
//! 2. Acquire candidates from the search provider
//! 3. Fetch each candidate, one at a time, keeping HTML pages
//! 4. Keep the pages whose body contains the term
//! 5. Append survivors to the stage's finding set
//!
//! A completed stage is filtered, optionally saved and rendered before the
//! next stage starts. Cancellation is checked around every network call;
//! once observed the stage stops and returns what it has appended so far.

use crate::config::Config;
use crate::fetch::{build_http_client, fetch_page, FetchOutcome};
use crate::matcher::{analyze, retain_matching};
use crate::output::{FindingSet, ResultSink};
use crate::query::build_query;
use crate::scan::plan::{ScanMode, ScanPlan, ScanReport, StageOutcome};
use crate::search::{acquire_candidates, DuckDuckGoProvider, SearchProvider};
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Main scan orchestrator
pub struct Scanner {
    config: Config,
    client: Client,
    provider: Box<dyn SearchProvider>,
}

impl Scanner {
    /// Creates a scanner using the DuckDuckGo provider from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scanner)` - Ready to run
    /// * `Err(SearchMasterError)` - The HTTP client or provider could not be built
    pub fn new(config: Config) -> crate::Result<Self> {
        let client = build_client(&config)?;
        let provider = DuckDuckGoProvider::new(client.clone(), &config.http.search_endpoint)?;
        Ok(Self {
            config,
            client,
            provider: Box::new(provider),
        })
    }

    /// Creates a scanner that takes its candidates from `provider`
    pub fn with_provider(
        config: Config,
        provider: Box<dyn SearchProvider>,
    ) -> crate::Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            provider,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Queries issued by a stage, in order
    pub fn queries(&self, mode: ScanMode, term: &str) -> Vec<String> {
        match mode {
            ScanMode::Dork => self
                .config
                .dorks
                .iter()
                .map(|dork| build_query(Some(dork.as_str()), term))
                .collect(),
            ScanMode::Normal => vec![build_query(None, term)],
        }
    }

    /// Runs one stage and returns its unfiltered findings
    pub async fn run_stage(
        &self,
        mode: ScanMode,
        term: &str,
        cancel: &CancellationToken,
    ) -> StageOutcome {
        let mut findings = FindingSet::new();

        for query in self.queries(mode, term) {
            if cancel.is_cancelled() {
                return StageOutcome {
                    findings,
                    interrupted: true,
                };
            }

            match mode {
                ScanMode::Dork => tracing::info!("Searching with dork: {}", query),
                ScanMode::Normal => tracing::info!("Searching for: {}", query),
            }

            if self.process_query(&query, term, &mut findings, cancel).await {
                return StageOutcome {
                    findings,
                    interrupted: true,
                };
            }
        }

        StageOutcome {
            findings,
            interrupted: false,
        }
    }

    /// Runs every stage of `plan`, finalizing each through `sink`
    ///
    /// On cancellation the current stage's partial findings are recorded
    /// unfiltered and no further stage starts. Rendering the partial report
    /// is left to the caller (see [`ScanReport::render_partial`]).
    pub async fn run(
        &self,
        plan: &ScanPlan,
        sink: &dyn ResultSink,
        cancel: &CancellationToken,
    ) -> ScanReport {
        let mut report = ScanReport::default();

        for &mode in &plan.modes {
            tracing::info!("Performing {} scan...", mode.label());

            let outcome = self.run_stage(mode, &plan.term, cancel).await;
            if outcome.interrupted {
                tracing::warn!("Interrupted during {} scan", mode.label());
                report.set(mode, outcome.findings);
                report.interrupted = true;
                break;
            }

            let findings = plan.filters.apply(outcome.findings, &self.config.filters);

            if let Some(path) = &plan.output {
                if let Err(e) = sink.save(path, &findings) {
                    tracing::error!("Failed to save {} scan results: {}", mode.label(), e);
                }
            }

            sink.render(mode.results_title(), &findings);
            report.set(mode, findings);
        }

        report
    }

    /// Processes one query, appending matches to `findings`
    ///
    /// Returns true if cancellation was observed.
    async fn process_query(
        &self,
        query: &str,
        term: &str,
        findings: &mut FindingSet,
        cancel: &CancellationToken,
    ) -> bool {
        let limit = self.config.scan.results_per_query;

        let candidates = tokio::select! {
            biased;
            _ = cancel.cancelled() => return true,
            urls = acquire_candidates(self.provider.as_ref(), query, limit) => urls,
        };

        let mut pages = Vec::new();
        for url in &candidates {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return true,
                outcome = fetch_page(&self.client, url) => outcome,
            };

            if let FetchOutcome::Page(page) = outcome {
                pages.push(page);
            }
        }

        let matched = if self.config.scan.reuse_page_body {
            retain_matching(pages, term)
        } else {
            let fetched: Vec<_> = pages.into_iter().map(|page| page.finding).collect();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return true,
                matched = analyze(&self.client, fetched, term) => matched,
            }
        };

        tracing::debug!(
            "{} of {} candidates matched for: {}",
            matched.len(),
            candidates.len(),
            query
        );
        findings.extend(matched);

        false
    }
}

fn build_client(config: &Config) -> crate::Result<Client> {
    let timeout = Duration::from_secs(config.scan.timeout_secs);
    Ok(build_http_client(&config.http, timeout)?)
}
