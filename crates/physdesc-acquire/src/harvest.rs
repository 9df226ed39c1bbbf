use crate::retrieve::{self, Lookup, Retriever};
use crate::sink::DescriptionSink;
use anyhow::Result;
use physdesc_model::HarvestConfig;
use std::io::Write;

/// What happened to a single manifest URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Written,
    NotFound,
    FetchFailed,
    WriteFailed,
}

/// Tally of one harvest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub attempted: usize,
    pub written: usize,
    pub not_found: usize,
    pub fetch_failed: usize,
    pub write_failed: usize,
}

impl HarvestSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        self.attempted += 1;
        match outcome {
            ItemOutcome::Written => self.written += 1,
            ItemOutcome::NotFound => self.not_found += 1,
            ItemOutcome::FetchFailed => self.fetch_failed += 1,
            ItemOutcome::WriteFailed => self.write_failed += 1,
        }
    }
}

/// Walks every configured section and item ID, one request at a time.
pub struct Harvester {
    config: HarvestConfig,
    retriever: Retriever,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let retriever = Retriever::new(config.request_timeout)?;
        Ok(Self { config, retriever })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Harvest all sections into `sink`.
    ///
    /// Sections run in configured order, IDs in increasing order. Per-item
    /// failures are logged and counted; nothing here aborts the run.
    pub async fn run<W: Write>(&self, sink: &mut DescriptionSink<W>) -> HarvestSummary {
        let mut summary = HarvestSummary::default();
        let interval = self.config.progress_interval;

        for section in &self.config.sections {
            tracing::info!(section = %section, "Processing section");
            let mut processed: u32 = 0;

            for id in self.config.id_range.clone() {
                if summary.attempted > 0 && !self.config.request_delay.is_zero() {
                    tokio::time::sleep(self.config.request_delay).await;
                }

                let url = self.config.manifest_url(section, id);
                let outcome = self.fetch_and_write(&url, sink).await;
                summary.record(outcome);
                processed += 1;

                if interval > 0 && processed % interval == 0 {
                    tracing::info!(section = %section, processed, last_id = id, "Progress");
                }
            }
        }

        tracing::info!(
            attempted = summary.attempted,
            written = summary.written,
            not_found = summary.not_found,
            fetch_failed = summary.fetch_failed,
            write_failed = summary.write_failed,
            "Harvest finished"
        );
        summary
    }

    /// Retrieve the Physical Description at `url` and append it to `sink`.
    ///
    /// Appends at most one line. A failed append is logged and reported as
    /// `WriteFailed`; the line is lost.
    pub async fn fetch_and_write<W: Write>(
        &self,
        url: &str,
        sink: &mut DescriptionSink<W>,
    ) -> ItemOutcome {
        match self.retriever.lookup(url).await {
            Lookup::Found(description) => match sink.append(&description) {
                Ok(()) => {
                    tracing::info!(url = %url, "Wrote Physical Description");
                    ItemOutcome::Written
                }
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Failed to write Physical Description");
                    ItemOutcome::WriteFailed
                }
            },
            Lookup::Missing => {
                tracing::info!(url = %url, "No Physical Description found");
                ItemOutcome::NotFound
            }
            Lookup::Failed(e) => {
                retrieve::log_failure(url, &e);
                ItemOutcome::FetchFailed
            }
        }
    }
}
