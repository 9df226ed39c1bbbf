//! Fetch IIIF manifests and append their Physical Description to a text file.

pub mod harvest;
pub mod retrieve;
pub mod sink;

pub use harvest::{HarvestSummary, Harvester, ItemOutcome};
pub use retrieve::{Lookup, RetrieveError, Retriever};
pub use sink::{open_output, DescriptionSink};
