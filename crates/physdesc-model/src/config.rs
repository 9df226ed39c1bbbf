use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

/// Digital-library host serving the manifests.
pub const DEFAULT_BASE_URL: &str = "https://hdl.huntington.org";

/// Collections harvested by default. `p15150coll4` and `p15150coll7` are
/// served by the same host but are not part of the harvest.
pub const DEFAULT_SECTIONS: &[&str] = &["p15150coll8"];

pub const DEFAULT_ID_RANGE: Range<u32> = 200..1000;

/// Settings for one harvest run.
///
/// `Default` gives the committed collection and ID range; callers only
/// override the fields they need (tests point `base_url` at a local server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    pub base_url: String,
    /// Sections in the order they are processed.
    pub sections: Vec<String>,
    /// Item IDs, end exclusive.
    pub id_range: Range<u32>,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Log progress every this many IDs within a section. Zero disables it.
    pub progress_interval: u32,
    /// Per-request timeout. Expiry counts as a transport failure.
    pub request_timeout: Duration,
    /// Pause between requests. Zero means back-to-back.
    pub request_delay: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            id_range: DEFAULT_ID_RANGE,
            output_dir: PathBuf::from("physical_descriptions"),
            output_file: "data.txt".to_string(),
            progress_interval: 100,
            request_timeout: Duration::from_secs(60),
            request_delay: Duration::ZERO,
        }
    }
}

impl HarvestConfig {
    /// `{base}/iiif/info/{section}/{id}/manifest.json`
    pub fn manifest_url(&self, section: &str, id: u32) -> String {
        manifest_url(&self.base_url, section, id)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Total number of manifests a run will request.
    pub fn item_count(&self) -> usize {
        self.sections.len() * self.id_range.len()
    }
}

/// Build the manifest URL for one item. A trailing slash on `base` is ignored.
pub fn manifest_url(base: &str, section: &str, id: u32) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/iiif/info/{section}/{id}/manifest.json")
}
