//! Chart store: a single JSON file holding saved charts, newest first.
//!
//! Every operation reads the file afresh and mutations rewrite it through a
//! temporary sibling and a rename. There is no locking; one writer at a time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bodygraph_base::Chart;
use bodygraph_time::BirthData;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;

/// Name used when the birth record carries none.
pub const DEFAULT_CHART_NAME: &str = "Unnamed Chart";

const ID_PREFIX: &str = "hd";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Charts kept; saving beyond this drops the oldest (default 50).
    pub max_charts: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_charts: 50 }
    }
}

impl StoreConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_charts == 0 {
            return Err("max_charts must be > 0");
        }
        Ok(())
    }
}

/// A chart as persisted in the store.
///
/// Loading re-derives the chart's channels, centers, and labels from its
/// activations; stored copies of those fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedChart {
    pub id: String,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    #[serde(rename = "birthData")]
    pub birth: BirthData,
    pub chart: Chart,
}

/// File-backed chart store.
#[derive(Debug, Clone)]
pub struct ChartStore {
    path: PathBuf,
    config: StoreConfig,
}

impl ChartStore {
    /// Open a store at `path` with the default configuration.
    ///
    /// A missing file is an empty store; an existing file must parse.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::with_config(path, StoreConfig::default())
    }

    pub fn with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate().map_err(StoreError::InvalidConfig)?;
        let store = Self {
            path: path.into(),
            config,
        };
        let count = store.load()?.len();
        debug!(path = %store.path.display(), count, "chart store opened");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// All saved charts, newest first.
    pub fn list(&self) -> Result<Vec<SavedChart>, StoreError> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedChart>, StoreError> {
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    /// Save a chart and return its new id.
    pub fn save(&self, birth: &BirthData, chart: &Chart) -> Result<String, StoreError> {
        let mut charts = self.load()?;
        let saved_at = Utc::now();
        let id = generate_id(saved_at);
        let name = chart_name(birth);

        charts.insert(
            0,
            SavedChart {
                id: id.clone(),
                name,
                saved_at,
                birth: birth.clone(),
                chart: chart.clone(),
            },
        );
        let dropped = charts.len().saturating_sub(self.config.max_charts);
        charts.truncate(self.config.max_charts);

        self.write(&charts)?;
        info!(id = %id, count = charts.len(), dropped, "chart saved");
        Ok(id)
    }

    /// Remove a chart. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut charts = self.load()?;
        let before = charts.len();
        charts.retain(|c| c.id != id);
        if charts.len() == before {
            return Ok(false);
        }
        self.write(&charts)?;
        info!(id, count = charts.len(), "chart deleted");
        Ok(true)
    }

    fn load(&self) -> Result<Vec<SavedChart>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, charts: &[SavedChart]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(charts)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Display name for a birth record.
pub fn chart_name(birth: &BirthData) -> String {
    birth
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_CHART_NAME)
        .to_string()
}

/// `hd_{unix millis}_{9 random base36 chars}`.
fn generate_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{ID_PREFIX}_{}_{suffix}", at.timestamp_millis())
}
