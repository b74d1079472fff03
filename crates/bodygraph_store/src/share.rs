//! Share links: a compact chart summary as a URL-safe string.
//!
//! Encoding is JSON, then zstd, then unpadded URL-safe base64. The payload
//! carries the birth record, gate and line per body, and the labels. It does
//! not carry channels or centers; `SharedChart::bodygraph` recomputes them.

use std::collections::BTreeSet;
use std::io::Read;

use base64::prelude::*;
use bodygraph_base::{
    Authority, Body, Center, Channel, Chart, ChartError, ChartType, Definition, GATE_COUNT,
    GateActivation, IncarnationCross, Profile, Strategy, active_channels, defined_centers,
    determine_authority, determine_type,
};
use bodygraph_time::BirthData;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::StoreError;

/// Query parameter carrying the share string.
pub const CHART_PARAM: &str = "chart";

/// Upper bound on a decompressed payload.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

const ZSTD_LEVEL: i32 = 19;

/// One body's gate and line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedGate {
    #[serde(rename = "p")]
    pub body: Body,
    #[serde(rename = "g")]
    pub gate: u8,
    #[serde(rename = "l")]
    pub line: u8,
}

impl From<&GateActivation> for SharedGate {
    fn from(a: &GateActivation) -> Self {
        Self {
            body: a.body,
            gate: a.gate,
            line: a.line,
        }
    }
}

/// Chart summary recovered from a share string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedChart {
    #[serde(rename = "bd")]
    pub birth: BirthData,
    #[serde(rename = "pg")]
    pub personality_gates: Vec<SharedGate>,
    #[serde(rename = "dg")]
    pub design_gates: Vec<SharedGate>,
    #[serde(rename = "t")]
    pub chart_type: ChartType,
    #[serde(rename = "a")]
    pub authority: Authority,
    #[serde(rename = "s")]
    pub strategy: Strategy,
    #[serde(rename = "pr")]
    pub profile: Profile,
    #[serde(rename = "d")]
    pub definition: Definition,
    #[serde(rename = "c")]
    pub cross: IncarnationCross,
}

/// Structure recomputed from shared gates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bodygraph {
    pub active_channels: Vec<Channel>,
    pub defined_centers: BTreeSet<Center>,
    pub chart_type: ChartType,
    pub authority: Authority,
    pub definition: Definition,
}

impl SharedChart {
    pub fn new(birth: &BirthData, chart: &Chart) -> Self {
        Self {
            birth: birth.clone(),
            personality_gates: chart.personality_gates.iter().map(SharedGate::from).collect(),
            design_gates: chart.design_gates.iter().map(SharedGate::from).collect(),
            chart_type: chart.chart_type,
            authority: chart.authority,
            strategy: chart.strategy,
            profile: chart.profile,
            definition: chart.definition,
            cross: chart.cross,
        }
    }

    /// Distinct gate numbers across both passes.
    pub fn gates(&self) -> BTreeSet<u8> {
        self.personality_gates
            .iter()
            .chain(&self.design_gates)
            .map(|g| g.gate)
            .collect()
    }

    /// Recompute channels, centers, and the labels that depend on them.
    pub fn bodygraph(&self) -> Bodygraph {
        let active_channels = active_channels(&self.gates());
        let defined_centers = defined_centers(&active_channels);
        Bodygraph {
            chart_type: determine_type(&defined_centers, &active_channels),
            authority: determine_authority(&defined_centers),
            definition: Definition::from_center_count(defined_centers.len()),
            active_channels,
            defined_centers,
        }
    }

    fn validate(&self) -> Result<(), ChartError> {
        for g in self.personality_gates.iter().chain(&self.design_gates) {
            if g.gate == 0 || usize::from(g.gate) > GATE_COUNT {
                return Err(ChartError::InvalidGate(g.gate));
            }
            if !(1..=6).contains(&g.line) {
                return Err(ChartError::InvalidLine(g.line));
            }
        }
        Ok(())
    }
}

/// Encode a chart summary as a share string.
pub fn encode_share(birth: &BirthData, chart: &Chart) -> Result<String, StoreError> {
    encode_shared(&SharedChart::new(birth, chart))
}

pub fn encode_shared(shared: &SharedChart) -> Result<String, StoreError> {
    let json = serde_json::to_vec(shared)?;
    let compressed =
        zstd::stream::encode_all(json.as_slice(), ZSTD_LEVEL).map_err(StoreError::Compression)?;
    let encoded = BASE64_URL_SAFE_NO_PAD.encode(compressed);
    debug!(json_bytes = json.len(), encoded_len = encoded.len(), "share string encoded");
    Ok(encoded)
}

/// Decode a share string.
pub fn decode_share(encoded: &str) -> Result<SharedChart, StoreError> {
    let compressed = BASE64_URL_SAFE_NO_PAD.decode(encoded.trim())?;
    let decoder =
        zstd::stream::read::Decoder::new(compressed.as_slice()).map_err(StoreError::Compression)?;
    let mut json = Vec::new();
    decoder
        .take(MAX_PAYLOAD_BYTES as u64 + 1)
        .read_to_end(&mut json)
        .map_err(StoreError::Compression)?;
    if json.len() > MAX_PAYLOAD_BYTES {
        return Err(StoreError::PayloadTooLarge {
            limit: MAX_PAYLOAD_BYTES,
        });
    }
    let shared: SharedChart = serde_json::from_slice(&json)?;
    shared.validate()?;
    Ok(shared)
}

/// `base` with its query and fragment replaced by `?chart=<share string>`.
pub fn share_url(base: &str, birth: &BirthData, chart: &Chart) -> Result<Url, StoreError> {
    let mut url = Url::parse(base)?;
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair(CHART_PARAM, &encode_share(birth, chart)?);
    Ok(url)
}

/// The `chart` query parameter of a URL.
pub fn chart_param(url: &str) -> Result<String, StoreError> {
    Url::parse(url)?
        .query_pairs()
        .find(|(k, _)| k == CHART_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
        .ok_or(StoreError::MissingChartParam)
}

/// Decode the chart carried by a share URL.
pub fn decode_share_url(url: &str) -> Result<SharedChart, StoreError> {
    decode_share(&chart_param(url)?)
}
