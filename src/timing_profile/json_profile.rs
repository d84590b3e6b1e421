use crate::statistics::buckets::BucketScheme;
use crate::timing_profile::types::{Phase, ProfileError, ProfileSample};
use serde::Deserialize;
use std::convert::TryFrom;
use tracing::debug;

const LOG_TAG: &str = "log";
const LIN_TAG: &str = "lin";

/// One record as the firmware prints it: a flat object per (task, phase)
/// histogram inside a top-level json array. `exp` is only present for
/// logarithmic histograms and `div` only for linear ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub phase: String,
    pub hist: String,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub div: Option<f64>,
    pub hz: u64,
    pub runtime_ms: f64,
    pub data: Vec<u64>,
}

impl TryFrom<RawRecord> for ProfileSample {
    type Error = ProfileError;

    fn try_from(record: RawRecord) -> Result<Self, Self::Error> {
        let phase = Phase::from_tag(&record.phase).ok_or_else(|| {
            ProfileError::MalformedRecord(format!(
                "unknown phase '{}' for task '{}'",
                record.phase, record.name
            ))
        })?;
        let scheme = match record.hist.as_str() {
            LOG_TAG => {
                let base = record.exp.ok_or_else(|| {
                    ProfileError::InvalidScheme(
                        "logarithmic histogram without an exponent base".to_string(),
                    )
                })?;
                BucketScheme::Logarithmic { base }
            }
            LIN_TAG => {
                let step = record.div.ok_or_else(|| {
                    ProfileError::InvalidScheme("linear histogram without a divider".to_string())
                })?;
                BucketScheme::Linear { step }
            }
            other => {
                return Err(ProfileError::InvalidScheme(format!(
                    "unknown histogram kind '{}'",
                    other
                )))
            }
        };
        ProfileSample::new(
            record.name,
            phase,
            scheme,
            record.hz,
            record.runtime_ms * 1e-3,
            record.data,
        )
    }
}

pub(crate) fn parse_records(data: &[u8]) -> Result<Vec<ProfileSample>, ProfileError> {
    let records: Vec<RawRecord> = serde_json::from_slice(data)?;
    debug!("Parsed {} profile records", records.len());
    records.into_iter().map(ProfileSample::try_from).collect()
}
