use crate::timing_profile::json_profile::parse_records;
use crate::timing_profile::types::{ProfileError, TimingProfile};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

pub mod json_profile;
pub mod summary;
pub mod types;

pub fn parse(filename: impl AsRef<Path>) -> Result<TimingProfile, ProfileError> {
    let mut buffer = Vec::new();
    let mut f = File::open(filename)?;
    f.read_to_end(&mut buffer)?;
    parse_bytes(buffer.as_slice())
}

pub fn parse_str(data: &str) -> Result<TimingProfile, ProfileError> {
    parse_bytes(data.as_bytes())
}

/// Parses a profile dump and groups its records per task. Fails on the first
/// malformed record; callers wanting to skip bad records and continue can go
/// through `json_profile::RawRecord` themselves.
pub fn parse_bytes(data: &[u8]) -> Result<TimingProfile, ProfileError> {
    let samples = parse_records(data)?;
    TimingProfile::from_samples(samples)
}
