//! Fingerprint extraction through an external tool
//!
//! The real source runs Chromaprint's `fpcalc -raw -length <secs> <path>`
//! and parses the `FINGERPRINT=` line from its standard output. Any type
//! implementing [`FingerprintSource`] can stand in for it.

use log::debug;
use std::path::Path;
use std::process::Command;

use crate::config::CompareConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::types::{
    Fingerprint, DEFAULT_LENGTH_SECS, DEFAULT_TOOL, DURATION_MARKER, FINGERPRINT_MARKER,
};

/// Maps an audio file path to its fingerprint
pub trait FingerprintSource {
    fn fingerprint(&self, path: &Path) -> ExtractResult<Fingerprint>;
}

impl<F> FingerprintSource for F
where
    F: Fn(&Path) -> ExtractResult<Fingerprint>,
{
    fn fingerprint(&self, path: &Path) -> ExtractResult<Fingerprint> {
        self(path)
    }
}

/// Runs the `fpcalc` command line tool
#[derive(Debug, Clone)]
pub struct Fpcalc {
    tool: String,
    length_secs: u32,
}

impl Fpcalc {
    pub fn new(tool: impl Into<String>, length_secs: u32) -> Self {
        Self {
            tool: tool.into(),
            length_secs,
        }
    }

    pub fn from_config(config: &CompareConfig) -> Self {
        Self::new(config.tool.clone(), config.length_secs)
    }

    /// Arguments passed before the audio path
    pub fn args(&self) -> [String; 3] {
        [
            "-raw".to_string(),
            "-length".to_string(),
            self.length_secs.to_string(),
        ]
    }
}

impl Default for Fpcalc {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL, DEFAULT_LENGTH_SECS)
    }
}

impl FingerprintSource for Fpcalc {
    fn fingerprint(&self, path: &Path) -> ExtractResult<Fingerprint> {
        debug!("Running {} {:?} {}", self.tool, self.args(), path.display());

        let output = Command::new(&self.tool)
            .args(self.args())
            .arg(path)
            .output()
            .map_err(|source| ExtractError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let fingerprint = parse_fpcalc_output(&stdout)?;
        debug!(
            "{}: {} frames, duration {:?}",
            path.display(),
            fingerprint.len(),
            fingerprint.duration_secs
        );
        Ok(fingerprint)
    }
}

/// Parse the textual output of `fpcalc -raw`.
///
/// The first line starting with `FINGERPRINT=` wins. `DURATION=` is picked up
/// wherever it appears and is informational only.
pub fn parse_fpcalc_output(stdout: &str) -> ExtractResult<Fingerprint> {
    let mut duration = None;
    let mut payload = None;
    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix(DURATION_MARKER) {
            duration = duration.or_else(|| value.trim().parse::<f64>().ok());
        } else if let Some(value) = line.strip_prefix(FINGERPRINT_MARKER) {
            payload = payload.or(Some(value.trim()));
        }
    }

    let frames = parse_payload(payload.ok_or(ExtractError::MissingFingerprint)?)?;
    Ok(Fingerprint {
        frames,
        duration_secs: duration.map(|d| d.round() as u32),
    })
}

fn parse_payload(payload: &str) -> ExtractResult<Vec<u32>> {
    if payload.is_empty() {
        return Err(ExtractError::EmptyFingerprint);
    }
    payload
        .split(',')
        .enumerate()
        .map(|(index, raw)| {
            parse_value(raw.trim()).ok_or_else(|| ExtractError::InvalidValue {
                index,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// Unsigned values pass through; `-signed` output is reinterpreted as u32.
fn parse_value(raw: &str) -> Option<u32> {
    let value = raw.parse::<i64>().ok()?;
    if (0..=u32::MAX as i64).contains(&value) {
        Some(value as u32)
    } else if (i32::MIN as i64..0).contains(&value) {
        Some(value as i32 as u32)
    } else {
        None
    }
}
