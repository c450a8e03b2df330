//! Core types and constants
//!
//! Shared constants for fingerprint layout and the external tool invocation,
//! plus the `Fingerprint` value produced by extraction.

#[cfg(feature = "diagnostics")]
use serde::Serialize;

/// Number of bits in one fingerprint frame
pub const FINGERPRINT_BITS: usize = 32;

/// Default analysed duration passed to the tool's `-length` option
pub const DEFAULT_LENGTH_SECS: u32 = 120;

/// Default fingerprinting executable
pub const DEFAULT_TOOL: &str = "fpcalc";

/// Output line prefix carrying the fingerprint payload
pub const FINGERPRINT_MARKER: &str = "FINGERPRINT=";

/// Output line prefix carrying the decoded duration
pub const DURATION_MARKER: &str = "DURATION=";

/// Ordered sequence of 32-bit fingerprint frames for one audio file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct Fingerprint {
    /// One value per analysis frame, in temporal order
    pub frames: Vec<u32>,
    /// Duration in seconds as reported by the tool, if any
    pub duration_secs: Option<u32>,
}

impl Fingerprint {
    pub fn new(frames: Vec<u32>) -> Self {
        Self {
            frames,
            duration_secs: None,
        }
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.frames
    }
}

impl From<Vec<u32>> for Fingerprint {
    fn from(frames: Vec<u32>) -> Self {
        Self::new(frames)
    }
}
