//! # fpdiff
//!
//! Compare two audio files by their Chromaprint fingerprints.
//! The fingerprints come from an external tool (`fpcalc`), are expanded
//! into 32 bit planes, XORed frame by frame and plotted as three stacked
//! grayscale heatmaps.
//!

pub mod bits;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod render;
#[cfg(feature = "diagnostics")]
pub mod report;
pub mod types;

#[cfg(test)]
mod tests;

pub use bits::{bits_to_int, int_to_bits, BitMatrix};
pub use compare::{run, Comparison, Outcome};
pub use config::{CompareConfig, FigureConfig};
pub use diff::{align, compute_bit_diff, DiffSummary};
pub use error::{CompareError, ConfigError, ExtractError, RenderError};
pub use fingerprint::{parse_fpcalc_output, FingerprintSource, Fpcalc};
pub use render::{Figure, FigureSink, SaveToFile, ShowInViewer};
pub use types::Fingerprint;
