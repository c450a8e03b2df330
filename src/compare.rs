//! End-to-end comparison of two audio files
//!
//! Checks the inputs, extracts both fingerprints through a
//! [`FingerprintSource`], computes the difference and hands the figure to a
//! [`FigureSink`]. Every handled failure is reported as a line on `out`.

use log::{info, warn};
use std::io::Write;
use std::path::Path;

use crate::bits::BitMatrix;
use crate::config::CompareConfig;
use crate::diff::{align, compute_bit_diff, DiffSummary};
use crate::error::CompareResult;
use crate::fingerprint::FingerprintSource;
use crate::render::{Figure, FigureSink};
use crate::types::{Fingerprint, FINGERPRINT_BITS};

pub const MISSING_INPUT_MESSAGE: &str = "One or both audio files do not exist.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract fingerprints.";

/// Aligned fingerprints and their difference
#[derive(Debug, Clone)]
pub struct Comparison {
    /// First fingerprint, zero-padded to the aligned length
    pub first: Fingerprint,
    /// Second fingerprint, zero-padded to the aligned length
    pub second: Fingerprint,
    pub diff: BitMatrix,
    pub summary: DiffSummary,
}

impl Comparison {
    /// Align two fingerprints and compute their bit difference.
    ///
    /// Both returned fingerprints carry the padding, so all three grids share
    /// one frame axis.
    pub fn new(first: &Fingerprint, second: &Fingerprint) -> Self {
        let diff = compute_bit_diff(first.as_slice(), second.as_slice());
        let summary = DiffSummary::from_matrix(&diff, first.len(), second.len());
        let (a, b) = align(first.as_slice(), second.as_slice());
        Self {
            first: Fingerprint {
                frames: a,
                duration_secs: first.duration_secs,
            },
            second: Fingerprint {
                frames: b,
                duration_secs: second.duration_secs,
            },
            diff,
            summary,
        }
    }

    pub fn figure(&self) -> Figure {
        Figure::new(
            BitMatrix::from_frames(self.first.as_slice()),
            BitMatrix::from_frames(self.second.as_slice()),
            self.diff.clone(),
        )
    }
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    /// An input path was not an existing file; nothing was extracted
    MissingInput,
    /// At least one fingerprint could not be extracted; nothing was rendered
    ExtractionFailed,
    /// The figure was handed to the sink
    Compared(Box<Comparison>),
}

/// Run the whole pipeline for two audio files.
///
/// Rendering errors and failures writing to `out` are returned; input and
/// extraction problems are reported on `out` and end the run with the
/// matching [`Outcome`].
pub fn run<S, K>(
    config: &CompareConfig,
    source: &S,
    sink: &K,
    first: &Path,
    second: &Path,
    out: &mut dyn Write,
) -> CompareResult<Outcome>
where
    S: FingerprintSource + ?Sized,
    K: FigureSink + ?Sized,
{
    if !first.is_file() || !second.is_file() {
        writeln!(out, "{}", MISSING_INPUT_MESSAGE)?;
        return Ok(Outcome::MissingInput);
    }

    if !config.quiet {
        writeln!(
            out,
            "Generating fingerprints for:\n  - {}\n  - {}",
            first.display(),
            second.display()
        )?;
    }

    // Both files are always attempted so each failure gets reported.
    let fp1 = extract(source, first, out)?;
    let fp2 = extract(source, second, out)?;
    let (fp1, fp2) = match (fp1, fp2) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            writeln!(out, "{}", EXTRACTION_FAILED_MESSAGE)?;
            return Ok(Outcome::ExtractionFailed);
        }
    };

    if fp1.len() != fp2.len() {
        warn!(
            "Fingerprint lengths differ ({} vs {}); trailing {} frames compare against zero padding",
            fp1.len(),
            fp2.len(),
            fp1.len().abs_diff(fp2.len())
        );
    }

    let comparison = Comparison::new(&fp1, &fp2);
    sink.present(&comparison.figure())?;

    let summary = &comparison.summary;
    info!(
        "{} of {} bits differ over {} frames",
        summary.differing_bits,
        summary.frames * FINGERPRINT_BITS,
        summary.frames
    );
    if !config.quiet {
        writeln!(
            out,
            "Total: {} bits differ ({:.2}% over {} frames)",
            summary.differing_bits,
            summary.bit_error_rate() * 100.0,
            summary.frames
        )?;
    }

    Ok(Outcome::Compared(Box::new(comparison)))
}

fn extract<S>(source: &S, path: &Path, out: &mut dyn Write) -> CompareResult<Option<Fingerprint>>
where
    S: FingerprintSource + ?Sized,
{
    match source.fingerprint(path) {
        Ok(fp) => Ok(Some(fp)),
        Err(e) => {
            writeln!(out, "Error processing file {}: {}", path.display(), e)?;
            Ok(None)
        }
    }
}
