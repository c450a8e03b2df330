//! Bitwise fingerprint difference
//!
//! Aligns two fingerprints by zero-padding the shorter one and XORs the
//! aligned frames into a difference grid.
//!
//! When the lengths differ, the columns past the shorter fingerprint hold
//! the longer fingerprint's raw bits (XOR with zero), not a true difference.
//! Callers reading the total count should keep that in mind.

#[cfg(feature = "diagnostics")]
use serde::Serialize;

use crate::bits::BitMatrix;
use crate::types::FINGERPRINT_BITS;

/// Right-pad both sequences with zeros to the longer length
pub fn align(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let len = a.len().max(b.len());
    let pad = |s: &[u32]| {
        let mut v = Vec::with_capacity(len);
        v.extend_from_slice(s);
        v.resize(len, 0);
        v
    };
    (pad(a), pad(b))
}

/// XOR of the aligned sequences, one value per frame
pub fn xor_frames(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (a, b) = align(a, b);
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

/// Compute the `[bit position x frame]` difference grid
pub fn compute_bit_diff(a: &[u32], b: &[u32]) -> BitMatrix {
    BitMatrix::from_frames(&xor_frames(a, b))
}

/// Aggregate statistics over a difference grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct DiffSummary {
    /// Frames in the aligned grid
    pub frames: usize,
    /// Length of the first fingerprint before padding
    pub len_a: usize,
    /// Length of the second fingerprint before padding
    pub len_b: usize,
    /// Total differing bits
    pub differing_bits: usize,
    /// Differing bits per bit position, index 0 = LSB
    pub per_bit: Vec<usize>,
    /// Differing bits per frame
    pub per_frame: Vec<usize>,
}

impl DiffSummary {
    pub fn from_matrix(diff: &BitMatrix, len_a: usize, len_b: usize) -> Self {
        let per_bit = (0..FINGERPRINT_BITS)
            .map(|bit| diff.row(bit).iter().filter(|&&b| b != 0).count())
            .collect();
        let mut per_frame = vec![0usize; diff.width()];
        for (frame, _) in diff.ones() {
            per_frame[frame] += 1;
        }
        Self {
            frames: diff.width(),
            len_a,
            len_b,
            differing_bits: diff.count_ones(),
            per_bit,
            per_frame,
        }
    }

    /// Fraction of differing cells, 0.0 for an empty grid
    pub fn bit_error_rate(&self) -> f64 {
        let cells = self.frames * FINGERPRINT_BITS;
        if cells == 0 {
            0.0
        } else {
            self.differing_bits as f64 / cells as f64
        }
    }

    /// Frames that only exist in the longer fingerprint
    pub fn padded_frames(&self) -> usize {
        self.len_a.abs_diff(self.len_b)
    }
}
