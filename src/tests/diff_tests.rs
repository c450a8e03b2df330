//! Unit tests for fingerprint differences
//!
//! Covers alignment padding, XOR symmetry and the summary statistics,
//! including the documented behaviour for fingerprints of unequal length.

use crate::bits::{int_to_bits, BitMatrix};
use crate::diff::*;
use crate::types::FINGERPRINT_BITS;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_single_frame() {
        let diff = compute_bit_diff(&[5], &[5]);

        assert_eq!(diff.width(), 1);
        assert_eq!(diff.column(0), vec![0u8; 32], "Identical frames should not differ");
        assert_eq!(diff.count_ones(), 0);
    }

    #[test]
    fn test_five_vs_six() {
        // 0b101 ^ 0b110 = 0b011
        let diff = compute_bit_diff(&[5], &[6]);

        assert_eq!(diff.get(0, 0), 1);
        assert_eq!(diff.get(1, 0), 1);
        assert_eq!(diff.get(2, 0), 0);
        assert_eq!(diff.count_ones(), 2);
    }

    #[test]
    fn test_shorter_second_is_zero_padded() {
        let (a, b) = align(&[1, 2], &[1]);
        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, vec![1, 0], "Shorter sequence should be padded with zeros");

        assert_eq!(xor_frames(&[1, 2], &[1]), vec![0, 2]);

        let diff = compute_bit_diff(&[1, 2], &[1]);
        assert_eq!(diff.width(), 2);
        assert_eq!(diff.get(1, 1), 1, "Second column should have bit 1 set");
        assert_eq!(diff.count_ones(), 1);
    }

    #[test]
    fn test_shorter_first_is_zero_padded() {
        let (a, b) = align(&[], &[7, 8]);
        assert_eq!(a, vec![0, 0]);
        assert_eq!(b, vec![7, 8]);
    }

    #[test]
    fn test_both_empty() {
        let diff = compute_bit_diff(&[], &[]);
        assert_eq!(diff.width(), 0);

        let summary = DiffSummary::from_matrix(&diff, 0, 0);
        assert_eq!(summary.differing_bits, 0);
        assert_eq!(summary.bit_error_rate(), 0.0, "Empty grid should not divide by zero");
    }

    #[test]
    fn test_summary_counts() {
        let diff = compute_bit_diff(&[5, 0xFFFF_FFFF, 1], &[6, 0]);
        let summary = DiffSummary::from_matrix(&diff, 3, 2);

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.per_frame, vec![2, 32, 1]);
        assert_eq!(summary.per_bit[0], 3, "Bit 0 differs in every frame");
        assert_eq!(summary.per_bit[1], 2);
        assert_eq!(summary.per_bit[31], 1);
        assert_eq!(summary.per_bit.iter().sum::<usize>(), summary.differing_bits);
        assert_eq!(summary.differing_bits, 35);
        assert_eq!(summary.padded_frames(), 1);
        assert!((summary.bit_error_rate() - 35.0 / 96.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn test_diff_is_symmetric(
            pairs in prop::collection::vec((any::<u32>(), any::<u32>()), 0..64)
        ) {
            let (a, b): (Vec<u32>, Vec<u32>) = pairs.into_iter().unzip();
            prop_assert_eq!(compute_bit_diff(&a, &b), compute_bit_diff(&b, &a));
        }

        #[test]
        fn test_self_diff_is_zero(a in prop::collection::vec(any::<u32>(), 0..64)) {
            let diff = compute_bit_diff(&a, &a);
            prop_assert_eq!(diff.width(), a.len());
            prop_assert_eq!(diff.count_ones(), 0);
        }

        #[test]
        fn test_padding_exposes_longer_raw_values(
            a in prop::collection::vec(any::<u32>(), 0..48),
            b in prop::collection::vec(any::<u32>(), 0..48),
        ) {
            let diff = compute_bit_diff(&a, &b);
            let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

            prop_assert_eq!(diff.width(), long.len());
            for frame in short.len()..long.len() {
                prop_assert_eq!(diff.column(frame), int_to_bits(long[frame], FINGERPRINT_BITS));
            }
            for frame in 0..short.len() {
                prop_assert_eq!(
                    diff.column(frame),
                    BitMatrix::from_frames(&[a[frame] ^ b[frame]]).column(0)
                );
            }
        }
    }
}
