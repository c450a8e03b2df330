//! Bit plane expansion
//!
//! Converts fingerprint frames into per-bit vectors (bit 0 = least
//! significant) and assembles them into a `[bit position x frame]` grid.

use crate::types::FINGERPRINT_BITS;

/// Expand `value` into `width` bits, least significant first.
///
/// Bits above position 31 are always zero.
pub fn int_to_bits(value: u32, width: usize) -> Vec<u8> {
    (0..width)
        .map(|i| if i < 32 { ((value >> i) & 1) as u8 } else { 0 })
        .collect()
}

/// Reassemble an integer from bits produced by [`int_to_bits`].
///
/// Each bit `i` contributes `bit_i * 2^i`; positions past 31 are ignored.
pub fn bits_to_int(bits: &[u8]) -> u32 {
    bits.iter()
        .take(32)
        .enumerate()
        .fold(0u32, |acc, (i, &bit)| acc | (((bit & 1) as u32) << i))
}

/// Binary grid with one row per bit position and one column per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    /// Row-major storage: `data[bit * frames + frame]`
    data: Vec<u8>,
    frames: usize,
}

impl BitMatrix {
    /// Build the grid for a sequence of frames.
    ///
    /// Expansion naturally yields `[frame, bit]`; the result is stored
    /// transposed so rows are bit positions.
    pub fn from_frames(frames: &[u32]) -> Self {
        let width = frames.len();
        let mut data = vec![0u8; FINGERPRINT_BITS * width];
        for (frame, &value) in frames.iter().enumerate() {
            for (bit, b) in int_to_bits(value, FINGERPRINT_BITS).into_iter().enumerate() {
                data[bit * width + frame] = b;
            }
        }
        Self {
            data,
            frames: width,
        }
    }

    /// Number of frames (columns)
    pub fn width(&self) -> usize {
        self.frames
    }

    /// Number of bit positions (rows), always 32
    pub fn height(&self) -> usize {
        FINGERPRINT_BITS
    }

    /// Bit value at `(bit, frame)`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, bit: usize, frame: usize) -> u8 {
        assert!(bit < FINGERPRINT_BITS, "bit position {} out of range", bit);
        assert!(frame < self.frames, "frame {} out of range", frame);
        self.data[bit * self.frames + frame]
    }

    /// All frames for one bit position
    pub fn row(&self, bit: usize) -> &[u8] {
        let start = bit * self.frames;
        &self.data[start..start + self.frames]
    }

    /// All bit positions for one frame, least significant first
    pub fn column(&self, frame: usize) -> Vec<u8> {
        (0..FINGERPRINT_BITS).map(|bit| self.get(bit, frame)).collect()
    }

    /// Total number of set cells
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&b| b != 0).count()
    }

    /// Iterate the `(frame, bit)` coordinates of every set cell
    pub fn ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let frames = self.frames;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &b)| b != 0)
            .map(move |(idx, _)| (idx % frames, idx / frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_bits_lsb_first() {
        let bits = int_to_bits(0b101, 32);
        assert_eq!(bits.len(), 32);
        assert_eq!(&bits[..4], &[1, 0, 1, 0]);
        assert!(bits[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_matrix_orientation() {
        let m = BitMatrix::from_frames(&[1, 0x8000_0000]);
        assert_eq!(m.width(), 2);
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(31, 1), 1);
        assert_eq!(m.count_ones(), 2);
        assert_eq!(m.ones().collect::<Vec<_>>(), vec![(0, 0), (1, 31)]);
    }
}
