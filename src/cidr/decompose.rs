//! Range-to-CIDR decomposition.
//!
//! Greedy covering of an inclusive `u32` range with the minimal ordered list
//! of power-of-two-aligned blocks. At each step the block size is bounded by
//! two constraints: the alignment of the current address (its trailing zero
//! bits) and the number of addresses left in the range. Alignment binds near
//! range boundaries, forcing small blocks; mid-range blocks grow to the
//! largest power of two that still fits.

use std::fmt;

use crate::cidr::codec::number_to_ip;
use crate::error_handling::CidrError;

/// One aligned CIDR block: `base/prefix` covering `2^(32 - prefix)`
/// consecutive addresses.
///
/// Invariant: the low `32 - prefix` bits of `base` are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    /// First address of the block.
    pub base: u32,
    /// Prefix length, `0..=32`.
    pub prefix: u8,
}

impl CidrBlock {
    /// Number of addresses the block covers.
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.prefix)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", number_to_ip(self.base), self.prefix)
    }
}

/// Decomposes the inclusive range `min_ip..=max_ip` into the minimal ordered
/// list of disjoint, aligned CIDR blocks whose union is exactly the range.
///
/// Blocks are emitted in ascending address order. A single-address range
/// yields one `/32`; a range that is itself a naturally aligned power-of-two
/// block yields exactly one block at the maximal prefix.
///
/// Fails with [`CidrError::InvalidRange`] when `min_ip > max_ip`; no partial
/// output is produced.
///
/// # Examples
///
/// ```
/// use georoute::{ip_to_number, range_to_cidrs};
///
/// let blocks = range_to_cidrs(
///     ip_to_number("192.168.0.0").unwrap(),
///     ip_to_number("192.168.3.255").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].to_string(), "192.168.0.0/22");
/// ```
pub fn range_to_cidrs(min_ip: u32, max_ip: u32) -> Result<Vec<CidrBlock>, CidrError> {
    if min_ip > max_ip {
        return Err(CidrError::InvalidRange {
            start: min_ip,
            end: max_ip,
        });
    }

    // The cursor lives in u64 space: for the full range the final advance
    // lands at 2^32, which a u32 cursor would wrap back to zero.
    let end = max_ip as u64;
    let mut current = min_ip as u64;
    let mut blocks = Vec::new();

    while current <= end {
        // trailing_zeros(0) is 32, so a cursor at 0.0.0.0 is fully aligned.
        let align_bits = (current as u32).trailing_zeros();
        let remaining = end - current + 1;
        let size_bits = remaining.ilog2();
        let block_bits = align_bits.min(size_bits).min(32);

        blocks.push(CidrBlock {
            base: current as u32,
            prefix: (32 - block_bits) as u8,
        });
        current += 1u64 << block_bits;
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cidr::codec::ip_to_number;

    fn decompose(start: &str, end: &str) -> Vec<String> {
        range_to_cidrs(ip_to_number(start).unwrap(), ip_to_number(end).unwrap())
            .unwrap()
            .iter()
            .map(|b| b.to_string())
            .collect()
    }

    /// Checks the three structural properties at once: blocks are emitted in
    /// ascending order with no gap and no overlap (each base equals the end
    /// of the previous block), every base is aligned to its block size, and
    /// the sizes sum to exactly the range length.
    fn assert_exact_cover(start: u32, end: u32) {
        let blocks = range_to_cidrs(start, end).unwrap();
        let mut cursor = start as u64;
        for block in &blocks {
            assert_eq!(block.base as u64, cursor, "gap or overlap at {block}");
            assert_eq!(block.base as u64 % block.size(), 0, "misaligned block {block}");
            cursor += block.size();
        }
        assert_eq!(cursor, end as u64 + 1, "union does not equal the range");
    }

    #[test]
    fn test_aligned_slash_24() {
        assert_eq!(decompose("1.0.0.0", "1.0.0.255"), ["1.0.0.0/24"]);
    }

    #[test]
    fn test_aligned_slash_22() {
        assert_eq!(decompose("192.168.0.0", "192.168.3.255"), ["192.168.0.0/22"]);
    }

    #[test]
    fn test_single_address() {
        assert_eq!(decompose("10.0.0.1", "10.0.0.1"), ["10.0.0.1/32"]);
    }

    #[test]
    fn test_unaligned_range_staircase() {
        // Small blocks at both boundaries, the largest fitting block between
        assert_eq!(
            decompose("1.0.0.5", "1.0.0.20"),
            ["1.0.0.5/32", "1.0.0.6/31", "1.0.0.8/29", "1.0.0.16/30", "1.0.0.20/32"]
        );
    }

    #[test]
    fn test_full_address_space() {
        assert_eq!(decompose("0.0.0.0", "255.255.255.255"), ["0.0.0.0/0"]);
    }

    #[test]
    fn test_range_ending_at_max() {
        // Exercises the cursor advance past 255.255.255.255
        assert_eq!(
            decompose("255.255.255.254", "255.255.255.255"),
            ["255.255.255.254/31"]
        );
        assert_exact_cover(u32::MAX - 1000, u32::MAX);
    }

    #[test]
    fn test_range_starting_at_zero() {
        assert_eq!(decompose("0.0.0.0", "0.0.0.255"), ["0.0.0.0/24"]);
        assert_exact_cover(0, 12345);
    }

    #[test]
    fn test_alignment_binds_before_size() {
        // 1.0.0.1 has no trailing zeros, so the first block must be a /32
        // even though 256 addresses remain.
        let blocks = range_to_cidrs(
            ip_to_number("1.0.0.1").unwrap(),
            ip_to_number("1.0.1.0").unwrap(),
        )
        .unwrap();
        assert_eq!(blocks[0].to_string(), "1.0.0.1/32");
    }

    #[test]
    fn test_exact_cover_properties() {
        let samples: &[(u32, u32)] = &[
            (0, 0),
            (0, u32::MAX),
            (1, u32::MAX),
            (0, u32::MAX - 1),
            (5, 20),
            (16777216, 16777471),
            (3232235520, 3232236543),
            (609648640, 609652735),
            (123456789, 987654321),
            (u32::MAX, u32::MAX),
        ];
        for &(start, end) in samples {
            assert_exact_cover(start, end);
        }
    }

    #[test]
    fn test_block_count_stays_bounded() {
        // Worst case is two staircases of at most 32 steps each
        let blocks = range_to_cidrs(1, u32::MAX - 1).unwrap();
        assert!(blocks.len() <= 64, "got {} blocks", blocks.len());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = range_to_cidrs(10, 5).unwrap_err();
        assert_eq!(err, CidrError::InvalidRange { start: 10, end: 5 });
    }
}
