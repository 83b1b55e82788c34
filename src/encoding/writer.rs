//! Bit-level writer for encoding binary data.

use super::error::{EncodingError, EncodingResult};

/// Width of one RDS block in bits.
pub const BLOCK_BITS: u8 = 26;

/// A writer that packs arbitrary bit-width values MSB-first into bytes.
///
/// RDS blocks are 26 bits wide, so consecutive blocks straddle byte
/// boundaries. Pending bits are held in an accumulator and flushed to the
/// output buffer one byte at a time.
pub struct BitWriter {
    buffer: Vec<u8>,
    /// Pending bits, right-aligned.
    pending: u64,
    /// Number of valid bits in `pending` (always < 8 between calls).
    pending_bits: u8,
}

impl BitWriter {
    /// Creates a new `BitWriter` with an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new `BitWriter` with a pre-allocated buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Writes the low `bits` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns an error if `bits` is 0 or greater than 32.
    pub fn write_bits(&mut self, value: u32, bits: u8) -> EncodingResult<()> {
        if bits == 0 || bits > 32 {
            return Err(EncodingError::InvalidFieldValue {
                field: "bits",
                value: bits.to_string(),
            });
        }
        self.push_bits(value, bits);
        Ok(())
    }

    /// Writes one 26-bit block.
    pub fn write_block(&mut self, block: u32) {
        self.push_bits(block, BLOCK_BITS);
    }

    /// `bits` must be in 1..=32.
    fn push_bits(&mut self, value: u32, bits: u8) {
        let masked = u64::from(value) & ((1u64 << bits) - 1);
        self.pending = (self.pending << bits) | masked;
        self.pending_bits += bits;

        while self.pending_bits >= 8 {
            self.pending_bits -= 8;
            self.buffer.push((self.pending >> self.pending_bits) as u8);
        }
        self.pending &= (1u64 << self.pending_bits) - 1;
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) -> EncodingResult<()> {
        self.write_bits(u32::from(bit), 1)
    }

    /// Finishes writing and returns the complete buffer.
    ///
    /// A trailing partial byte is padded with zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            let byte = (self.pending << (8 - self.pending_bits)) as u8;
            self.buffer.push(byte);
        }
        self.buffer
    }

    /// Returns the number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + usize::from(self.pending_bits)
    }

    /// Returns true if no bits have been written yet.
    pub fn is_empty(&self) -> bool {
        self.bit_len() == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_across_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        writer.write_bits(0b0110, 4).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        assert_eq!(writer.finish(), vec![0b10111001, 0b01101111]);
    }

    #[test]
    fn test_write_bit() {
        let mut writer = BitWriter::new();
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish(), vec![0b10110101]);
    }

    #[test]
    fn test_two_blocks_straddle_bytes() {
        let mut writer = BitWriter::new();
        writer.write_block(0x3FF_FFFF);
        writer.write_block(0);
        assert_eq!(writer.bit_len(), 52);
        // 26 ones, 26 zeros, 4 bits of padding
        assert_eq!(
            writer.finish(),
            vec![0xFF, 0xFF, 0xFF, 0xC0, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_four_blocks_fill_thirteen_bytes() {
        let mut writer = BitWriter::new();
        for _ in 0..4 {
            writer.write_block(0x2AA_AAAA);
        }
        let buffer = writer.finish();
        assert_eq!(buffer.len(), 13);
        assert!(buffer.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_partial_byte_finish() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110, 5).unwrap();
        assert_eq!(writer.finish(), vec![0b10110000]);
    }

    #[test]
    fn test_value_masking() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 4).unwrap();
        assert_eq!(writer.finish(), vec![0b11110000]);
    }

    #[test]
    fn test_invalid_bits() {
        let mut writer = BitWriter::new();
        assert!(writer.write_bits(0, 0).is_err());
        assert!(writer.write_bits(0, 33).is_err());
        assert!(writer.is_empty());
    }
}
