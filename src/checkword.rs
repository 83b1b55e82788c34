//! Checkword computation for RDS blocks.
//!
//! Every 16-bit information word is protected by a 10-bit checkword from
//! the shortened cyclic code with generator polynomial
//! g(x) = x^10 + x^8 + x^7 + x^5 + x^4 + x^3 + 1 (0x5B9).

#[cfg(feature = "crc-table")]
use crc::{Algorithm, Crc};

/// Generator polynomial including the x^10 term.
pub const GENERATOR: u32 = 0x5B9;

/// Degree of the generator polynomial, i.e. the checkword width.
pub const CHECKWORD_BITS: u8 = 10;

const CHECKWORD_MASK: u32 = (1 << CHECKWORD_BITS) - 1;

/// The RDS checkword expressed as a non-reflected CRC-10.
#[cfg(feature = "crc-table")]
pub const CRC_10_RDS: Algorithm<u16> = Algorithm {
    width: 10,
    poly: 0x1B9,
    init: 0x000,
    refin: false,
    refout: false,
    xorout: 0x000,
    check: 0x079,
    residue: 0x000,
};

/// Table-driven checkword engine.
#[cfg(feature = "crc-table")]
pub const RDS: Crc<u16> = Crc::<u16>::new(&CRC_10_RDS);

/// Computes the syndrome of the low `bit_len` bits of `message`.
///
/// The message is shifted MSB-first through the division register and
/// followed by ten zero bits, giving the remainder of
/// `message * x^10 mod g(x)`. For a 16-bit information word that
/// remainder is its checkword; for a 26-bit codeword it is zero.
///
/// # Examples
/// ```rust
/// use rds::checkword::calc_syndrome;
///
/// assert_eq!(calc_syndrome(0x0001, 16), 0x1B9);
/// let codeword = (0x1234 << 10) | calc_syndrome(0x1234, 16) as u32;
/// assert_eq!(calc_syndrome(codeword, 26), 0);
/// ```
pub fn calc_syndrome(message: u32, bit_len: u8) -> u16 {
    let mut reg: u32 = 0;

    for i in (0..u32::from(bit_len.min(32))).rev() {
        reg = (reg << 1) | ((message >> i) & 0x01);
        if reg & (1 << CHECKWORD_BITS) != 0 {
            reg ^= GENERATOR;
        }
    }
    for _ in 0..CHECKWORD_BITS {
        reg <<= 1;
        if reg & (1 << CHECKWORD_BITS) != 0 {
            reg ^= GENERATOR;
        }
    }

    (reg & CHECKWORD_MASK) as u16
}

/// Calculates the checkword for a 16-bit information word.
#[cfg(feature = "crc-table")]
pub fn checkword(info: u16) -> u16 {
    RDS.checksum(&info.to_be_bytes())
}

/// Calculates the checkword for a 16-bit information word.
#[cfg(not(feature = "crc-table"))]
pub fn checkword(info: u16) -> u16 {
    calc_syndrome(u32::from(info), 16)
}

/// Checks a received 26-bit block against the offset word it should carry.
///
/// Removing the offset leaves a codeword of the block code, whose syndrome
/// is zero unless bits were corrupted.
pub fn block_is_valid(block: u32, offset: u16) -> bool {
    calc_syndrome(block ^ u32::from(offset), 26) == 0
}
