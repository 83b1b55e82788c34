//! Alternate frequency codes (method A).
//!
//! A frequency is carried as one byte in block C of a type 0A group. The
//! code space is split between the FM band (0.1 MHz raster), LF
//! (9 kHz raster from 153 kHz) and MF (9 kHz raster from 531 kHz).

use crate::encoding::{EncodingError, EncodingResult};

/// Code sent in an AF slot that carries no frequency.
pub const AF_FILLER: u8 = 205;

/// Frequency band an alternate frequency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 87.6 – 107.9 MHz.
    Fm,
    /// 153 – 279 kHz.
    Lf,
    /// 531 – 1602 kHz.
    Mf,
}

impl Band {
    /// Classifies a frequency given in MHz (FM) or kHz (LF/MF).
    pub fn of(freq: f64) -> Option<Band> {
        if (87.6..=107.9).contains(&freq) {
            Some(Band::Fm)
        } else if (153.0..=279.0).contains(&freq) {
            Some(Band::Lf)
        } else if (531.0..=1602.0).contains(&freq) {
            Some(Band::Mf)
        } else {
            None
        }
    }
}

/// Encodes a frequency in MHz (FM) or kHz (LF/MF) as its AF code.
///
/// # Errors
///
/// Returns [`EncodingError::FrequencyOutOfRange`] when the frequency is
/// outside all three bands.
///
/// # Examples
/// ```rust
/// use rds::af::encode_af;
///
/// assert_eq!(encode_af(87.6).unwrap(), 1);
/// assert_eq!(encode_af(107.9).unwrap(), 204);
/// assert!(encode_af(50.0).is_err());
/// ```
pub fn encode_af(freq: f64) -> EncodingResult<u8> {
    let code = match Band::of(freq) {
        Some(Band::Fm) => ((freq - 87.5) * 10.0).round_ties_even(),
        Some(Band::Lf) => ((freq - 144.0) / 9.0).round_ties_even(),
        Some(Band::Mf) => ((freq - 531.0) / 9.0).round_ties_even() + 16.0,
        None => return Err(EncodingError::FrequencyOutOfRange(freq)),
    };
    Ok(code as u8)
}

/// Packs two AF slots into the 16 bits of block C.
///
/// Unset slots carry [`AF_FILLER`]. Out-of-band frequencies are logged and
/// sent as code 0 ("not to be used").
pub fn pack_pair(af1: Option<f64>, af2: Option<f64>) -> u16 {
    let code = |slot: Option<f64>| match slot {
        None => AF_FILLER,
        Some(freq) => encode_af(freq).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            0
        }),
    };
    (u16::from(code(af1)) << 8) | u16::from(code(af2))
}
