//! Trait definitions for encodable types.

use super::error::EncodingResult;
use super::writer::BitWriter;

/// Trait for types that can be written to the RDS bitstream.
pub trait Encodable {
    /// Encode the structure MSB-first into the writer.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()>;

    /// Calculate the encoded size in bytes.
    fn encoded_size(&self) -> usize;

    /// Convenience method to encode to a new byte vector.
    fn encode_to_vec(&self) -> EncodingResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_size());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }
}

/// Extension trait for text renderings of encoded groups.
#[cfg(feature = "base64")]
pub trait TextEncodable: Encodable {
    /// Encode to a base64 string.
    fn encode_base64(&self) -> EncodingResult<String> {
        use data_encoding::BASE64;
        Ok(BASE64.encode(&self.encode_to_vec()?))
    }

    /// Encode to an upper-case hex string.
    fn encode_hex(&self) -> EncodingResult<String> {
        use data_encoding::HEXUPPER;
        Ok(HEXUPPER.encode(&self.encode_to_vec()?))
    }
}

#[cfg(feature = "base64")]
impl<T: Encodable> TextEncodable for T {}
