//! Block assembly and group serialization.
//!
//! Each information word is extended with its checkword into a 26-bit
//! block and then XORed with the offset word of its position. Four blocks
//! make up the 104-bit group that is handed to the modulator.

use crate::checkword::checkword;
use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::group::{GroupSlot, InfoWords, Variant};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Offset word for block 1 (A).
pub const OFFSET_A: u16 = 0x0FC;
/// Offset word for block 2 (B).
pub const OFFSET_B: u16 = 0x198;
/// Offset word for block 3 of version A groups (C).
pub const OFFSET_C: u16 = 0x168;
/// Offset word for block 4 (D).
pub const OFFSET_D: u16 = 0x1B4;
/// Offset word for block 3 of version B groups (C').
pub const OFFSET_C_PRIME: u16 = 0x350;

/// Offset words indexed by block position, with C' in the last slot.
pub const OFFSET_WORDS: [u16; 5] = [OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D, OFFSET_C_PRIME];

/// Size of one serialized group in bytes.
pub const GROUP_BYTES: usize = 13;

/// One serialized group: four 26-bit blocks, MSB first.
pub type GroupBuffer = [u8; GROUP_BYTES];

/// Returns the offset word for block `index` of a group of `variant`.
pub fn offset_word(index: usize, variant: Variant) -> u16 {
    if index == 2 && variant == Variant::B {
        OFFSET_WORDS[4]
    } else {
        OFFSET_WORDS[index]
    }
}

/// Turns four information words into four offset-marked 26-bit blocks.
pub fn assemble_blocks(info: &InfoWords, variant: Variant) -> [u32; 4] {
    let mut blocks = [0u32; 4];
    for (i, (block, &word)) in blocks.iter_mut().zip(info.iter()).enumerate() {
        *block = (u32::from(word) << 10) | u32::from(checkword(word));
        *block ^= u32::from(offset_word(i, variant));
    }
    blocks
}

/// Packs four 26-bit blocks into 13 bytes, most significant bit first.
pub fn serialize(blocks: &[u32; 4]) -> GroupBuffer {
    let mut writer = BitWriter::with_capacity(GROUP_BYTES);
    write_blocks(&mut writer, blocks);
    let mut buffer = [0u8; GROUP_BYTES];
    // four blocks are exactly 104 bits
    buffer.copy_from_slice(&writer.finish());
    buffer
}

fn write_blocks(writer: &mut BitWriter, blocks: &[u32; 4]) {
    for &block in blocks {
        writer.write_block(block);
    }
}

/// A fully assembled group instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EncodedGroup {
    /// The type/variant this instance belongs to.
    pub slot: GroupSlot,
    /// Information words before checkwords were added.
    pub info: InfoWords,
    /// The four offset-marked blocks.
    pub blocks: [u32; 4],
    /// The serialized group.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_hex"))]
    pub bytes: GroupBuffer,
}

impl EncodedGroup {
    /// Assembles and serializes a group from its information words.
    pub fn new(slot: GroupSlot, info: InfoWords) -> Self {
        let blocks = assemble_blocks(&info, slot.variant());
        Self {
            slot,
            info,
            blocks,
            bytes: serialize(&blocks),
        }
    }

    /// The 13-byte buffer to hand to the modulator.
    pub fn bytes(&self) -> &GroupBuffer {
        &self.bytes
    }
}

impl Encodable for EncodedGroup {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        write_blocks(writer, &self.blocks);
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        GROUP_BYTES
    }
}

#[cfg(feature = "serde")]
fn serialize_hex<S>(value: &GroupBuffer, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let hex: String = value.iter().map(|b| format!("{b:02X}")).collect();
    serializer.serialize_str(&hex)
}
