//! Mapping from Unicode text to the RDS basic character set.
//!
//! Printable ASCII is shared with the RDS table. A handful of accented
//! Latin letters live in the 0x80–0x9F row; everything else is sent as a
//! space.

const SPACE: u8 = 0x20;

/// Accented characters and their RDS code points.
const EXTENDED: &[(char, u8)] = &[
    ('á', 0x80),
    ('à', 0x81),
    ('é', 0x82),
    ('è', 0x83),
    ('í', 0x84),
    ('ì', 0x85),
    ('ó', 0x86),
    ('ò', 0x87),
    ('ú', 0x88),
    ('ù', 0x89),
    ('Ñ', 0x8A),
    ('Ç', 0x8B),
    ('Ş', 0x8C),
    ('ß', 0x8D),
    ('¡', 0x8E),
    ('Ĳ', 0x8F),
    ('â', 0x90),
    ('ä', 0x91),
    ('ê', 0x92),
    ('ë', 0x93),
    ('î', 0x94),
    ('ï', 0x95),
    ('ô', 0x96),
    ('ö', 0x97),
    ('û', 0x98),
    ('ü', 0x99),
    ('ñ', 0x9A),
    ('ç', 0x9B),
    ('ş', 0x9C),
    ('ğ', 0x9D),
    ('ı', 0x9E),
    ('ĳ', 0x9F),
];

/// Returns the RDS byte for a character.
pub fn rds_byte(ch: char) -> u8 {
    if ch == ' ' || ch.is_ascii_graphic() {
        return ch as u8;
    }
    EXTENDED
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, b)| *b)
        .unwrap_or(SPACE)
}

/// Returns the character an RDS byte stands for.
///
/// Bytes outside printable ASCII and the accented row read back as a space.
pub fn rds_char(byte: u8) -> char {
    if byte == SPACE || byte.is_ascii_graphic() {
        return char::from(byte);
    }
    EXTENDED
        .iter()
        .find(|(_, b)| *b == byte)
        .map(|(c, _)| *c)
        .unwrap_or(' ')
}

/// Decodes RDS bytes back into text.
pub fn rds_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(rds_char).collect()
}

/// Fills `target` with the RDS encoding of `input`, padding with spaces.
///
/// Characters beyond the target length are dropped.
pub fn fill_rds_string(target: &mut [u8], input: &str) {
    let mut chars = input.chars();
    for slot in target.iter_mut() {
        *slot = chars.next().map(rds_byte).unwrap_or(SPACE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut ps = [0u8; 8];
        fill_rds_string(&mut ps, "RADIO 1!");
        assert_eq!(&ps, b"RADIO 1!");
    }

    #[test]
    fn test_padding_and_truncation() {
        let mut short = [0u8; 8];
        fill_rds_string(&mut short, "FM");
        assert_eq!(&short, b"FM      ");

        let mut long = [0u8; 4];
        fill_rds_string(&mut long, "ABCDEFG");
        assert_eq!(&long, b"ABCD");
    }

    #[test]
    fn test_extended_and_unknown() {
        assert_eq!(rds_byte('é'), 0x82);
        assert_eq!(rds_byte('ç'), 0x9B);
        assert_eq!(rds_byte('€'), SPACE);
        assert_eq!(rds_byte('\n'), SPACE);
    }

    #[test]
    fn test_decode_extended_row() {
        for &(ch, byte) in EXTENDED {
            assert_eq!(rds_char(byte), ch);
        }
        assert_eq!(rds_char(0x41), 'A');
        assert_eq!(rds_char(0xA0), ' ');

        let mut ps = [0u8; 8];
        fill_rds_string(&mut ps, "café fm!");
        assert_eq!(ps[3], 0x82);
        assert_eq!(rds_string(&ps), "café fm!");
    }
}
