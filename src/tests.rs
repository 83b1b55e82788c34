//! End-to-end encoding scenarios.

use crate::Configuration;
use crate::block::{GROUP_BYTES, offset_word};
use crate::checkword::{block_is_valid, calc_syndrome};
use crate::config::{ConfigurationBuilder, Paging, parse_config_str};
use crate::group::{GroupSlot, Variant};
use crate::session::EncodingSession;
use crate::time::FixedClock;
use chrono::{TimeZone, Utc};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 0.0)
}

fn session_for(config: Configuration) -> EncodingSession<FixedClock> {
    let mut session = EncodingSession::with_clock(clock());
    session.configure(config);
    session
}

/// Recovers the information word from a serialized group.
fn info_word(bytes: &[u8; GROUP_BYTES], block: usize) -> u16 {
    let bits = bytes
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
    let block_bits = (bits >> (26 * (3 - block))) & 0x3FF_FFFF;
    (block_bits >> 10) as u16
}

#[test]
fn test_group_0a_produces_four_segments() {
    let config = ConfigurationBuilder::new()
        .program_identifier(0x54A8)
        .program_service_name("RUSTY FM")
        .unwrap()
        .group(GroupSlot::BASIC_TUNING_A)
        .build();
    let mut session = session_for(config);
    let groups = session.encode().unwrap();

    let basic: Vec<_> = groups
        .iter()
        .filter(|g| g.slot == GroupSlot::BASIC_TUNING_A)
        .collect();
    assert_eq!(basic.len(), 4);

    for (segment, group) in basic.iter().enumerate() {
        let header = info_word(&group.bytes, 1);
        assert_eq!(header >> 12, 0);
        assert_eq!(header & 0x3, segment as u16);
        let stereo = header & 0x4 != 0;
        assert_eq!(stereo, segment == 3);
    }
    // 4th repetition carries the 0x5 sub-bits on top of segment address 3
    assert_eq!(info_word(&basic[3].bytes, 1) & 0x7, 0x7);
}

#[test]
fn test_group_2a_covers_full_radiotext() {
    let text = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!?";
    assert_eq!(text.len(), 64);

    let config = ConfigurationBuilder::new()
        .radiotext(text)
        .unwrap()
        .group(GroupSlot::RADIOTEXT_A)
        .build();
    let mut session = session_for(config);
    let groups = session.encode().unwrap();

    let radiotext: Vec<_> = groups
        .iter()
        .filter(|g| g.slot == GroupSlot::RADIOTEXT_A)
        .collect();
    assert_eq!(radiotext.len(), 16);

    let mut rebuilt = Vec::new();
    for (segment, group) in radiotext.iter().enumerate() {
        assert_eq!(info_word(&group.bytes, 1) & 0xF, segment as u16);
        rebuilt.extend_from_slice(&info_word(&group.bytes, 2).to_be_bytes());
        rebuilt.extend_from_slice(&info_word(&group.bytes, 3).to_be_bytes());
    }
    assert_eq!(String::from_utf8(rebuilt).unwrap(), text);
}

#[test]
fn test_every_buffer_is_thirteen_bytes_with_valid_blocks() {
    let config = ConfigurationBuilder::new()
        .program_identifier(0xC0DE)
        .traffic_program(true)
        .program_type(5)
        .unwrap()
        .alternate_frequency(0, 98.1)
        .unwrap()
        .paging(Paging {
            data_delay: 1,
            extent: 2,
            event: 3,
            location: 4,
        })
        .unwrap()
        .group(GroupSlot::BASIC_TUNING_A)
        .group(GroupSlot::BASIC_TUNING_B)
        .group(GroupSlot::RADIOTEXT_A)
        .group(GroupSlot::RADIOTEXT_B)
        .group(GroupSlot::PAGING)
        .build();
    let mut session = session_for(config);
    let groups = session.encode().unwrap();
    assert_eq!(groups.len(), 4 + 16 + 1 + 1 + 4 + 16);

    for group in groups {
        assert_eq!(group.bytes.len(), GROUP_BYTES);
        assert_eq!(info_word(&group.bytes, 0), 0xC0DE);
        for (i, &block) in group.blocks.iter().enumerate() {
            assert!(block_is_valid(block, offset_word(i, group.slot.variant())));
        }
    }
    assert!(groups.iter().any(|g| g.slot == GroupSlot::CLOCK_TIME));
}

#[test]
fn test_activation_order() {
    let config = ConfigurationBuilder::new()
        .group(GroupSlot::PAGING)
        .group(GroupSlot::RADIOTEXT_B)
        .group(GroupSlot::BASIC_TUNING_A)
        .build();
    let mut session = session_for(config);
    let order: Vec<String> = session
        .encode()
        .unwrap()
        .iter()
        .map(|g| g.slot.to_string())
        .collect();

    let mut expected = vec!["0A"; 4];
    expected.push("4A");
    expected.push("8A");
    expected.extend(vec!["2B"; 16]);
    assert_eq!(order, expected);
}

#[test]
fn test_reset_then_encode_is_deterministic() {
    let config = ConfigurationBuilder::new()
        .program_identifier(0x1234)
        .program_service_name("STATION ")
        .unwrap()
        .radiotext("Deterministic output")
        .unwrap()
        .group(GroupSlot::BASIC_TUNING_A)
        .group(GroupSlot::RADIOTEXT_A)
        .build();
    let mut session = session_for(config);

    session.reset();
    let first = session.encode().unwrap().to_vec();
    let second = session.encode().unwrap().to_vec();
    assert_eq!(first, second);

    session.reset();
    assert_eq!(session.encode().unwrap(), first.as_slice());
}

#[test]
fn test_clock_time_group_contents() {
    let mut session = session_for(Configuration::default());
    let groups = session.encode().unwrap();
    let ct = &groups[0];
    assert_eq!(ct.slot, GroupSlot::CLOCK_TIME);

    let mjd = (u32::from(ct.info[1] & 0x3) << 15) | (u32::from(ct.info[2]) >> 1);
    assert_eq!(mjd, 60370);
    // midnight UTC, zero offset: sign bit set, magnitude zero
    assert_eq!(ct.info[3], 1 << 5);
}

#[test]
fn test_variant_b_uses_c_prime_offset() {
    let config = ConfigurationBuilder::new()
        .program_identifier(0x54A8)
        .group(GroupSlot::RADIOTEXT_B)
        .build();
    let mut session = session_for(config);
    let groups = session.encode().unwrap();
    let rt = groups
        .iter()
        .find(|g| g.slot.variant() == Variant::B)
        .unwrap();

    let c = rt.blocks[2];
    let expected = (0x54A8u32 << 10) | u32::from(calc_syndrome(0x54A8, 16));
    assert_eq!(c ^ 0x350, expected);
}

#[test]
fn test_xml_to_buffers() {
    let xml = r#"<rds>
  <group type="0A"/>
  <group type="2A"/>
  <group type="8A"/>
  <field name="PI">54A8</field>
  <field name="PS">RUSTY FM</field>
  <field name="RadioText">Hello</field>
  <field name="DP">2</field>
  <field name="location">4660</field>
  <field name="PTY">99</field>
</rds>"#;
    let loaded = parse_config_str(xml).unwrap();
    assert_eq!(loaded.diagnostics.len(), 1);

    let mut session = session_for(loaded.configuration);
    session.encode().unwrap();
    let bytes = session.to_bytes();
    assert_eq!(bytes.len(), (4 + 16 + 1 + 1) * GROUP_BYTES);

    let paging = session
        .groups()
        .iter()
        .find(|g| g.slot == GroupSlot::PAGING)
        .unwrap();
    assert_eq!(paging.info[3], 4660);
    assert_eq!(paging.info[1] & 0xF, 0b1010);
}
