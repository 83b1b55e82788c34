//! Builder for station configurations.

use super::error::{BuilderResult, ConfigError};
use super::{Configuration, PS_LEN, Paging, RADIOTEXT_LEN};
use crate::af::Band;
use crate::charset::fill_rds_string;
use crate::group::GroupSlot;

const AF_FIELDS: [&str; 2] = ["AF1", "AF2"];

/// Builder for creating a [`Configuration`].
///
/// Typed setters validate their input and return a [`BuilderResult`].
/// [`apply_field`](Self::apply_field) and [`activate`](Self::activate)
/// accept the textual vocabulary used by configuration documents.
///
/// # Example
///
/// ```rust
/// use rds::config::ConfigurationBuilder;
/// use rds::group::GroupSlot;
///
/// let config = ConfigurationBuilder::new()
///     .program_identifier(0x54A8)
///     .program_service_name("RUSTY FM")?
///     .group(GroupSlot::BASIC_TUNING_A)
///     .build();
/// assert_eq!(&config.program_service_name, b"RUSTY FM");
/// # Ok::<(), rds::config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Create a builder starting from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the programme identification code.
    pub fn program_identifier(mut self, pi: u16) -> Self {
        self.config.program_identifier = pi;
        self
    }

    /// Set the traffic programme flag.
    pub fn traffic_program(mut self, tp: bool) -> Self {
        self.config.traffic_program = tp;
        self
    }

    /// Set the traffic announcement flag.
    pub fn traffic_announcement(mut self, ta: bool) -> Self {
        self.config.traffic_announcement = ta;
        self
    }

    /// Set the music/speech switch (true for music).
    pub fn music_speech(mut self, music: bool) -> Self {
        self.config.music_speech = music;
        self
    }

    /// Flag the programme as an artificial head recording.
    pub fn artificial_head(mut self, ah: bool) -> Self {
        self.config.artificial_head = ah;
        self
    }

    /// Flag the programme audio as compressed.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.config.compressed = compressed;
        self
    }

    /// Mark the programme type as static.
    pub fn static_pty(mut self, static_pty: bool) -> Self {
        self.config.static_pty = static_pty;
        self
    }

    /// Set the programme type (0–31).
    pub fn program_type(mut self, pty: u8) -> BuilderResult<Self> {
        self.set_program_type(pty)?;
        Ok(self)
    }

    /// Set alternate frequency slot 0 or 1.
    pub fn alternate_frequency(mut self, slot: usize, freq: f64) -> BuilderResult<Self> {
        self.set_alternate_frequency(slot, freq)?;
        Ok(self)
    }

    /// Set the programme service name; exactly eight characters.
    pub fn program_service_name(mut self, ps: &str) -> BuilderResult<Self> {
        self.set_program_service_name(ps)?;
        Ok(self)
    }

    /// Set the RadioText; up to 64 characters, padded with spaces.
    pub fn radiotext(mut self, text: &str) -> BuilderResult<Self> {
        self.set_radiotext(text)?;
        Ok(self)
    }

    /// Set the radio paging fields.
    pub fn paging(mut self, paging: Paging) -> BuilderResult<Self> {
        check_range("DP", u32::from(paging.data_delay), 0x7)?;
        check_range("extent", u32::from(paging.extent), 0x7)?;
        check_range("event", u32::from(paging.event), 0x7FF)?;
        self.config.paging = paging;
        Ok(self)
    }

    /// Activate a group slot.
    pub fn group(mut self, slot: GroupSlot) -> Self {
        self.config.groups.insert(slot);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Configuration {
        self.config
    }

    /// Apply one textual field, as found in configuration documents.
    ///
    /// On error the configuration is left unchanged.
    pub fn apply_field(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let cfg = &mut self.config;
        match name {
            "PI" => {
                let len = value.chars().count();
                if len != 4 {
                    return Err(ConfigError::InvalidLength {
                        field: "PI",
                        expected: "4",
                        actual: len,
                    });
                }
                if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(invalid("PI", value));
                }
                cfg.program_identifier =
                    u16::from_str_radix(value, 16).map_err(|_| invalid("PI", value))?;
            }
            "TP" => cfg.traffic_program = parse_flag("TP", value)?,
            "TA" => cfg.traffic_announcement = parse_flag("TA", value)?,
            "MuSp" => cfg.music_speech = parse_flag("MuSp", value)?,
            "AH" => cfg.artificial_head = parse_flag("AH", value)?,
            "compressed" => cfg.compressed = parse_flag("compressed", value)?,
            "staticPTY" => cfg.static_pty = parse_flag("staticPTY", value)?,
            "PTY" => {
                let len = value.chars().count();
                if !(1..=2).contains(&len) {
                    return Err(ConfigError::InvalidLength {
                        field: "PTY",
                        expected: "1 or 2",
                        actual: len,
                    });
                }
                let pty = parse_bounded("PTY", value, 31)?;
                self.set_program_type(pty as u8)?;
            }
            "AF1" | "AF2" => {
                let slot = usize::from(name == "AF2");
                let freq = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid(AF_FIELDS[slot], value))?;
                self.set_alternate_frequency(slot, freq)?;
            }
            "PS" => self.set_program_service_name(value)?,
            "RadioText" => self.set_radiotext(value)?,
            "DP" => cfg.paging.data_delay = parse_bounded("DP", value, 0x7)? as u8,
            "extent" => cfg.paging.extent = parse_bounded("extent", value, 0x7)? as u8,
            "event" => cfg.paging.event = parse_bounded("event", value, 0x7FF)? as u16,
            "location" => cfg.paging.location = parse_bounded("location", value, 0xFFFF)? as u16,
            _ => return Err(ConfigError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    /// Activate a group from a token such as `"0A"` or `"8A"`.
    pub fn activate(&mut self, token: &str) -> Result<(), ConfigError> {
        let slot = token.parse::<GroupSlot>()?;
        self.config.groups.insert(slot);
        Ok(())
    }

    fn set_program_type(&mut self, pty: u8) -> Result<(), ConfigError> {
        check_range("PTY", u32::from(pty), 31)?;
        self.config.program_type = pty;
        Ok(())
    }

    fn set_alternate_frequency(&mut self, slot: usize, freq: f64) -> Result<(), ConfigError> {
        let field = *AF_FIELDS
            .get(slot)
            .ok_or_else(|| invalid("AF slot", &slot.to_string()))?;
        if Band::of(freq).is_none() {
            return Err(ConfigError::FrequencyOutOfRange { field, value: freq });
        }
        self.config.alternate_frequencies[slot] = Some(freq);
        Ok(())
    }

    fn set_program_service_name(&mut self, ps: &str) -> Result<(), ConfigError> {
        let len = ps.chars().count();
        if len != PS_LEN {
            return Err(ConfigError::InvalidLength {
                field: "PS",
                expected: "8",
                actual: len,
            });
        }
        fill_rds_string(&mut self.config.program_service_name, ps);
        Ok(())
    }

    fn set_radiotext(&mut self, text: &str) -> Result<(), ConfigError> {
        let len = text.chars().count();
        if len > RADIOTEXT_LEN {
            return Err(ConfigError::InvalidLength {
                field: "RadioText",
                expected: "at most 64",
                actual: len,
            });
        }
        fill_rds_string(&mut self.config.radiotext, text);
        Ok(())
    }
}

fn invalid(field: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(field, value)),
    }
}

fn parse_bounded(field: &'static str, value: &str, max: u32) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, value));
    }
    let number = trimmed.parse::<u32>().map_err(|_| invalid(field, value))?;
    check_range(field, number, max)?;
    Ok(number)
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if value > max {
        return Err(invalid(field, &value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = ConfigurationBuilder::new()
            .program_identifier(0xC0DE)
            .traffic_program(true)
            .music_speech(true)
            .program_type(31)
            .unwrap()
            .alternate_frequency(1, 1602.0)
            .unwrap()
            .radiotext("Hello")
            .unwrap()
            .group(GroupSlot::RADIOTEXT_A)
            .build();

        assert_eq!(config.program_identifier, 0xC0DE);
        assert!(config.traffic_program);
        assert_eq!(config.program_type, 31);
        assert_eq!(config.alternate_frequencies, [None, Some(1602.0)]);
        assert_eq!(&config.radiotext[..7], b"Hello  ");
        assert!(config.groups.contains(GroupSlot::RADIOTEXT_A));
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(ConfigurationBuilder::new().program_type(32).is_err());
        assert!(ConfigurationBuilder::new().program_service_name("SHORT").is_err());
        assert!(ConfigurationBuilder::new().alternate_frequency(0, 120.0).is_err());
        assert!(ConfigurationBuilder::new().alternate_frequency(2, 98.0).is_err());
        assert!(ConfigurationBuilder::new().radiotext(&"x".repeat(65)).is_err());
        let paging = Paging {
            data_delay: 8,
            ..Paging::default()
        };
        assert!(ConfigurationBuilder::new().paging(paging).is_err());
    }

    #[test]
    fn test_apply_field_accepts_vocabulary() {
        let mut builder = ConfigurationBuilder::new();
        for (name, value) in [
            ("PI", "54a8"),
            ("TP", "true"),
            ("TA", "true"),
            ("MuSp", "false"),
            ("PTY", "7"),
            ("AF1", "98.1"),
            ("AF2", "531"),
            ("PS", "RUSTY FM"),
            ("RadioText", ""),
            ("DP", "3"),
            ("extent", "2"),
            ("event", "2047"),
            ("location", "65535"),
        ] {
            builder.apply_field(name, value).unwrap();
        }
        let config = builder.build();
        assert_eq!(config.program_identifier, 0x54A8);
        assert!(config.traffic_announcement);
        assert_eq!(config.program_type, 7);
        assert_eq!(config.alternate_frequencies, [Some(98.1), Some(531.0)]);
        assert_eq!(config.radiotext, [b' '; RADIOTEXT_LEN]);
        assert_eq!(
            config.paging,
            Paging {
                data_delay: 3,
                extent: 2,
                event: 2047,
                location: 65535,
            }
        );
    }

    #[test]
    fn test_apply_field_keeps_previous_value_on_error() {
        let mut builder = ConfigurationBuilder::new();
        builder.apply_field("PI", "1234").unwrap();

        assert_eq!(
            builder.apply_field("PI", "12345"),
            Err(ConfigError::InvalidLength {
                field: "PI",
                expected: "4",
                actual: 5
            })
        );
        assert!(matches!(
            builder.apply_field("PI", "+123"),
            Err(ConfigError::InvalidValue { field: "PI", .. })
        ));
        assert!(builder.apply_field("TP", "yes").is_err());
        assert!(builder.apply_field("PTY", "123").is_err());
        assert!(builder.apply_field("PTY", "40").is_err());
        assert!(matches!(
            builder.apply_field("AF1", "120"),
            Err(ConfigError::FrequencyOutOfRange { field: "AF1", .. })
        ));
        assert!(builder.apply_field("AF2", "fast").is_err());
        assert!(builder.apply_field("PS", "TOO LONG!").is_err());
        assert!(builder.apply_field("event", "2048").is_err());
        assert_eq!(
            builder.apply_field("Colour", "red"),
            Err(ConfigError::UnknownField("Colour".to_string()))
        );

        let config = builder.build();
        assert_eq!(config.program_identifier, 0x1234);
        assert_eq!(config, {
            let mut expected = Configuration::default();
            expected.program_identifier = 0x1234;
            expected
        });
    }

    #[test]
    fn test_activate() {
        let mut builder = ConfigurationBuilder::new();
        builder.activate("8A").unwrap();
        assert!(builder.activate("16A").is_err());
        assert!(builder.build().groups.contains(GroupSlot::PAGING));
    }
}
