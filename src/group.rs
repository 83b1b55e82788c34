//! Group types and the per-type information word builders.
//!
//! A group is identified by its type (0–15) and variant (A or B). The
//! builder turns the station configuration into the four 16-bit
//! information words of one group instance; types 0 and 2 are spread over
//! several instances and rotate through their segments with [`Counters`].

use crate::af;
use crate::config::{ConfigError, Configuration};
use crate::encoding::{EncodingError, EncodingResult};
use crate::time::ClockTime;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// The four information words of a group, in block order A, B, C, D.
pub type InfoWords = [u16; 4];

/// Group variant; selects the offset word used for block 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Variant {
    /// Version A: block C carries payload.
    A,
    /// Version B: block C repeats the programme identifier.
    B,
}

impl Variant {
    #[inline]
    fn is_b(self) -> bool {
        self == Variant::B
    }
}

/// One group type/variant combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupSlot {
    group_type: u8,
    variant: Variant,
}

impl GroupSlot {
    /// Basic tuning and switching information, version A.
    pub const BASIC_TUNING_A: GroupSlot = GroupSlot::raw(0, Variant::A);
    /// Basic tuning and switching information, version B.
    pub const BASIC_TUNING_B: GroupSlot = GroupSlot::raw(0, Variant::B);
    /// RadioText, version A.
    pub const RADIOTEXT_A: GroupSlot = GroupSlot::raw(2, Variant::A);
    /// RadioText, version B.
    pub const RADIOTEXT_B: GroupSlot = GroupSlot::raw(2, Variant::B);
    /// Clock time and date.
    pub const CLOCK_TIME: GroupSlot = GroupSlot::raw(4, Variant::A);
    /// Radio paging.
    pub const PAGING: GroupSlot = GroupSlot::raw(8, Variant::A);

    const fn raw(group_type: u8, variant: Variant) -> Self {
        Self {
            group_type,
            variant,
        }
    }

    /// Creates a slot, returning `None` for types above 15.
    pub fn new(group_type: u8, variant: Variant) -> Option<Self> {
        (group_type <= 15).then_some(Self::raw(group_type, variant))
    }

    /// Group type, 0–15.
    pub fn group_type(&self) -> u8 {
        self.group_type
    }

    /// Group variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Position of the slot in activation order: all A versions by
    /// ascending type, then all B versions.
    pub fn index(&self) -> usize {
        usize::from(self.group_type) + if self.variant.is_b() { 16 } else { 0 }
    }

    fn from_index(index: usize) -> Self {
        let variant = if index < 16 { Variant::A } else { Variant::B };
        Self::raw((index % 16) as u8, variant)
    }

    /// Number of physical groups needed to carry one full cycle of this slot.
    ///
    /// The programme service name takes four groups of two characters and
    /// RadioText sixteen segments; every other type fits in one group.
    pub fn instance_count(&self) -> usize {
        match self.group_type {
            0 => 4,
            2 => 16,
            _ => 1,
        }
    }

    /// Whether a builder exists for this type/variant combination.
    pub fn is_supported(&self) -> bool {
        matches!(
            (self.group_type, self.variant),
            (0, _) | (2, _) | (4, Variant::A) | (8, Variant::A)
        )
    }
}

impl fmt::Display for GroupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.group_type, self.variant)
    }
}

impl FromStr for GroupSlot {
    type Err = ConfigError;

    /// Parses tokens such as `"0A"`, `"2B"` or `"15A"`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::UnknownGroup(token.to_string());

        let variant = match token.chars().last() {
            Some('A') => Variant::A,
            Some('B') => Variant::B,
            _ => return Err(invalid()),
        };
        let digits = &token[..token.len() - 1];
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let group_type = digits.parse::<u8>().map_err(|_| invalid())?;
        GroupSlot::new(group_type, variant).ok_or_else(invalid)
    }
}

#[cfg(feature = "serde")]
impl Serialize for GroupSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Set of active group slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveGroups(u32);

impl ActiveGroups {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Marks a slot as active.
    pub fn insert(&mut self, slot: GroupSlot) {
        self.0 |= 1 << slot.index();
    }

    /// Returns true if the slot is active.
    pub fn contains(&self, slot: GroupSlot) -> bool {
        self.0 & (1 << slot.index()) != 0
    }

    /// Number of active slots.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no slot is active.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the active slots in activation order.
    pub fn iter(&self) -> impl Iterator<Item = GroupSlot> + '_ {
        (0..32)
            .filter(|i| self.0 & (1 << i) != 0)
            .map(GroupSlot::from_index)
    }

    /// Expands the set into one slot per physical group instance.
    ///
    /// The clock-time group is always included.
    pub fn expand(&self) -> Vec<GroupSlot> {
        let mut all = *self;
        all.insert(GroupSlot::CLOCK_TIME);
        all.iter()
            .flat_map(|slot| std::iter::repeat_n(slot, slot.instance_count()))
            .collect()
    }
}

impl FromIterator<GroupSlot> for ActiveGroups {
    fn from_iter<I: IntoIterator<Item = GroupSlot>>(iter: I) -> Self {
        let mut set = ActiveGroups::new();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}

#[cfg(feature = "serde")]
impl Serialize for ActiveGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

/// Rotating segment counters for multi-instance group types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    group0: u8,
    group2: u8,
}

impl Counters {
    /// Next programme service name segment, 0–3.
    pub fn group0(&self) -> u8 {
        self.group0
    }

    /// Next RadioText segment, 0–15.
    pub fn group2(&self) -> u8 {
        self.group2
    }

    /// Rewinds both counters to the first segment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Builds information words for one configuration and clock reading.
pub struct GroupBuilder<'a> {
    config: &'a Configuration,
    clock: ClockTime,
}

impl<'a> GroupBuilder<'a> {
    /// Creates a builder over `config` using `clock` for the 4A group.
    pub fn new(config: &'a Configuration, clock: ClockTime) -> Self {
        Self { config, clock }
    }

    /// Produces the information words for the next instance of `slot`.
    ///
    /// Advances the matching counter for types 0 and 2.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnsupportedGroup`] for combinations without
    /// a builder; counters are left untouched in that case.
    pub fn build(&self, slot: GroupSlot, counters: &mut Counters) -> EncodingResult<InfoWords> {
        if !slot.is_supported() {
            return Err(EncodingError::UnsupportedGroup(slot));
        }

        let cfg = self.config;
        let mut words: InfoWords = [cfg.program_identifier, self.header(slot), 0, 0];

        match slot.group_type {
            0 => self.basic_tuning(slot.variant, &mut words, counters),
            2 => self.radiotext(slot.variant, &mut words, counters),
            4 => self.clock_time(&mut words),
            8 => self.paging(&mut words),
            _ => unreachable!("filtered by is_supported"),
        }

        tracing::trace!(
            "{slot}: {:04X} {:04X} {:04X} {:04X}",
            words[0],
            words[1],
            words[2],
            words[3]
        );
        Ok(words)
    }

    fn header(&self, slot: GroupSlot) -> u16 {
        let cfg = self.config;
        (u16::from(slot.group_type & 0xF) << 12)
            | (u16::from(slot.variant.is_b()) << 11)
            | (u16::from(cfg.traffic_program) << 10)
            | (u16::from(cfg.program_type & 0x1F) << 5)
    }

    fn basic_tuning(&self, variant: Variant, words: &mut InfoWords, counters: &mut Counters) {
        let cfg = self.config;
        let segment = counters.group0 & 0x3;

        words[1] |= (u16::from(cfg.traffic_announcement) << 4) | (u16::from(cfg.music_speech) << 3);
        // Decoder identification: one flag per segment address.
        match segment {
            1 if cfg.compressed => words[1] |= 1 << 2,
            2 if cfg.artificial_head => words[1] |= 1 << 2,
            3 => words[1] |= 0x5,
            _ => {}
        }
        words[1] |= u16::from(segment);

        words[2] = match variant {
            Variant::A => af::pack_pair(
                cfg.alternate_frequencies[0],
                cfg.alternate_frequencies[1],
            ),
            Variant::B => cfg.program_identifier,
        };

        let at = 2 * usize::from(segment);
        words[3] = char_pair(&cfg.program_service_name, at);

        counters.group0 = (counters.group0 + 1) % 4;
    }

    fn radiotext(&self, variant: Variant, words: &mut InfoWords, counters: &mut Counters) {
        let cfg = self.config;
        let segment = counters.group2 & 0xF;

        words[1] |= (u16::from(variant.is_b()) << 4) | u16::from(segment);
        match variant {
            Variant::A => {
                let at = 4 * usize::from(segment);
                words[2] = char_pair(&cfg.radiotext, at);
                words[3] = char_pair(&cfg.radiotext, at + 2);
            }
            Variant::B => {
                words[2] = cfg.program_identifier;
                words[3] = char_pair(&cfg.radiotext, 2 * usize::from(segment));
            }
        }

        counters.group2 = (counters.group2 + 1) % 16;
    }

    fn clock_time(&self, words: &mut InfoWords) {
        let ClockTime {
            mjd,
            hour,
            minute,
            offset_negative,
            offset_half_hours,
        } = self.clock;
        let (hour, minute) = (u16::from(hour), u16::from(minute));

        words[1] |= ((mjd >> 15) & 0x3) as u16;
        words[2] = ((((mjd >> 7) & 0xFF) as u16) << 8)
            | (((mjd & 0x7F) as u16) << 1)
            | ((hour >> 4) & 0x1);
        words[3] = ((hour & 0xF) << 12)
            | (((minute >> 2) & 0xF) << 8)
            | ((minute & 0x3) << 6)
            | (u16::from(offset_negative) << 5)
            | (u16::from(offset_half_hours) & 0x1F);
    }

    fn paging(&self, words: &mut InfoWords) {
        let paging = &self.config.paging;
        words[1] |= (1 << 3) | (u16::from(paging.data_delay) & 0x7);
        words[2] = (1 << 15) | ((u16::from(paging.extent) & 0x7) << 11) | (paging.event & 0x7FF);
        words[3] = paging.location;
    }
}

#[inline]
fn char_pair(text: &[u8], at: usize) -> u16 {
    (u16::from(text[at]) << 8) | u16::from(text[at + 1])
}
