//! Encoding sessions.
//!
//! A session owns a configuration, the rotating segment counters and the
//! groups produced by the last encode. One call to
//! [`EncodingSession::encode`] produces one complete cycle: every instance
//! of every active group, plus the clock-time group, in activation order.

use crate::block::{EncodedGroup, GroupBuffer};
use crate::config::Configuration;
use crate::encoding::{EncodingError, EncodingResult};
use crate::group::{Counters, GroupBuilder, GroupSlot};
use crate::time::{Clock, SystemClock};
use tracing::{debug, warn};

/// Lifecycle state of an [`EncodingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No configuration yet.
    Idle,
    /// Configured, nothing encoded since the last reset.
    Configured,
    /// Output of the last encode is available.
    Encoded,
}

/// Orchestrates group building, assembly and serialization.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rds::config::ConfigurationBuilder;
/// use rds::group::GroupSlot;
/// use rds::session::EncodingSession;
/// use rds::time::FixedClock;
///
/// let config = ConfigurationBuilder::new()
///     .program_identifier(0x54A8)
///     .program_service_name("RUSTY FM")?
///     .group(GroupSlot::BASIC_TUNING_A)
///     .build();
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(), 1.0);
/// let mut session = EncodingSession::with_clock(clock);
/// session.configure(config);
///
/// let groups = session.encode()?;
/// assert_eq!(groups.len(), 5); // four 0A segments and the clock time
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct EncodingSession<C: Clock = SystemClock> {
    clock: C,
    config: Option<Configuration>,
    counters: Counters,
    groups: Vec<EncodedGroup>,
    skipped: Vec<GroupSlot>,
    state: SessionState,
}

impl EncodingSession<SystemClock> {
    /// Create a session that stamps the clock-time group with the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for EncodingSession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> EncodingSession<C> {
    /// Create a session reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: None,
            counters: Counters::default(),
            groups: Vec::new(),
            skipped: Vec::new(),
            state: SessionState::Idle,
        }
    }

    /// Install a configuration and discard previous output.
    pub fn configure(&mut self, config: Configuration) {
        self.config = Some(config);
        self.reset();
    }

    /// Rewind the counters and drop the output of the last encode.
    ///
    /// The configuration is kept, so the session returns to
    /// [`SessionState::Configured`] when one is installed and to
    /// [`SessionState::Idle`] otherwise.
    pub fn reset(&mut self) {
        self.counters.reset();
        self.groups.clear();
        self.skipped.clear();
        self.state = if self.config.is_some() {
            SessionState::Configured
        } else {
            SessionState::Idle
        };
    }

    /// Drop the configuration as well, returning to [`SessionState::Idle`].
    pub fn clear(&mut self) {
        self.config = None;
        self.reset();
    }

    /// Encode one full cycle of the active groups.
    ///
    /// Replaces the output of any previous encode. Unsupported group slots
    /// are logged, recorded in [`skipped`](Self::skipped) and left out.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::NotConfigured`] when no configuration has
    /// been installed.
    pub fn encode(&mut self) -> EncodingResult<&[EncodedGroup]> {
        let config = self.config.as_ref().ok_or(EncodingError::NotConfigured)?;
        let reading = self.clock.now();
        let builder = GroupBuilder::new(config, reading.clock_time());

        self.groups.clear();
        self.skipped.clear();

        for slot in config.groups.expand() {
            match builder.build(slot, &mut self.counters) {
                Ok(info) => self.groups.push(EncodedGroup::new(slot, info)),
                Err(err) => {
                    warn!("skipping group: {err}");
                    self.skipped.push(slot);
                }
            }
        }

        debug!(
            "Encoded {} group(s) at {} ({} slot(s) skipped)",
            self.groups.len(),
            reading.utc,
            self.skipped.len()
        );
        self.state = SessionState::Encoded;
        Ok(&self.groups)
    }

    /// Groups produced by the last encode.
    pub fn groups(&self) -> &[EncodedGroup] {
        &self.groups
    }

    /// The serialized buffers of the last encode, in order.
    pub fn buffers(&self) -> impl Iterator<Item = &GroupBuffer> + '_ {
        self.groups.iter().map(EncodedGroup::bytes)
    }

    /// The last encode's buffers concatenated, as written to a modulator.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffers().flatten().copied().collect()
    }

    /// Slots that were active but could not be encoded.
    pub fn skipped(&self) -> &[GroupSlot] {
        &self.skipped
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current counter values.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// The installed configuration, if any.
    pub fn configuration(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }
}
