//! # Pacing Profiles
//!
//! Two speed profiles over one pacing table. `Normal` is the teletype feel;
//! `Accelerated` keeps the same structural rendering but with bigger chunks,
//! near-zero delays and scaled-down pauses. Code panels pace the same under
//! both profiles.

use std::time::Duration;

use crate::core::config::PacingConfig;
use crate::core::menu::PlaybackMode;

/// Characters that earn a dramatic pause when they end a chunk.
pub const TERMINAL_PUNCTUATION: &[char] = &[',', '.', ':', '!', '?'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Normal,
    Accelerated,
}

impl Profile {
    pub fn from_mode(mode: PlaybackMode) -> Self {
        match mode {
            PlaybackMode::Normal => Profile::Normal,
            PlaybackMode::Fast => Profile::Accelerated,
        }
    }
}

/// A profile bound to its resolved pacing numbers.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub profile: Profile,
    config: PacingConfig,
}

impl Pacing {
    pub fn new(profile: Profile, config: PacingConfig) -> Self {
        Self { profile, config }
    }

    pub fn chunk_size(&self) -> usize {
        match self.profile {
            Profile::Normal => self.config.chunk_size,
            Profile::Accelerated => self.config.fast_chunk_size,
        }
        .max(1)
    }

    /// Base delay per emitted chunk.
    pub fn step_delay(&self) -> Duration {
        let ms = match self.profile {
            Profile::Normal => self.config.char_delay_ms,
            Profile::Accelerated => self.config.fast_char_delay_ms,
        };
        Duration::from_millis(ms)
    }

    /// Delay for a chunk containing terminal punctuation. Markup lines use
    /// a slightly larger multiplier than plain text.
    pub fn punct_delay(&self, in_markup: bool) -> Duration {
        let multiplier = if in_markup {
            self.config.markup_punct_multiplier
        } else {
            self.config.punct_multiplier
        };
        self.step_delay() * multiplier
    }

    /// Settle after a full line. Accelerated playback only yields.
    pub fn line_settle(&self) -> Duration {
        match self.profile {
            Profile::Normal => Duration::from_millis(self.config.line_settle_ms),
            Profile::Accelerated => Duration::ZERO,
        }
    }

    /// A `[[PAUSE:n]]` duration under this profile: honored in full
    /// normally, divided down (floor) when accelerated.
    pub fn scaled_pause(&self, millis: u64) -> Duration {
        let ms = match self.profile {
            Profile::Normal => millis,
            Profile::Accelerated => millis / u64::from(self.config.pause_divisor.max(1)),
        };
        Duration::from_millis(ms)
    }

    /// Reveal settle after a successful image load.
    pub fn image_settle(&self) -> Duration {
        let ms = match self.profile {
            Profile::Normal => self.config.image_settle_ms,
            Profile::Accelerated => self.config.fast_image_settle_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.config.image_timeout_secs)
    }

    // Code panels ignore the profile on purpose.

    pub fn code_char_delay(&self) -> Duration {
        Duration::from_millis(self.config.code_char_delay_ms)
    }

    pub fn code_line_delay(&self) -> Duration {
        Duration::from_millis(self.config.code_line_delay_ms)
    }

    pub fn code_settle(&self) -> Duration {
        Duration::from_millis(self.config.code_settle_ms)
    }
}
