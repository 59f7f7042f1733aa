//! Keypad debounce filter
//!
//! Two-phase filter over successive column-mask reads of one row:
//!
//! 1. Press confirmation: a single-column mask must be read
//!    `jitter_samples` times in a row (the detecting read included). A zero
//!    read before that is contact noise and is dropped. Multi-column masks
//!    skip confirmation and are reported at once.
//! 2. Release tracking: after a press, reads continue until the row reads
//!    zero `jitter_samples` times in a row, or until `release_limit` reads
//!    have been taken, which force-releases a stuck or held key.
//! 3. Lockout: after a forced release the contact is still closed, so no new
//!    press is accepted until the row reads zero `jitter_samples` times in a
//!    row.
//!
//! Exactly one press is reported per contact, and every phase is bounded,
//! so a caller polling the filter can never stall on a bouncing or stuck key.

use heapless::Vec;

use super::decoder::{is_multi_column, COLUMN_MASK};
use crate::config::DebounceConfig;

/// Output of the debounce filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceEvent {
    /// Stable press of the given column mask
    Pressed(u8),
    /// Key released
    Released {
        /// Column mask that was pressed
        mask: u8,
        /// True if the release limit was hit while the key still read active
        forced: bool,
    },
}

/// Filter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Confirming { mask: u8, count: u8 },
    Held { mask: u8, zero_run: u8, reads: u16 },
    Locked { mask: u8, zero_run: u8 },
}

/// Streaming debounce filter
#[derive(Debug, Clone)]
pub struct Debouncer {
    jitter_samples: u8,
    release_limit: u16,
    phase: Phase,
}

impl Debouncer {
    /// Create a new filter
    ///
    /// Zero jitter samples are treated as one.
    pub fn new(config: &DebounceConfig) -> Self {
        Self {
            jitter_samples: config.jitter_samples.max(1),
            release_limit: config.release_limit.max(1),
            phase: Phase::Idle,
        }
    }

    /// Feed one column-mask read
    pub fn feed(&mut self, sample: u8) -> Option<DebounceEvent> {
        let sample = sample & COLUMN_MASK;

        match self.phase {
            Phase::Idle => {
                if sample == 0 {
                    None
                } else {
                    self.detect(sample)
                }
            }
            Phase::Confirming { mask, count } => {
                if sample == 0 {
                    // Contact dropped before confirmation: noise
                    self.phase = Phase::Idle;
                    None
                } else if sample != mask {
                    self.detect(sample)
                } else {
                    self.confirm(mask, count.saturating_add(1))
                }
            }
            Phase::Held {
                mask,
                zero_run,
                reads,
            } => {
                let reads = reads.saturating_add(1);
                let zero_run = if sample == 0 {
                    zero_run.saturating_add(1)
                } else {
                    0
                };

                if zero_run >= self.jitter_samples {
                    self.phase = Phase::Idle;
                    Some(DebounceEvent::Released {
                        mask,
                        forced: false,
                    })
                } else if reads >= self.release_limit {
                    self.phase = Phase::Locked { mask, zero_run };
                    Some(DebounceEvent::Released { mask, forced: true })
                } else {
                    self.phase = Phase::Held {
                        mask,
                        zero_run,
                        reads,
                    };
                    None
                }
            }
            Phase::Locked { mask, zero_run } => {
                let zero_run = if sample == 0 {
                    zero_run.saturating_add(1)
                } else {
                    0
                };

                self.phase = if zero_run >= self.jitter_samples {
                    Phase::Idle
                } else {
                    Phase::Locked { mask, zero_run }
                };
                None
            }
        }
    }

    /// Drop any partial press and return to idle
    ///
    /// This also lifts a lockout; callers scanning a held key should check
    /// [`is_locked`](Self::is_locked) first.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Check if the filter is waiting for a new contact
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Check if a press has been reported and not yet released
    pub fn is_held(&self) -> bool {
        matches!(self.phase, Phase::Held { .. })
    }

    /// Check if a force-released contact has yet to open
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked { .. })
    }

    /// Column mask currently being confirmed, held or locked out
    pub fn active_mask(&self) -> Option<u8> {
        match self.phase {
            Phase::Idle => None,
            Phase::Confirming { mask, .. }
            | Phase::Held { mask, .. }
            | Phase::Locked { mask, .. } => Some(mask),
        }
    }

    fn detect(&mut self, mask: u8) -> Option<DebounceEvent> {
        if is_multi_column(mask) {
            // Chords are already stable, skip confirmation
            self.press(mask)
        } else {
            self.confirm(mask, 1)
        }
    }

    fn confirm(&mut self, mask: u8, count: u8) -> Option<DebounceEvent> {
        if count >= self.jitter_samples {
            self.press(mask)
        } else {
            self.phase = Phase::Confirming { mask, count };
            None
        }
    }

    fn press(&mut self, mask: u8) -> Option<DebounceEvent> {
        self.phase = Phase::Held {
            mask,
            zero_run: 0,
            reads: 0,
        };
        Some(DebounceEvent::Pressed(mask))
    }
}

/// Run a sequence of reads through a fresh filter and return the first
/// confirmed press, if any
pub fn debounce<I>(samples: I, config: &DebounceConfig) -> Option<u8>
where
    I: IntoIterator<Item = u8>,
{
    let mut filter = Debouncer::new(config);
    samples.into_iter().find_map(|sample| match filter.feed(sample) {
        Some(DebounceEvent::Pressed(mask)) => Some(mask),
        _ => None,
    })
}

/// Run a sequence of reads through a fresh filter and collect every
/// confirmed press, up to `N`
pub fn presses<I, const N: usize>(samples: I, config: &DebounceConfig) -> Vec<u8, N>
where
    I: IntoIterator<Item = u8>,
{
    let mut filter = Debouncer::new(config);
    let mut out = Vec::new();
    for sample in samples {
        if let Some(DebounceEvent::Pressed(mask)) = filter.feed(sample) {
            if out.push(mask).is_err() {
                break;
            }
        }
    }
    out
}
