//! Resend cooldown.
//!
//! The countdown never sleeps on its own: whoever drives the UI calls [`Countdown::tick`]
//! once per second with the generation returned by [`Countdown::start`]. Restarting bumps
//! the generation, so ticks from a ticker that was not torn down in time are ignored and
//! at most one countdown is ever live.

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still cooling down; `remaining` seconds left.
    Counting { remaining: u32 },
    /// This tick finished the countdown; the resend action is available again.
    Elapsed,
    /// The tick belongs to an older generation, or nothing is counting. Stop the ticker.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: Option<u32>,
    generation: u64,
}

impl Countdown {
    /// Idle (resend available) countdown of `duration` seconds.
    #[must_use]
    pub const fn new(duration: u32) -> Self {
        Self { duration, remaining: None, generation: 0 }
    }

    /// (Re)starts the cooldown and returns the generation its ticks must carry.
    pub const fn start(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = if self.duration == 0 { None } else { Some(self.duration) };
        self.generation
    }

    /// Advances the countdown by one second.
    pub const fn tick(&mut self, generation: u64) -> Tick {
        if generation != self.generation {
            return Tick::Stale;
        }
        match self.remaining {
            None => Tick::Stale,
            Some(0 | 1) => {
                self.remaining = None;
                Tick::Elapsed
            },
            Some(remaining) => {
                self.remaining = Some(remaining - 1);
                Tick::Counting { remaining: remaining - 1 }
            },
        }
    }

    /// Makes the resend action available right away and invalidates any running ticker.
    pub const fn enable(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = None;
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining.is_none()
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// `Resend in 12s` while cooling down, `Resend OTP` otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        match self.remaining {
            Some(remaining) => format!("Resend in {remaining}s"),
            None => "Resend OTP".to_owned(),
        }
    }
}
