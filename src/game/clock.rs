//! Game clock: halves, quarters, and the countdown within each (spec §3
//! "Time Structure": two Halves, each two Quarters of 900 s).

/// One of the two halves of regulation.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Half {
    First,
    Second,
}

/// One of the four quarters of regulation. Overtime periods are tracked
/// separately by [`crate::game::overtime::OvertimeState`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Quarter {
    First,
    Second,
    Third,
    Fourth,
}

impl Quarter {
    pub fn half(self) -> Half {
        match self {
            Quarter::First | Quarter::Second => Half::First,
            Quarter::Third | Quarter::Fourth => Half::Second,
        }
    }

    /// The quarter after this one, or `None` if this is the last quarter of
    /// regulation.
    pub fn next(self) -> Option<Quarter> {
        match self {
            Quarter::First => Some(Quarter::Second),
            Quarter::Second => Some(Quarter::Third),
            Quarter::Third => Some(Quarter::Fourth),
            Quarter::Fourth => None,
        }
    }

    /// `true` for the second quarter of either half, where the two-minute
    /// warning and half-expire checks apply.
    pub fn is_half_ending(self) -> bool {
        matches!(self, Quarter::Second | Quarter::Fourth)
    }
}

/// Seconds in a regulation quarter.
pub const QUARTER_SECONDS: u32 = 900;

/// The game clock: current quarter plus seconds remaining in it. Seconds
/// remaining is monotonically non-increasing within a quarter (spec §3
/// invariant 3).
#[derive(Clone, Copy, Debug)]
pub struct TimeStructure {
    quarter: Quarter,
    seconds_remaining: u32,
}

impl TimeStructure {
    pub fn new() -> TimeStructure {
        TimeStructure {
            quarter: Quarter::First,
            seconds_remaining: QUARTER_SECONDS,
        }
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    pub fn half(&self) -> Half {
        self.quarter.half()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Subtract elapsed play time, never going below zero.
    pub fn elapse(&mut self, seconds: u32) {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(seconds);
    }

    pub fn quarter_expired(&self) -> bool {
        self.seconds_remaining == 0
    }

    /// Move to the next quarter, resetting the countdown. Returns `false`
    /// (and leaves state untouched) if already in the fourth quarter —
    /// callers must route end-of-regulation through the event checks
    /// instead.
    pub fn advance_quarter(&mut self) -> bool {
        match self.quarter.next() {
            Some(next) => {
                self.quarter = next;
                self.seconds_remaining = QUARTER_SECONDS;
                true
            }
            None => false,
        }
    }
}

impl Default for TimeStructure {
    fn default() -> Self {
        TimeStructure::new()
    }
}
