//! Replay log recording and playback (spec §6, "Persisted state layout").
//!
//! A [`ReplayLog`] is a flat, ordered recording of every draw consumed by a
//! simulation. Recording a log during a seed-`S` simulation and replaying it
//! through [`ReplaySource`] reproduces the same game, play by play. The log
//! intentionally does not retain draw *names* — only the three typed
//! streams the teacher's wire format would serialize (doubles, ints,
//! int-ranges) — draw names exist purely for replay-exhaustion diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::rng::RandomSource;

/// A single recorded integer-range draw, `[min, max)` plus the value drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRangeDraw {
    pub min: i64,
    pub max: i64,
    pub value: i64,
}

/// Recorded random draw stream sufficient to reproduce a simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub seed: i64,
    pub doubles: Vec<f64>,
    pub ints: Vec<i64>,
    pub int_ranges: Vec<IntRangeDraw>,
}

impl ReplayLog {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(|e| EngineError::InvariantViolation {
            detail: format!("failed to serialize replay log: {e}"),
        })
    }

    /// Deserialize from a JSON string.
    pub fn from_json(data: &str) -> Result<ReplayLog, EngineError> {
        serde_json::from_str(data).map_err(|e| EngineError::InvariantViolation {
            detail: format!("failed to deserialize replay log: {e}"),
        })
    }
}

/// Wraps an inner [`RandomSource`] and transparently records every draw,
/// building up a [`ReplayLog`] that can be persisted after the simulation
/// completes.
pub struct RecordingSource<R: RandomSource> {
    inner: R,
    seed: i64,
    log: ReplayLog,
}

impl<R: RandomSource> RecordingSource<R> {
    pub fn new(inner: R, seed: i64) -> RecordingSource<R> {
        RecordingSource {
            inner,
            seed,
            log: ReplayLog::default(),
        }
    }

    /// Consume the wrapper, returning the completed log.
    pub fn into_log(mut self) -> ReplayLog {
        self.log.seed = self.seed;
        self.log
    }
}

impl<R: RandomSource> RandomSource for RecordingSource<R> {
    fn uniform(&mut self, name: &str) -> Result<f64, EngineError> {
        let v = self.inner.uniform(name)?;
        self.log.doubles.push(v);
        Ok(v)
    }

    fn integer(&mut self, name: &str, lo: i64, hi: i64) -> Result<i64, EngineError> {
        let v = self.inner.integer(name, lo, hi)?;
        self.log.int_ranges.push(IntRangeDraw {
            min: lo,
            max: hi,
            value: v,
        });
        Ok(v)
    }

    fn bytes(&mut self, name: &str, buf: &mut [u8]) -> Result<(), EngineError> {
        self.inner.bytes(name, buf)?;
        for b in buf.iter() {
            self.log.ints.push(*b as i64);
        }
        Ok(())
    }
}

/// Replays a previously recorded [`ReplayLog`], failing loudly (a fatal
/// [`EngineError::ReplayExhausted`]) if asked for more values than were
/// recorded.
pub struct ReplaySource {
    log: ReplayLog,
    double_cursor: usize,
    int_range_cursor: usize,
    byte_cursor: usize,
}

impl ReplaySource {
    pub fn new(log: ReplayLog) -> ReplaySource {
        ReplaySource {
            log,
            double_cursor: 0,
            int_range_cursor: 0,
            byte_cursor: 0,
        }
    }

    /// The seed that produced the replayed log.
    pub fn seed(&self) -> i64 {
        self.log.seed
    }
}

impl RandomSource for ReplaySource {
    fn uniform(&mut self, name: &str) -> Result<f64, EngineError> {
        match self.log.doubles.get(self.double_cursor) {
            Some(v) => {
                self.double_cursor += 1;
                Ok(*v)
            }
            None => Err(EngineError::ReplayExhausted {
                name: name.to_string(),
                requested: self.double_cursor + 1,
                available: self.log.doubles.len(),
            }),
        }
    }

    fn integer(&mut self, name: &str, lo: i64, hi: i64) -> Result<i64, EngineError> {
        match self.log.int_ranges.get(self.int_range_cursor) {
            Some(draw) => {
                self.int_range_cursor += 1;
                if draw.min != lo || draw.max != hi {
                    return Err(EngineError::InvariantViolation {
                        detail: format!(
                            "replay drift at `{}`: recorded range [{}, {}) but requested [{}, {})",
                            name, draw.min, draw.max, lo, hi
                        ),
                    });
                }
                Ok(draw.value)
            }
            None => Err(EngineError::ReplayExhausted {
                name: name.to_string(),
                requested: self.int_range_cursor + 1,
                available: self.log.int_ranges.len(),
            }),
        }
    }

    fn bytes(&mut self, name: &str, buf: &mut [u8]) -> Result<(), EngineError> {
        if self.byte_cursor + buf.len() > self.log.ints.len() {
            return Err(EngineError::ReplayExhausted {
                name: name.to_string(),
                requested: self.byte_cursor + buf.len(),
                available: self.log.ints.len(),
            });
        }
        for slot in buf.iter_mut() {
            *slot = self.log.ints[self.byte_cursor] as u8;
            self.byte_cursor += 1;
        }
        Ok(())
    }
}
