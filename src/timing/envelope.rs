//! Four-breakpoint envelope.
//!
//! ```text
//!  value
//!   2 |            /\
//!   1 |      _____/  \_____
//!     |     /              \
//!   0 |____/                \____
//!       startIn finishIn  startOut finishOut
//! ```
//!
//! The ramps run over `[0, 1]`; during the hold the value rises above 1
//! toward the midpoint as an emphasis pulse.

use serde::{Deserialize, Serialize};

/// Envelope value at `time`
///
/// Ramps are clamped to `[0, 1]`; a zero-length ramp switches instantly.
pub fn relative_time(start_in: f64, finish_in: f64, start_out: f64, finish_out: f64, time: f64) -> f64 {
    if time < finish_in {
        ramp(start_in, finish_in, time)
    } else if time > start_out {
        1.0 - ramp(start_out, finish_out, time)
    } else {
        let hold = start_out - finish_in;
        if hold <= 0.0 {
            return 1.0;
        }
        1.0 + 2.0 * (time - finish_in).min(start_out - time) / hold
    }
}

fn ramp(start: f64, finish: f64, time: f64) -> f64 {
    let span = finish - start;
    if span <= 0.0 {
        return if time < start { 0.0 } else { 1.0 };
    }
    ((time - start) / span).clamp(0.0, 1.0)
}

/// Lifecycle state of a timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopePhase {
    Appearing,
    Holding,
    Disappearing,
    /// Past `finish_out`; the owner drops the effect
    Terminal,
}

/// Breakpoints of one appear/hold/disappear cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub start_in: f64,
    pub finish_in: f64,
    pub start_out: f64,
    pub finish_out: f64,
}

impl Envelope {
    /// Build an envelope with non-decreasing breakpoints
    ///
    /// A breakpoint earlier than its predecessor is moved up to it.
    pub fn new(start_in: f64, finish_in: f64, start_out: f64, finish_out: f64) -> Self {
        let finish_in_c = finish_in.max(start_in);
        let start_out_c = start_out.max(finish_in_c);
        let finish_out_c = finish_out.max(start_out_c);
        if finish_in_c != finish_in || start_out_c != start_out || finish_out_c != finish_out {
            log::warn!(
                "Inverted envelope [{}, {}, {}, {}] clamped",
                start_in,
                finish_in,
                start_out,
                finish_out
            );
        }
        Self {
            start_in,
            finish_in: finish_in_c,
            start_out: start_out_c,
            finish_out: finish_out_c,
        }
    }

    pub fn value(&self, time: f64) -> f64 {
        relative_time(self.start_in, self.finish_in, self.start_out, self.finish_out, time)
    }

    pub fn phase(&self, time: f64) -> EnvelopePhase {
        if time > self.finish_out {
            EnvelopePhase::Terminal
        } else if time < self.finish_in {
            EnvelopePhase::Appearing
        } else if time > self.start_out {
            EnvelopePhase::Disappearing
        } else {
            EnvelopePhase::Holding
        }
    }

    pub fn is_terminal(&self, time: f64) -> bool {
        self.phase(time) == EnvelopePhase::Terminal
    }
}
