//! Appear / hold / disappear timing shared by every timed effect.

mod envelope;

pub use envelope::{relative_time, Envelope, EnvelopePhase};
