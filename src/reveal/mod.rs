//! Scroll-triggered reveals
//!
//! Pure bookkeeping for viewport-intersection reveals. The DOM side (see
//! `platform::dom`) feeds intersections in and runs the returned delays on
//! timers; everything here is synchronous and testable natively.

pub mod cards;
pub mod sequence;

pub use cards::{CardGroup, CardId, CardState, OBSERVERS, ObserverSpec, RevealBoard, parse_delay};
pub use sequence::{HAIKU, SequencePlan, SequenceReveal, SequenceSpec};
