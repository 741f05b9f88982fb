//! Line-by-line haiku reveal
//!
//! One-shot: the first intersection yields a plan (per-line delays plus a
//! group-level class after a fixed pause); later intersections yield nothing.

/// Selectors and timings for a sequential text reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSpec {
    pub container_selector: &'static str,
    pub line_selector: &'static str,
    pub threshold: f64,
    pub step_ms: u32,
    /// Delay after the trigger before `finale_class` lands on the container
    pub finale_delay_ms: u32,
    pub finale_class: &'static str,
}

pub const HAIKU: SequenceSpec = SequenceSpec {
    container_selector: ".haiku-container",
    line_selector: ".haiku-line",
    threshold: 0.3,
    step_ms: 800,
    finale_delay_ms: 2000,
    finale_class: "dusk",
};

/// Timers to start when the sequence triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePlan {
    /// Delay per line, in document order
    pub line_delays: Vec<u32>,
    pub finale_delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct SequenceReveal {
    spec: SequenceSpec,
    explicit_delays: Vec<Option<u32>>,
    triggered: bool,
}

impl SequenceReveal {
    /// `None` when the group has no lines
    pub fn new(spec: SequenceSpec, explicit_delays: Vec<Option<u32>>) -> Option<Self> {
        if explicit_delays.is_empty() {
            return None;
        }
        Some(Self {
            spec,
            explicit_delays,
            triggered: false,
        })
    }

    pub fn spec(&self) -> &SequenceSpec {
        &self.spec
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// First intersection only
    pub fn trigger(&mut self) -> Option<SequencePlan> {
        if self.triggered {
            return None;
        }
        self.triggered = true;

        let step = self.spec.step_ms;
        let line_delays = self
            .explicit_delays
            .iter()
            .enumerate()
            // data-delay="0" counts as unset and falls back to the line's slot
            .map(|(i, explicit)| {
                explicit
                    .filter(|&delay| delay > 0)
                    .unwrap_or_else(|| (i as u32).saturating_mul(step))
            })
            .collect();

        Some(SequencePlan {
            line_delays,
            finale_delay_ms: self.spec.finale_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haiku_plan() {
        let mut haiku = SequenceReveal::new(HAIKU, vec![None, None, None]).unwrap();
        let plan = haiku.trigger().unwrap();
        assert_eq!(plan.line_delays, vec![0, 800, 1600]);
        assert_eq!(plan.finale_delay_ms, 2000);
        assert!(haiku.is_triggered());
    }

    #[test]
    fn test_haiku_is_one_shot() {
        let mut haiku = SequenceReveal::new(HAIKU, vec![None]).unwrap();
        assert!(haiku.trigger().is_some());
        assert!(haiku.trigger().is_none());
    }

    #[test]
    fn test_explicit_line_delay() {
        let mut haiku = SequenceReveal::new(HAIKU, vec![Some(500), None, Some(3000)]).unwrap();
        assert_eq!(haiku.trigger().unwrap().line_delays, vec![500, 800, 3000]);
    }

    #[test]
    fn test_zero_line_delay_uses_slot() {
        let mut haiku = SequenceReveal::new(HAIKU, vec![Some(0), Some(0), None]).unwrap();
        assert_eq!(haiku.trigger().unwrap().line_delays, vec![0, 800, 1600]);
    }

    #[test]
    fn test_empty_group_is_skipped() {
        assert!(SequenceReveal::new(HAIKU, Vec::new()).is_none());
    }
}
