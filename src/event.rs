use std::ops::RangeInclusive;

use rand::Rng;

use crate::config::{DOUBLE_REWARD_THRESHOLD, GOLDEN_RAIN_THRESHOLD};

/// Timed modifier that a golden capture may trigger.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EventKind {
    /// Regular food is worth twice as much.
    DoubleReward,
    /// Golden food appears as soon as the event starts.
    GoldenRain,
}

impl EventKind {
    /// Possible durations in ticks.
    #[must_use]
    pub fn duration_ticks(self) -> RangeInclusive<u32> {
        match self {
            Self::DoubleReward => 12..=23,
            Self::GoldenRain => 8..=17,
        }
    }

    /// Short badge text for the HUD.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DoubleReward => "DOUBLE x2",
            Self::GoldenRain => "GOLDEN RAIN",
        }
    }
}

/// The single event currently running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub remaining_ticks: u32,
}

impl ActiveEvent {
    #[must_use]
    pub fn new(kind: EventKind, remaining_ticks: u32) -> Self {
        Self {
            kind,
            remaining_ticks,
        }
    }

    /// Counts one tick down. Returns `true` once the event has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }
}

/// Maps a uniform roll in `[0, 1)` to the event it triggers, if any.
#[must_use]
pub fn event_for_roll(roll: f64) -> Option<EventKind> {
    if roll < DOUBLE_REWARD_THRESHOLD {
        Some(EventKind::DoubleReward)
    } else if roll < GOLDEN_RAIN_THRESHOLD {
        Some(EventKind::GoldenRain)
    } else {
        None
    }
}

/// Rolls for a new event with a randomized duration.
pub fn roll_event<R: Rng + ?Sized>(rng: &mut R) -> Option<ActiveEvent> {
    let kind = event_for_roll(rng.gen_range(0.0..1.0))?;
    let remaining_ticks = rng.gen_range(kind.duration_ticks());
    Some(ActiveEvent::new(kind, remaining_ticks))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{ActiveEvent, EventKind, event_for_roll, roll_event};

    #[test]
    fn roll_thresholds_select_events() {
        assert_eq!(event_for_roll(0.0), Some(EventKind::DoubleReward));
        assert_eq!(event_for_roll(0.079), Some(EventKind::DoubleReward));
        assert_eq!(event_for_roll(0.08), Some(EventKind::GoldenRain));
        assert_eq!(event_for_roll(0.139), Some(EventKind::GoldenRain));
        assert_eq!(event_for_roll(0.14), None);
        assert_eq!(event_for_roll(0.99), None);
    }

    #[test]
    fn rolled_durations_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen_double = false;
        let mut seen_rain = false;

        for _ in 0..5_000 {
            let Some(event) = roll_event(&mut rng) else {
                continue;
            };
            assert!(event.kind.duration_ticks().contains(&event.remaining_ticks));
            match event.kind {
                EventKind::DoubleReward => seen_double = true,
                EventKind::GoldenRain => seen_rain = true,
            }
        }

        assert!(seen_double && seen_rain);
    }

    #[test]
    fn event_expires_when_counter_hits_zero() {
        let mut event = ActiveEvent::new(EventKind::GoldenRain, 3);

        assert!(!event.tick());
        assert!(!event.tick());
        assert!(event.tick());
        assert_eq!(event.remaining_ticks, 0);
    }
}
