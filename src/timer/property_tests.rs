//! Property tests for timers
//!
//! Property 1: A countdown from N expires on exactly the Nth tick
//! Property 2: No tick after cancel has any effect

use proptest::prelude::*;

use crate::timer::{Countdown, CountdownStep, Delay};

proptest! {
    #[test]
    fn prop_expires_on_nth_tick(seconds in 1u32..=200) {
        let mut countdown = Countdown::new();
        let token = countdown.start(seconds);
        let mut expired_at = None;
        for i in 1..=seconds + 5 {
            match countdown.tick(token) {
                CountdownStep::Expired => {
                    prop_assert!(expired_at.is_none(), "expired twice");
                    expired_at = Some(i);
                }
                CountdownStep::Running(left) => prop_assert_eq!(left, seconds - i),
                CountdownStep::Stale => prop_assert!(expired_at.is_some()),
            }
        }
        prop_assert_eq!(expired_at, Some(seconds));
        prop_assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn prop_cancel_silences_countdown(seconds in 1u32..=50, ticks_before in 0u32..=50) {
        let mut countdown = Countdown::new();
        let token = countdown.start(seconds);
        for _ in 0..ticks_before.min(seconds - 1) {
            countdown.tick(token);
        }
        let frozen = countdown.remaining();
        countdown.cancel();
        for _ in 0..seconds + 1 {
            prop_assert_eq!(countdown.tick(token), CountdownStep::Stale);
        }
        prop_assert_eq!(countdown.remaining(), frozen);
    }

    #[test]
    fn prop_only_latest_delay_fires(schedules in 1usize..=10) {
        let mut delay = Delay::new();
        let tokens: Vec<_> = (0..schedules).map(|i| delay.schedule(i)).collect();
        for token in &tokens[..schedules - 1] {
            prop_assert_eq!(delay.fire(*token), None);
        }
        prop_assert_eq!(delay.fire(tokens[schedules - 1]), Some(schedules - 1));
    }
}
