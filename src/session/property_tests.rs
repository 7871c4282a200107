//! Property tests for the session state machine
//!
//! Property 1: Covering the memory set completes the level exactly once
//! Property 2: Wrong-attempt cap forces a reset whatever time is left
//! Property 3: Recall timeout without coverage forces a reset
//! Property 4: Reset is idempotent
//! Property 5: Stale timer tokens never change state

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::scoring::level_points;
use crate::session::{Effect, GameSession, Phase, Transition};

fn seeded(seed: u64) -> GameSession {
    GameSession::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
    .unwrap()
}

/// Tick the running countdown until it produces effects
fn expire(session: &mut GameSession) {
    let token = session.countdown_token().unwrap();
    while session.on_tick(token).is_empty() {}
}

fn fire(session: &mut GameSession) {
    let (token, _) = session.pending_transition().unwrap();
    session.on_delay(token);
}

/// Drive a fresh session into the recall phase of `level`
fn reach_recall(session: &mut GameSession, level: u32) {
    session.start_game();
    expire(session);
    while session.state().level < level {
        let memory = session.state().memory.values().to_vec();
        for n in memory {
            session.select_number(n);
        }
        fire(session);
        expire(session);
    }
}

fn distractors(session: &GameSession) -> Vec<u32> {
    let state = session.state();
    state
        .test
        .values()
        .iter()
        .copied()
        .filter(|n| !state.memory.contains(*n))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_coverage_completes_level_once(
        seed in any::<u64>(),
        order_seed in any::<u64>(),
        level in 1u32..=4,
        wrong in 0usize..=2
    ) {
        let mut session = seeded(seed);
        reach_recall(&mut session, level);
        let score_before = session.state().score;

        let mut picks = session.state().memory.values().to_vec();
        picks.extend(distractors(&session).into_iter().take(wrong));
        let mut order_rng = StdRng::seed_from_u64(order_seed);
        picks.shuffle(&mut order_rng);

        let mut completions = 0;
        for n in picks {
            let effects = session.select_number(n);
            let scheduled = effects.iter().any(|e| matches!(e, Effect::ScheduleDelay { .. }));
            if scheduled {
                completions += 1;
            }
        }

        prop_assert_eq!(completions, 1);
        prop_assert_eq!(session.phase(), Phase::LevelComplete);
        prop_assert_eq!(session.state().score, score_before + level_points(level));
        prop_assert_eq!(session.pending_transition().map(|(_, t)| t), Some(Transition::NextLevel));
    }

    #[test]
    fn prop_wrong_cap_resets(seed in any::<u64>(), elapsed in 0u32..=19, correct in 0usize..=4) {
        let mut session = seeded(seed);
        reach_recall(&mut session, 1);
        let token = session.countdown_token().unwrap();
        for _ in 0..elapsed {
            session.on_tick(token);
        }
        let memory = session.state().memory.values().to_vec();
        for n in memory.iter().take(correct) {
            session.select_number(*n);
        }
        for n in distractors(&session).into_iter().take(3) {
            session.select_number(n);
        }
        prop_assert_eq!(session.pending_transition().map(|(_, t)| t), Some(Transition::ResetToReady));
        prop_assert_eq!(session.countdown_token(), None);

        fire(&mut session);
        prop_assert_eq!(session.phase(), Phase::Ready);
        prop_assert_eq!(session.state().level, 1);
        prop_assert_eq!(session.state().score, 0);
    }

    #[test]
    fn prop_timeout_resets(seed in any::<u64>(), correct in 0usize..=4) {
        let mut session = seeded(seed);
        reach_recall(&mut session, 1);
        let memory = session.state().memory.values().to_vec();
        for n in memory.iter().take(correct) {
            session.select_number(*n);
        }
        expire(&mut session);
        prop_assert_eq!(session.pending_transition().map(|(_, t)| t), Some(Transition::ResetToReady));
        fire(&mut session);
        prop_assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn prop_reset_idempotent(seed in any::<u64>(), steps in 0u32..=3) {
        let mut session = seeded(seed);
        session.start_game();
        if steps > 0 {
            expire(&mut session);
        }
        session.reset_game();
        let once = session.snapshot();
        session.reset_game();
        prop_assert_eq!(session.snapshot(), once.clone());
        prop_assert_eq!(once.phase, Phase::Ready);
        prop_assert_eq!(once.score, 0);
        prop_assert_eq!(once.level, 1);
    }

    #[test]
    fn prop_stale_tokens_inert(seed in any::<u64>()) {
        let mut session = seeded(seed);
        session.start_game();
        let memorize_token = session.countdown_token().unwrap();
        expire(&mut session);
        let before = session.snapshot();
        for _ in 0..25 {
            prop_assert!(session.on_tick(memorize_token).is_empty());
        }
        prop_assert_eq!(session.snapshot(), before);
    }
}
