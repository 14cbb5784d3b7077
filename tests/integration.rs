// Integration tests (native) for the `dance-with-tanssi` crate.
// These drive the public `Session` API with hand-picked timestamps; nothing
// here touches wasm or browser APIs.
//
// Medium difficulty throughout unless noted: 120 bpm (500ms beats),
// perfect window 60ms, good window 140ms.

use dance_with_tanssi::engine::moves::REFILL_BELOW;
use dance_with_tanssi::engine::{Ending, HitTier, Mode, PREVIEW_LEN};
use dance_with_tanssi::{Difficulty, Session};

const BEAT: f64 = 500.0;

fn on_beat(k: u32) -> f64 {
    k as f64 * BEAT
}
fn good_tap(k: u32) -> f64 {
    k as f64 * BEAT + 100.0
}
fn miss_tap(k: u32) -> f64 {
    k as f64 * BEAT + 250.0
}

fn playing(battle: bool) -> Session {
    let mut s = Session::seeded(Difficulty::Medium, 2024);
    s.start_game(battle, 0.0);
    s
}

#[test]
fn fresh_session_defaults() {
    let s = playing(false);
    let snap = s.snapshot();
    assert_eq!(snap.mode, Mode::Playing);
    assert_eq!(snap.health, 100);
    assert_eq!(snap.opponent_health, 0);
    assert_eq!(snap.score, 0);
    assert!(snap.current_move.is_some());
    assert_eq!(snap.upcoming_moves.len(), PREVIEW_LEN);

    let b = playing(true);
    assert_eq!(b.snapshot().opponent_health, 100);
}

#[test]
fn tenth_perfect_reaches_combo_ten_with_base_multiplier() {
    let mut s = playing(false);
    for k in 0..9 {
        assert_eq!(s.apply_tap(on_beat(k)).unwrap().judgement.tier, HitTier::Perfect);
    }
    assert_eq!(s.state().combo, 9);

    // 40ms after the beat: inside the 60ms perfect window
    let out = s.apply_tap(on_beat(9) + 40.0).unwrap();
    assert_eq!(out.judgement.tier, HitTier::Perfect);
    assert_eq!(out.judgement.multiplier, 1);
    assert_eq!(out.judgement.points, 100);
    assert_eq!(s.state().combo, 10);
    assert_eq!(s.state().max_combo, 10);
    assert_eq!(s.state().score, 1_000);

    // combo 10 doubles the next award
    let out = s.apply_tap(on_beat(10)).unwrap();
    assert_eq!(out.judgement.multiplier, 2);
    assert_eq!(s.state().score, 1_200);
}

#[test]
fn good_hit_and_miss_counters() {
    let mut s = playing(false);
    assert_eq!(s.apply_tap(good_tap(0)).unwrap().judgement.tier, HitTier::Good);
    assert_eq!(s.apply_tap(miss_tap(1)).unwrap().judgement.tier, HitTier::Miss);
    let st = s.state();
    assert_eq!((st.perfect_hits, st.good_hits, st.missed_hits), (0, 1, 1));
    assert_eq!(st.score, 50);
    assert_eq!(st.combo, 0);
    assert_eq!(st.max_combo, 1);
    assert_eq!(st.health, 90);
}

#[test]
fn battle_win_clamps_opponent_and_adds_bonus() {
    let mut s = playing(true);
    for k in 0..6 {
        let out = s.apply_tap(on_beat(k)).unwrap();
        assert_eq!(out.ending, None);
    }
    assert_eq!(s.state().opponent_health, 10);

    let out = s.apply_tap(on_beat(6)).unwrap();
    assert_eq!(out.ending, Some(Ending::Victory));
    assert_eq!(s.state().opponent_health, 0);
    assert_eq!(s.state().mode, Mode::GameOver);
    assert_eq!(s.state().score, 700 + 1_000);
    assert!(!s.clock().is_running());
    assert!(s.summary().victory);

    // game over: taps and beats are ignored
    assert!(s.apply_tap(on_beat(7)).is_none());
    assert!(!s.on_beat(on_beat(8)));
}

#[test]
fn defeat_arrives_one_miss_after_health_hits_ten() {
    let mut s = playing(false);
    for k in 0..8 {
        s.apply_tap(miss_tap(k));
    }
    assert_eq!(s.state().health, 20);

    let out = s.apply_tap(miss_tap(8)).unwrap();
    assert_eq!(out.ending, None);
    assert_eq!(s.state().health, 10);
    assert_eq!(s.state().mode, Mode::Playing);

    let out = s.apply_tap(miss_tap(9)).unwrap();
    assert_eq!(out.ending, Some(Ending::Defeat));
    assert_eq!(s.state().health, 0);
    assert_eq!(s.state().mode, Mode::GameOver);
    assert!(!s.summary().victory);
}

#[test]
fn summary_accuracy_half() {
    let mut s = playing(false);
    let mut k = 0;
    for _ in 0..3 {
        s.apply_tap(on_beat(k));
        k += 1;
    }
    for _ in 0..2 {
        s.apply_tap(good_tap(k));
        k += 1;
    }
    for _ in 0..5 {
        s.apply_tap(miss_tap(k));
        k += 1;
    }
    let summary = s.summary();
    assert_eq!((summary.perfect_hits, summary.good_hits, summary.missed_hits), (3, 2, 5));
    assert_eq!(summary.accuracy, 50);
}

#[test]
fn beat_emission_moves_the_grid() {
    let mut s = playing(false);
    // timer drifted: the emission lands 20ms early
    assert!(s.on_beat(480.0));
    assert_eq!(s.clock().last_beat_ms(), 480.0);
    assert!(s.snapshot().beat_pulse);
    let out = s.apply_tap(540.0).unwrap();
    assert_eq!(out.judgement.tier, HitTier::Perfect);
    assert!((out.judgement.timing_error_ms - 60.0).abs() < 1e-9);

    s.tick(600.0);
    assert!(!s.snapshot().beat_pulse);
}

#[test]
fn tap_advances_queue() {
    let mut s = playing(false);
    for k in 0..40 {
        let before = s.snapshot();
        let out = s.apply_tap(on_beat(k)).unwrap();
        assert_eq!(Some(out.performed), before.current_move);
        let after = s.snapshot();
        assert_eq!(after.current_move, Some(before.upcoming_moves[0]));
        // one short only while exactly REFILL_BELOW moves are queued
        let shown = after.upcoming_moves.len();
        assert!((REFILL_BELOW - 1..=PREVIEW_LEN).contains(&shown), "preview of {shown}");
    }
}

#[test]
fn preview_dips_to_two_right_before_a_refill() {
    let mut s = playing(false);
    // a fresh run of 8: five taps leave exactly three queued
    for k in 0..5 {
        s.apply_tap(on_beat(k));
    }
    assert_eq!(s.snapshot().upcoming_moves.len(), REFILL_BELOW - 1);
    s.apply_tap(on_beat(5));
    assert_eq!(s.snapshot().upcoming_moves.len(), PREVIEW_LEN);
}

#[test]
fn miss_triggers_glitch_and_no_popup() {
    let mut s = playing(false);
    s.apply_tap(miss_tap(0));
    assert!(s.snapshot().glitching);
    assert!(!s.effects().iter().any(|e| matches!(
        e.kind,
        dance_with_tanssi::engine::EffectKind::ScorePopup { .. }
    )));
    s.tick(miss_tap(0) + 300.0);
    assert!(!s.snapshot().glitching);
}

#[test]
fn stop_and_menu_transitions() {
    let mut s = playing(false);
    s.stop_game();
    assert_eq!(s.state().mode, Mode::GameOver);
    assert!(s.apply_tap(on_beat(1)).is_none());
    assert!(!s.clock().is_running());
    s.stop_game(); // repeat is harmless

    s.return_to_menu();
    let snap = s.snapshot();
    assert_eq!(snap.mode, Mode::Menu);
    assert_eq!(snap.current_move, None);
    assert!(snap.upcoming_moves.is_empty());

    s.set_difficulty(Difficulty::Expert).unwrap();
    s.start_game(false, 10_000.0);
    assert_eq!(s.state().score, 0);
    assert!((s.clock().interval_ms() - 300.0).abs() < 1e-9);
    assert!(s.clock().is_running());
}

#[test]
fn restart_keeps_battle_mode_and_resets_counters() {
    let mut s = playing(true);
    s.apply_tap(on_beat(0));
    s.apply_tap(miss_tap(1));
    s.restart(5_000.0);
    let st = s.state();
    assert!(st.battle);
    assert_eq!(st.opponent_health, 100);
    assert_eq!((st.score, st.combo, st.max_combo, st.missed_hits), (0, 0, 0, 0));
    assert_eq!(s.clock().last_beat_ms(), 5_000.0);
}

#[test]
fn non_battle_never_ends_by_victory() {
    let mut s = playing(false);
    for k in 0..50 {
        assert_eq!(s.apply_tap(on_beat(k)).unwrap().ending, None);
    }
    assert_eq!(s.state().mode, Mode::Playing);
    assert_eq!(s.state().opponent_health, 0);
}
