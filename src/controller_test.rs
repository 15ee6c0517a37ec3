use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::state::{Court, Slot, Snapshot};
use crate::view::RecordingView;

// =============================================================
// Helpers
// =============================================================

fn controller() -> MatchController<RecordingView> {
    MatchController::new(&MatchSetup::default(), RecordingView::new())
}

fn singles_controller() -> MatchController<RecordingView> {
    let setup = MatchSetup { format: Format::Singles, ..MatchSetup::default() };
    MatchController::new(&setup, RecordingView::new())
}

/// Alternate rallies so neither side pulls ahead by more than one point.
fn play_to(ctl: &mut MatchController<RecordingView>, a: u32, b: u32) {
    for i in 0..a.max(b) {
        if i < a {
            ctl.score(Team::A, 1).unwrap();
        }
        if i < b {
            ctl.score(Team::B, 1).unwrap();
        }
    }
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (a, b));
}

fn snapshot(ctl: &MatchController<RecordingView>) -> Snapshot {
    ctl.state().snapshot()
}

fn frames(ctl: &MatchController<RecordingView>) -> usize {
    ctl.view().frames.len()
}

fn names(team: &str, even: &str, odd: &str) -> DisplayedNames {
    DisplayedNames { team: team.to_owned(), even_player: even.to_owned(), odd_player: Some(odd.to_owned()) }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_match_starts_at_zero_with_a_serving() {
    let ctl = controller();
    let state = ctl.state();
    assert_eq!((state.score_a, state.score_b), (0, 0));
    assert_eq!(state.serving, Team::A);
    assert_eq!(state.side_a.even_court, Slot::First);
    assert_eq!(state.side_b.even_court, Slot::First);
    assert_eq!(ctl.phase(), Phase::InProgress);
    assert_eq!(ctl.history_len(), 0);
    assert_eq!(frames(&ctl), 0);
}

#[test]
fn refresh_renders_without_touching_history() {
    let mut ctl = controller();
    ctl.refresh();
    assert_eq!(frames(&ctl), 1);
    assert_eq!(ctl.history_len(), 0);
    assert_eq!(ctl.view().last().map(|f| f.server_name.as_str()), Some("A1"));
}

#[test]
fn independent_matches_do_not_share_state() {
    let mut first = controller();
    let second = controller();
    first.score(Team::A, 1).unwrap();
    assert_eq!(first.state().score_a, 1);
    assert_eq!(second.state().score_a, 0);
    assert_ne!(first.id(), second.id());
}

// =============================================================
// score
// =============================================================

#[test]
fn score_pushes_history_and_renders() {
    let mut ctl = controller();
    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.state().score_b, 1);
    assert_eq!(ctl.history_len(), 1);
    assert_eq!(frames(&ctl), 1);
    assert_eq!(ctl.view().last().map(|f| f.side_b.score), Some(1));
}

#[test]
fn serving_side_holds_serve_and_swaps_courts_then_side_out() {
    let mut ctl = controller();

    ctl.score(Team::A, 1).unwrap();
    assert_eq!(ctl.state().serving, Team::A);
    assert_eq!(ctl.state().side_a.even_court, Slot::Second);

    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.state().serving, Team::B);
    assert_eq!(ctl.state().side_a.even_court, Slot::Second);
    assert_eq!(ctl.state().side_b.even_court, Slot::First);
}

#[test]
fn same_player_keeps_serving_while_side_holds_serve() {
    let mut ctl = controller();
    for _ in 0..5 {
        ctl.score(Team::A, 1).unwrap();
        assert_eq!(ctl.view().last().map(|f| f.server_name.as_str()), Some("A1"));
    }
}

#[test]
fn side_out_server_is_picked_by_receiving_score_parity() {
    let mut ctl = controller();
    ctl.score(Team::B, 1).unwrap();
    let frame = ctl.view().last().cloned().unwrap();
    assert_eq!(frame.serving, Team::B);
    assert_eq!(frame.server_court, Court::Odd);
    assert_eq!(frame.server_name, "B2");
}

#[test]
fn decrement_below_zero_is_rejected_without_history() {
    let mut ctl = controller();
    let err = ctl.score(Team::A, -1).unwrap_err();
    assert_eq!(err, ActionError::NegativeScore { team: Team::A });
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(ctl.state().score_a, 0);
    assert_eq!(ctl.history_len(), 0);
    assert_eq!(frames(&ctl), 0);
}

#[test]
fn zero_delta_is_rejected() {
    let mut ctl = controller();
    assert_eq!(ctl.score(Team::A, 0), Err(ActionError::ZeroDelta));
    assert_eq!(ctl.history_len(), 0);
}

#[test]
fn decrement_does_not_reverse_rotation() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::A, -1).unwrap();
    assert_eq!(ctl.state().score_a, 0);
    assert_eq!(ctl.state().serving, Team::A);
    assert_eq!(ctl.state().side_a.even_court, Slot::Second);
    assert_eq!(ctl.history_len(), 2);
}

#[test]
fn multi_point_delta_rotates_once() {
    let mut ctl = controller();
    ctl.score(Team::A, 3).unwrap();
    assert_eq!(ctl.state().score_a, 3);
    assert_eq!(ctl.state().side_a.even_court, Slot::Second);
    assert_eq!(ctl.history_len(), 1);
}

#[test]
fn scores_stay_within_bounds_for_long_sequences() {
    let mut ctl = controller();
    play_to(&mut ctl, 26, 26);
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..2_000 {
        let team = if rng.random_bool(0.5) { Team::A } else { Team::B };
        let points = rng.random_range(1..=3);
        let delta = if rng.random_bool(0.15) { -points } else { points };

        let before = snapshot(&ctl);
        if ctl.score(team, delta).is_err() {
            assert_eq!(snapshot(&ctl), before);
        }
        if ctl.phase() == Phase::Ended {
            ctl.undo().unwrap();
        }

        let state = ctl.state();
        assert!(state.score_a <= MAX_SCORE);
        assert!(state.score_b <= MAX_SCORE);
    }
}

#[test]
fn cap_holds_when_pushed_at_deuce_and_at_thirty() {
    let mut ctl = controller();
    play_to(&mut ctl, 29, 29);
    let history = ctl.history_len();

    for team in Team::ALL {
        for delta in [2, 5, i32::MAX] {
            assert_eq!(ctl.score(team, delta), Err(ActionError::ScoreCapped { team, max: MAX_SCORE }));
        }
    }
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (29, 29));
    assert_eq!(ctl.history_len(), history);

    ctl.score(Team::A, 1).unwrap();
    assert_eq!(ctl.state().score_a, MAX_SCORE);
    ctl.swap_sides().unwrap();
    ctl.undo().unwrap();
    assert_eq!(ctl.phase(), Phase::InProgress);

    for delta in [1, 3, i32::MAX] {
        assert_eq!(
            ctl.score(Team::A, delta),
            Err(ActionError::ScoreCapped { team: Team::A, max: MAX_SCORE })
        );
    }
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (MAX_SCORE, 29));
}

// =============================================================
// Win detection
// =============================================================

#[test]
fn twenty_one_nil_ends_the_match() {
    let mut ctl = controller();
    for _ in 0..21 {
        ctl.score(Team::A, 1).unwrap();
    }
    assert_eq!(ctl.phase(), Phase::Ended);
    assert!(ctl.state().ended);

    let outcome = ctl.view().last().and_then(|f| f.outcome.clone()).unwrap();
    assert_eq!(outcome.winner, Team::A);
    assert_eq!(outcome.winner_name, "Team A");
    assert_eq!((outcome.score_a, outcome.score_b), (21, 0));
}

#[test]
fn scoring_after_the_end_is_rejected() {
    let mut ctl = controller();
    play_to(&mut ctl, 21, 0);
    let history = ctl.history_len();
    let rendered = frames(&ctl);

    assert_eq!(ctl.score(Team::B, 1), Err(ActionError::MatchEnded));
    assert_eq!(ctl.score(Team::A, -1), Err(ActionError::MatchEnded));
    assert_eq!(ctl.state().score_b, 0);
    assert_eq!(ctl.history_len(), history);
    assert_eq!(frames(&ctl), rendered);
}

#[test]
fn deuce_continues_until_two_point_lead() {
    let mut ctl = controller();
    play_to(&mut ctl, 21, 20);
    assert_eq!(ctl.phase(), Phase::InProgress);
    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.phase(), Phase::InProgress);
    ctl.score(Team::B, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.phase(), Phase::Ended);
    assert_eq!(ctl.render_state().outcome.map(|o| o.winner), Some(Team::B));
}

#[test]
fn twenty_nine_twenty_eight_point_reaches_cap_and_wins() {
    let mut ctl = controller();
    play_to(&mut ctl, 29, 28);
    assert_eq!(ctl.phase(), Phase::InProgress);
    ctl.score(Team::A, 1).unwrap();
    assert_eq!(ctl.state().score_a, 30);
    assert_eq!(ctl.phase(), Phase::Ended);
    assert_eq!(ctl.render_state().outcome.map(|o| o.winner), Some(Team::A));
}

#[test]
fn cap_wins_thirty_twenty_nine() {
    let mut ctl = controller();
    play_to(&mut ctl, 29, 29);
    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.phase(), Phase::Ended);
    assert_eq!(ctl.render_state().outcome.map(|o| o.winner), Some(Team::B));
}

#[test]
fn manual_decrement_can_complete_a_win() {
    let mut ctl = controller();
    play_to(&mut ctl, 21, 20);
    ctl.score(Team::B, -1).unwrap();
    assert_eq!(ctl.phase(), Phase::Ended);
    assert_eq!(ctl.render_state().outcome.map(|o| o.winner), Some(Team::A));
}

#[test]
fn increment_past_cap_is_rejected() {
    let mut ctl = controller();
    play_to(&mut ctl, 29, 29);
    ctl.score(Team::A, 1).unwrap();
    // Swapping while ended and undoing it resumes play at 30-29.
    ctl.swap_sides().unwrap();
    ctl.undo().unwrap();
    assert_eq!(ctl.phase(), Phase::InProgress);
    assert_eq!(ctl.state().score_a, 30);

    let history = ctl.history_len();
    assert_eq!(ctl.score(Team::A, 1), Err(ActionError::ScoreCapped { team: Team::A, max: MAX_SCORE }));
    assert_eq!(ctl.state().score_a, 30);
    assert_eq!(ctl.history_len(), history);
}

// =============================================================
// undo
// =============================================================

#[test]
fn undo_on_empty_history_is_rejected() {
    let mut ctl = controller();
    let err = ctl.undo().unwrap_err();
    assert_eq!(err, ActionError::EmptyHistory);
    assert_eq!(err.kind(), ErrorKind::EmptyHistory);
    assert_eq!(frames(&ctl), 0);
}

#[test]
fn undo_restores_exact_pre_action_state_for_every_action() {
    let actions: [fn(&mut MatchController<RecordingView>); 5] = [
        |c| c.score(Team::A, 1).unwrap(),
        |c| c.score(Team::B, -1).unwrap(),
        |c| c.swap_sides().unwrap(),
        |c| c.set_server(Team::A).unwrap(),
        |c| c.reset().unwrap(),
    ];

    for action in actions {
        let mut ctl = controller();
        ctl.score(Team::A, 1).unwrap();
        ctl.score(Team::B, 2).unwrap();
        let before = snapshot(&ctl);

        action(&mut ctl);
        ctl.undo().unwrap();

        assert_eq!(snapshot(&ctl), before);
        assert_eq!(ctl.phase(), Phase::InProgress);
    }
}

#[test]
fn undo_of_close_and_reset_restores_the_final_score() {
    let mut ctl = controller();
    play_to(&mut ctl, 21, 19);
    assert_eq!(ctl.phase(), Phase::Ended);
    let before = snapshot(&ctl);

    ctl.close_and_reset().unwrap();
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (0, 0));
    ctl.undo().unwrap();

    assert_eq!(snapshot(&ctl), before);
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (21, 19));
    assert_eq!(ctl.phase(), Phase::InProgress);
    assert!(ctl.render_state().outcome.is_none());
}

#[test]
fn undo_after_win_resumes_play_and_clears_outcome() {
    let mut ctl = controller();
    play_to(&mut ctl, 21, 0);
    ctl.undo().unwrap();

    assert_eq!(ctl.phase(), Phase::InProgress);
    assert_eq!(ctl.state().score_a, 20);
    let frame = ctl.view().last().cloned().unwrap();
    assert_eq!(frame.phase, Phase::InProgress);
    assert!(frame.outcome.is_none());

    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.state().score_b, 1);
}

#[test]
fn history_keeps_fifty_most_recent_actions() {
    let mut ctl = controller();
    for i in 0..60 {
        let team = if i % 2 == 0 { Team::B } else { Team::A };
        ctl.set_server(team).unwrap();
    }
    assert_eq!(ctl.history_len(), 50);

    for _ in 0..50 {
        ctl.undo().unwrap();
    }
    assert_eq!(ctl.undo(), Err(ActionError::EmptyHistory));
}

// =============================================================
// reset / close_and_reset
// =============================================================

#[test]
fn reset_restores_defaults_but_keeps_names() {
    let mut ctl = controller();
    ctl.rename_applied(names("Smash", "Ann", "Bo"), names("Net", "Cy", "Di")).unwrap();
    ctl.score(Team::B, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    ctl.reset().unwrap();

    let state = ctl.state();
    assert_eq!((state.score_a, state.score_b), (0, 0));
    assert_eq!(state.serving, Team::A);
    assert_eq!(state.side_a.even_court, Slot::First);
    assert_eq!(state.side_b.even_court, Slot::First);
    assert_eq!(state.side_a.name, "Smash");
    assert_eq!(state.side_b.players, ["Cy".to_owned(), "Di".to_owned()]);
}

#[test]
fn reset_is_undoable() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    let before = snapshot(&ctl);
    ctl.reset().unwrap();
    assert_eq!(ctl.history_len(), 2);
    ctl.undo().unwrap();
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn close_and_reset_requires_an_ended_match() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    assert_eq!(ctl.close_and_reset(), Err(ActionError::NotEnded));
    assert_eq!(ctl.state().score_a, 1);
}

#[test]
fn close_and_reset_starts_a_fresh_game() {
    let mut ctl = controller();
    play_to(&mut ctl, 5, 21);
    assert_eq!(ctl.phase(), Phase::Ended);

    ctl.close_and_reset().unwrap();
    assert_eq!(ctl.phase(), Phase::InProgress);
    assert_eq!((ctl.state().score_a, ctl.state().score_b), (0, 0));
    assert_eq!(ctl.state().serving, Team::A);
    assert!(ctl.view().last().is_some_and(|f| f.outcome.is_none()));
}

// =============================================================
// swap_sides
// =============================================================

#[test]
fn swap_sides_moves_every_team_field_together() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    let before = ctl.state().clone();

    ctl.swap_sides().unwrap();
    let after = ctl.state();
    assert_eq!(after.score_a, before.score_b);
    assert_eq!(after.score_b, before.score_a);
    assert_eq!(after.side_a, before.side_b);
    assert_eq!(after.side_b, before.side_a);
    assert_eq!(after.serving, before.serving.other());
}

#[test]
fn swap_sides_twice_is_identity() {
    let mut ctl = controller();
    ctl.rename_applied(names("Smash", "Ann", "Bo"), names("Net", "Cy", "Di")).unwrap();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    let before = snapshot(&ctl);

    ctl.swap_sides().unwrap();
    ctl.swap_sides().unwrap();
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn swap_sides_keeps_the_same_player_serving() {
    let mut ctl = controller();
    ctl.score(Team::B, 1).unwrap();
    let server = ctl.render_state().server_name;
    ctl.swap_sides().unwrap();
    let frame = ctl.render_state();
    assert_eq!(frame.serving, Team::A);
    assert_eq!(frame.server_name, server);
}

// =============================================================
// set_server
// =============================================================

#[test]
fn set_server_to_current_server_is_rejected() {
    let mut ctl = controller();
    assert_eq!(ctl.set_server(Team::A), Err(ActionError::AlreadyServing { team: Team::A }));
    assert_eq!(ctl.history_len(), 0);
    assert_eq!(frames(&ctl), 0);
}

#[test]
fn set_server_changes_only_the_serving_team() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    let before = ctl.state().clone();

    ctl.set_server(Team::B).unwrap();
    let after = ctl.state();
    assert_eq!(after.serving, Team::B);
    assert_eq!(after.score_a, before.score_a);
    assert_eq!(after.side_a, before.side_a);
    assert_eq!(after.side_b, before.side_b);
}

// =============================================================
// rename_applied
// =============================================================

#[test]
fn rename_maps_displayed_courts_back_to_slots() {
    let mut ctl = controller();
    // A holds serve: A2 now stands in the even court.
    ctl.score(Team::A, 1).unwrap();
    assert_eq!(ctl.displayed_names(Team::A), names("Team A", "A2", "A1"));

    ctl.rename_applied(names("Smash", "Xena", "Yuri"), ctl.displayed_names(Team::B)).unwrap();

    let side = &ctl.state().side_a;
    assert_eq!(side.name, "Smash");
    assert_eq!(side.players, ["Yuri".to_owned(), "Xena".to_owned()]);
    assert_eq!(ctl.displayed_names(Team::A), names("Smash", "Xena", "Yuri"));
}

#[test]
fn rename_is_not_undoable() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    ctl.rename_applied(names("Smash", "Ann", "Bo"), names("Net", "Cy", "Di")).unwrap();
    assert_eq!(ctl.history_len(), 1);
    assert_eq!(frames(&ctl), 2);
}

#[test]
fn undo_of_an_earlier_point_reverts_a_later_rename() {
    let mut ctl = controller();
    ctl.score(Team::A, 1).unwrap();
    ctl.rename_applied(names("Smash", "Ann", "Bo"), names("Net", "Cy", "Di")).unwrap();
    // The snapshot taken before the point still holds the old names.
    ctl.undo().unwrap();
    assert_eq!(ctl.state().side_a.name, "Team A");
}

// =============================================================
// Singles
// =============================================================

#[test]
fn singles_scoring_never_swaps_courts() {
    let mut ctl = singles_controller();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::A, 1).unwrap();
    ctl.score(Team::B, 1).unwrap();
    assert_eq!(ctl.state().side_a.even_court, Slot::First);
    assert_eq!(ctl.state().side_b.even_court, Slot::First);

    let frame = ctl.render_state();
    assert_eq!(frame.server_name, "B1");
    assert_eq!(frame.server_court, Court::Odd);
    assert!(frame.side_a.odd_player.is_none());
}

#[test]
fn singles_rename_ignores_odd_player() {
    let mut ctl = singles_controller();
    ctl.rename_applied(names("Smash", "Ann", "ignored"), ctl.displayed_names(Team::B)).unwrap();
    assert_eq!(ctl.state().side_a.players, ["Ann".to_owned(), "A2".to_owned()]);
}

#[test]
fn displayed_names_match_the_rendered_board() {
    for mut ctl in [controller(), singles_controller()] {
        ctl.score(Team::A, 1).unwrap();
        ctl.score(Team::A, 1).unwrap();
        ctl.score(Team::B, 1).unwrap();
        ctl.rename_applied(ctl.displayed_names(Team::A), names("Net", "Cy", "Di")).unwrap();

        let frame = ctl.render_state();
        for team in Team::ALL {
            let shown = frame.side(team);
            let edit = ctl.displayed_names(team);
            assert_eq!(edit.team, shown.name);
            assert_eq!(edit.even_player, shown.even_player);
            assert_eq!(edit.odd_player, shown.odd_player);
        }
    }
}

#[test]
fn renaming_with_displayed_names_changes_nothing() {
    for mut ctl in [controller(), singles_controller()] {
        ctl.score(Team::B, 1).unwrap();
        ctl.score(Team::B, 1).unwrap();
        let before = snapshot(&ctl);

        ctl.rename_applied(ctl.displayed_names(Team::A), ctl.displayed_names(Team::B)).unwrap();
        assert_eq!(snapshot(&ctl), before);
    }
}
