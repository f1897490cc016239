//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one tick. Order is fixed:
//! players (left, right) -> ball -> contacts (left, right) -> walls -> goals.

use super::collision::{Contact, resolve_player_ball};
use super::state::{GameEvent, GameState, MatchPhase, Side};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Player A
    pub left: super::Intent,
    /// Player B
    pub right: super::Intent,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> &super::Intent {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Terminal: the host may keep rendering, nothing moves or scores
    if state.is_over() {
        return;
    }

    state.time_ticks += 1;

    for player in &mut state.players {
        player.steer(input.for_side(player.side), &state.tuning);
    }

    if state.ball.advance(&state.tuning) {
        log::trace!("Wall bounce at {:?}", state.ball.pos);
        state.events.push(GameEvent::WallBounce);
    }

    // Each contact overwrites the ball velocity, so when both players touch
    // the ball in the same tick the right player's contact wins.
    for player in &state.players {
        let kick = input.for_side(player.side).kick;
        match resolve_player_ball(player, &mut state.ball, kick, &state.tuning, &mut state.rng) {
            Contact::None => {}
            Contact::Kick => {
                log::debug!(
                    "{} player kicks, ball speed {:.2}",
                    player.side.as_str(),
                    state.ball.speed()
                );
                state.events.push(GameEvent::Kick { side: player.side });
            }
            Contact::Nudge => {
                log::trace!("{} player nudges the ball", player.side.as_str());
                state.events.push(GameEvent::Nudge { side: player.side });
            }
        }
    }

    // Contact can push the ball into a wall
    if state.ball.contain_vertical(&state.tuning) {
        state.events.push(GameEvent::WallBounce);
    }

    evaluate_goals(state);
}

/// Sides whose goal the ball is currently in
pub fn goals_conceded(state: &GameState) -> Vec<Side> {
    let t = &state.tuning;
    let ball = &state.ball;
    if !t.in_goal_mouth(ball.pos.y) {
        return Vec::new();
    }

    let mut conceded = Vec::with_capacity(2);
    if ball.pos.x - ball.radius <= t.goal_line_x(Side::Left) {
        conceded.push(Side::Left);
    }
    if ball.pos.x + ball.radius >= t.goal_line_x(Side::Right) {
        conceded.push(Side::Right);
    }
    conceded
}

/// Score goals, reset the round and check for a winner.
/// Without a goal, bounce the ball off the end lines instead.
fn evaluate_goals(state: &mut GameState) {
    let conceded = goals_conceded(state);
    if conceded.is_empty() {
        if end_line_bounce(state) {
            state.events.push(GameEvent::EndLineBounce);
        }
        return;
    }

    for side in conceded {
        let scorer = side.opponent();
        state.player_mut(scorer).score += 1;
        state.events.push(GameEvent::Goal {
            scorer,
            conceded: side,
        });
        log::info!(
            "Goal for {} ({} - {})",
            scorer.as_str(),
            state.score(Side::Left),
            state.score(Side::Right)
        );
    }

    state.reset_round();

    for side in [Side::Left, Side::Right] {
        if state.score(side) >= state.tuning.win_score {
            state.phase = MatchPhase::Won { winner: side };
            state.events.push(GameEvent::MatchWon { winner: side });
            log::info!("Match won by {} at tick {}", side.as_str(), state.time_ticks);
            break;
        }
    }
}

/// Reflect the ball off an end line when it is travelling out of the field
fn end_line_bounce(state: &mut GameState) -> bool {
    let t = &state.tuning;
    let ball = &mut state.ball;

    if ball.pos.x - ball.radius < 0.0 && ball.vel.x < 0.0 {
        ball.pos.x = ball.radius;
    } else if ball.pos.x + ball.radius > t.field_width && ball.vel.x > 0.0 {
        ball.pos.x = t.field_width - ball.radius;
    } else {
        return false;
    }

    ball.vel.x = -ball.vel.x * t.restitution;
    log::trace!("End line bounce at {:?}", ball.pos);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Intent;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(Tuning::default(), 12345).unwrap()
    }

    fn assert_kickoff(state: &GameState) {
        let t = &state.tuning;
        assert_eq!(state.ball.pos, t.center());
        assert_eq!(state.ball.vel, Vec2::ZERO);
        for player in &state.players {
            assert_eq!(player.pos, t.start_position(player.side));
            assert_eq!(player.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_idle_tick_keeps_kickoff() {
        let mut state = new_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.is_empty());
        assert_kickoff(&state);
    }

    #[test]
    fn test_left_goal_scores_for_right() {
        let mut state = new_state();
        let t = state.tuning.clone();
        state.ball.pos = Vec2::new(t.goal_line_x(Side::Left), t.field_height / 2.0);
        state.players[0].pos = Vec2::new(100.0, 100.0);
        state.players[1].vel = Vec2::new(1.0, 1.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score(Side::Right), 1);
        assert_eq!(state.score(Side::Left), 0);
        assert_eq!(
            state.events,
            vec![GameEvent::Goal {
                scorer: Side::Right,
                conceded: Side::Left
            }]
        );
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_kickoff(&state);
    }

    #[test]
    fn test_right_goal_scores_for_left() {
        let mut state = new_state();
        let t = state.tuning.clone();
        state.ball.pos = Vec2::new(t.goal_line_x(Side::Right) - 5.0, t.field_height / 2.0 + 50.0);
        state.ball.vel = Vec2::new(8.0, 0.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score(Side::Left), 1);
        assert_kickoff(&state);
    }

    #[test]
    fn test_outside_mouth_bounces_off_end_line() {
        let mut state = new_state();
        let (top, _) = state.tuning.goal_mouth();
        state.ball.pos = Vec2::new(state.ball.radius + 2.0, top - 40.0);
        state.ball.vel = Vec2::new(-6.0, 0.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score(Side::Right), 0);
        assert!(state.events.contains(&GameEvent::EndLineBounce));
        assert_eq!(state.ball.pos.x, state.ball.radius);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_simultaneous_goals_both_count() {
        // Field narrow enough for the ball to reach both goal lines at once
        let tuning = Tuning {
            field_width: 50.0,
            field_height: 400.0,
            player_radius: 5.0,
            player_margin: 1.0,
            ball_radius: 20.0,
            goal_width: 100.0,
            goal_line_inset: 10.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 1).unwrap();
        state.players[0].pos = Vec2::new(10.0, 20.0);
        state.players[1].pos = Vec2::new(40.0, 20.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score(Side::Left), 1);
        assert_eq!(state.score(Side::Right), 1);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Goal { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_win_condition_is_terminal() {
        let mut state = new_state();
        let goal_x = state.tuning.goal_line_x(Side::Right);
        let mid_y = state.tuning.field_height / 2.0;

        for scored in 1..=state.tuning.win_score {
            assert_eq!(state.phase, MatchPhase::Playing);
            state.ball.pos = Vec2::new(goal_x, mid_y);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.score(Side::Left), scored);
        }

        assert_eq!(state.phase, MatchPhase::Won { winner: Side::Left });
        assert!(state.events.contains(&GameEvent::MatchWon { winner: Side::Left }));

        // Further goals are ignored
        let frozen_tick = state.time_ticks;
        state.ball.pos = Vec2::new(state.tuning.goal_line_x(Side::Left), mid_y);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(Side::Left), state.tuning.win_score);
        assert_eq!(state.score(Side::Right), 0);
        assert_eq!(state.time_ticks, frozen_tick);
        assert!(state.events.is_empty());

        state.reset_match();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.score(Side::Left), 0);
    }

    #[test]
    fn test_kick_event_and_direction() {
        let mut state = new_state();
        // Left player just behind the ball
        let center = state.tuning.center();
        state.players[0].pos = center - Vec2::new(30.0, 0.0);
        let input = TickInput {
            left: Intent {
                right: true,
                kick: true,
                ..Default::default()
            },
            ..Default::default()
        };

        tick(&mut state, &input);

        assert_eq!(state.events, vec![GameEvent::Kick { side: Side::Left }]);
        assert!(state.ball.vel.x > state.tuning.kick_power);
        assert!(state.ball.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_last_contact_wins() {
        let mut state = new_state();
        let center = state.tuning.center();
        state.players[0].pos = center - Vec2::new(25.0, 0.0);
        state.players[1].pos = center + Vec2::new(25.0, 0.0);
        let input = TickInput {
            left: Intent {
                kick: true,
                ..Default::default()
            },
            right: Intent::default(),
        };

        tick(&mut state, &input);

        // The right player's nudge is resolved last and sets the velocity
        assert_eq!(
            state.events,
            vec![
                GameEvent::Kick { side: Side::Left },
                GameEvent::Nudge { side: Side::Right }
            ]
        );
        assert!(state.ball.vel.x < 0.0);
        assert!((state.ball.speed() - state.tuning.nudge_power).abs() < 1e-3);
    }

    #[test]
    fn test_step_returns_snapshot() {
        let mut state = new_state();
        let snap = state.step(&TickInput::default());
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.winner, None);
        assert_eq!(snap.ball.pos, state.tuning.center());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();

        let chase = TickInput {
            left: Intent {
                right: true,
                kick: true,
                ..Default::default()
            },
            right: Intent {
                left: true,
                up: true,
                ..Default::default()
            },
        };

        for i in 0..600 {
            let input = if i % 3 == 0 { TickInput::default() } else { chase };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }
}
