//! Collision rules
//!
//! Turns spatial overlap between the player and the world into outcomes.
//! Checks run in a fixed priority order and the first terminal outcome wins:
//! alligator, log riding, island, drowning, flag, falling off the bottom.

use super::geometry::Rect;
use super::state::{DeathCause, Floater, GameState, Player};
use crate::consts::*;

/// Terminal result of a tick's collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Died(DeathCause),
    ReachedFlag,
}

/// Run the collision rules for one tick
///
/// May snap the player onto a log and carry them along with it. Returns the
/// first terminal outcome, if any.
pub fn resolve_collisions(state: &mut GameState) -> Option<Outcome> {
    let geometry = state.geometry;
    let player = &mut state.player;

    if touching_alligator(player, &state.alligators) {
        return Some(Outcome::Died(DeathCause::Alligator));
    }

    let riding = ride_logs(player, &state.logs);
    let on_island = standing_on_island(player, &geometry.island);

    let rect = player.rect();
    let in_river_band = rect.bottom() > geometry.river_top && rect.top() < geometry.river_bottom;
    if in_river_band && geometry.in_water_span(rect.left()) && !riding && !on_island {
        return Some(Outcome::Died(DeathCause::Drowned));
    }

    if rect.touches(&geometry.flag) {
        return Some(Outcome::ReachedFlag);
    }

    if rect.top() > geometry.height {
        return Some(Outcome::Died(DeathCause::FellOffBottom));
    }

    None
}

/// Any strict box overlap with an alligator
pub fn touching_alligator(player: &Player, alligators: &[Floater]) -> bool {
    let rect = player.rect();
    alligators.iter().any(|gator| rect.overlaps(&gator.rect()))
}

/// Attach the player to the first log under their feet
///
/// Snaps the feet to the log top, zeroes vertical velocity, and carries the
/// player left by the log's speed (never past x = 0). At most one log carries
/// the player per tick.
pub fn ride_logs(player: &mut Player, logs: &[Floater]) -> bool {
    let rect = player.rect();
    let feet = player.feet();

    let Some(log) = logs.iter().find(|log| {
        let surface = log.rect();
        rect.overlaps_x(&surface)
            && Rect::feet_within(feet, &surface, LOG_TOLERANCE_ABOVE, LOG_TOLERANCE_BELOW)
    }) else {
        return false;
    };

    player.land_on(log.pos.y);
    player.on_log = true;
    player.pos.x = (player.pos.x - log.speed).max(0.0);
    true
}

/// The island is a safe zone: no drowning while standing on it
pub fn standing_on_island(player: &Player, island: &Rect) -> bool {
    player.rect().overlaps_x(island)
        && Rect::feet_within(player.feet(), island, 0.0, ISLAND_SAFE_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{FloaterKind, GamePhase};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(Settings::classic(), 1);
        state.phase = GamePhase::Playing;
        state
    }

    fn floater(kind: FloaterKind, x: f32, y: f32, width: f32, speed: f32) -> Floater {
        Floater {
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, 15.0),
            speed,
            color: 0,
        }
    }

    #[test]
    fn test_safe_on_start_bank() {
        let mut state = playing();
        state.player.land_on(state.geometry.river_top);
        assert_eq!(resolve_collisions(&mut state), None);
    }

    #[test]
    fn test_drowning_in_open_water() {
        let mut state = playing();
        state.player.pos = Vec2::new(200.0, state.geometry.river_top - 20.0);
        assert_eq!(
            resolve_collisions(&mut state),
            Some(Outcome::Died(DeathCause::Drowned))
        );
    }

    #[test]
    fn test_log_rescues_from_water() {
        let mut state = playing();
        let top = state.geometry.river_top - 5.0;
        state.logs.push(floater(FloaterKind::Log, 180.0, top, 80.0, 1.5));
        state.player.pos = Vec2::new(200.0, top - 28.0);

        assert_eq!(resolve_collisions(&mut state), None);
        assert!(state.player.on_log);
        assert_eq!(state.player.feet(), top);
        assert_eq!(state.player.pos.x, 198.5);
        assert_eq!(state.player.velocity_y, 0.0);
    }

    #[test]
    fn test_only_first_log_carries() {
        let mut state = playing();
        let top = state.geometry.river_top;
        state.logs.push(floater(FloaterKind::Log, 190.0, top, 80.0, 1.0));
        state.logs.push(floater(FloaterKind::Log, 195.0, top, 80.0, 2.0));
        state.player.pos = Vec2::new(200.0, top - 30.0);

        resolve_collisions(&mut state);
        assert_eq!(state.player.pos.x, 199.0);
    }

    #[test]
    fn test_log_carry_clamps_at_left_edge() {
        let mut state = playing();
        let top = state.geometry.river_top;
        state.logs.push(floater(FloaterKind::Log, -20.0, top, 60.0, 1.8));
        state.player.pos = Vec2::new(1.0, top - 30.0);

        resolve_collisions(&mut state);
        assert!(state.player.on_log);
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_alligator_beats_log() {
        let mut state = playing();
        let top = state.geometry.river_top;
        state.logs.push(floater(FloaterKind::Log, 180.0, top, 80.0, 1.0));
        state.alligators.push(Floater {
            size: Vec2::new(40.0, 12.0),
            ..floater(FloaterKind::Alligator, 195.0, top - 5.0, 40.0, 1.0)
        });
        state.player.pos = Vec2::new(200.0, top - 30.0);

        assert_eq!(
            resolve_collisions(&mut state),
            Some(Outcome::Died(DeathCause::Alligator))
        );
        // Short-circuits before the log check
        assert!(!state.player.on_log);
        assert_eq!(state.player.pos.x, 200.0);
    }

    #[test]
    fn test_island_is_safe() {
        let mut state = playing();
        let island = state.geometry.island;
        state.player.pos = Vec2::new(island.left() + 10.0, island.top() - 30.0 + 3.0);
        assert!(standing_on_island(&state.player, &island));
        assert_eq!(resolve_collisions(&mut state), None);
    }

    #[test]
    fn test_flag_reached() {
        let mut state = playing();
        let flag = state.geometry.flag;
        state.player.pos = Vec2::new(flag.left() - 10.0, state.geometry.river_top - 30.0);
        assert_eq!(resolve_collisions(&mut state), Some(Outcome::ReachedFlag));
    }

    #[test]
    fn test_fell_off_bottom() {
        let mut state = playing();
        // Over the start bank so the water check does not fire first
        state.player.pos = Vec2::new(10.0, state.geometry.height + 1.0);
        assert_eq!(
            resolve_collisions(&mut state),
            Some(Outcome::Died(DeathCause::FellOffBottom))
        );

        state.player.pos.y = state.geometry.height;
        assert_eq!(resolve_collisions(&mut state), None);
    }
}
