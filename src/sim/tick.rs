//! Per-frame simulation tick
//!
//! One call per displayed frame. Order within a tick:
//! movement (player, logs, alligators, clouds) -> collision rules ->
//! particles -> session timers.

use super::collision::{Outcome, resolve_collisions};
use super::geometry::Rect;
use super::input::{Key, KeySet, TickInput};
use super::particles::{emit_alligator_wake, emit_log_wake, update_particles};
use super::spawn::{
    alligator_spawn_interval, create_alligator, create_cloud, create_log, log_spawn_interval,
    next_cloud_interval,
};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame
///
/// `now_ms` is the wall clock in milliseconds; it only drives the loading
/// bar, the run timer and the status/announcement delays.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    match state.phase {
        GamePhase::Loading => {
            state.loading.begin(now_ms);
            if state.loading.is_complete(now_ms) {
                state.phase = GamePhase::Title;
                log::info!("Loading complete");
            }
            return;
        }
        GamePhase::Title if input.started_any() => state.start(now_ms),
        _ => {}
    }

    if input.pressed.contains(Key::SkipToLevelThree) {
        state.skip_to_level_three(now_ms);
    }

    let was_running = state.is_running();
    if was_running {
        state.time_ticks += 1;
        update_player(state, input.held);
        update_logs(state);
        update_alligators(state);
    }
    update_clouds(state);

    if was_running {
        match resolve_collisions(state) {
            Some(Outcome::Died(cause)) => state.game_over(cause),
            Some(Outcome::ReachedFlag) => state.next_level(now_ms),
            None => {}
        }
        update_particles(&mut state.particles);
    }

    state.expire_status(now_ms);
    state.expire_announcement(now_ms);
}

/// Input, gravity and static platforms for the player
///
/// Clears `on_log` at the end; the collision pass re-attaches the player to a
/// log, so a rider spends each tick briefly falling before being snapped back.
/// `on_ground` stays set until the player jumps or respawns.
pub fn update_player(state: &mut GameState, held: KeySet) {
    let geometry = state.geometry;
    let player = &mut state.player;

    if held.contains(Key::Left) && player.pos.x > 0.0 {
        player.pos.x -= player.speed;
    }
    if held.contains(Key::Right) && player.pos.x < geometry.width - player.size.x {
        player.pos.x += player.speed;
    }

    if held.contains(Key::Jump) && (player.on_ground || player.on_log) {
        player.velocity_y = -player.jump_power;
        player.on_ground = false;
        player.on_log = false;
    }

    player.velocity_y += player.gravity;
    player.pos.y += player.velocity_y;

    let bank_top = geometry.river_top;
    if (geometry.on_start_bank(player.pos.x) || geometry.on_end_bank(player.pos.x))
        && player.feet() >= bank_top
    {
        player.land_on(bank_top);
        player.on_ground = true;
    }

    let island = geometry.island;
    if player.rect().overlaps_x(&island)
        && Rect::feet_within(player.feet(), &island, 0.0, ISLAND_LANDING_TOLERANCE)
    {
        player.land_on(island.top());
        player.on_ground = true;
    }

    let ground_top = geometry.ground_top();
    if player.feet() >= ground_top {
        player.land_on(ground_top);
        player.on_ground = true;
    }

    player.on_log = false;
}

/// Drift logs, kick up wakes, prune and spawn
pub fn update_logs(state: &mut GameState) {
    for log in state.logs.iter_mut() {
        log.drift();
        emit_log_wake(log, &mut state.particles, &mut state.rng);
    }
    let before = state.logs.len();
    state.logs.retain(|log| !log.is_gone());
    if state.logs.len() < before {
        log::debug!("Pruned {} logs", before - state.logs.len());
    }

    state.spawn.log += 1;
    if state.spawn.log >= log_spawn_interval(state.level) {
        let fresh = create_log(state.level, &state.geometry, &mut state.rng);
        log::debug!("Spawned log: width {:.0}, speed {:.2}", fresh.size.x, fresh.speed);
        state.logs.push(fresh);
        state.spawn.log = 0;
    }
}

/// Drift alligators, leave ripples, prune and spawn (level 3+)
pub fn update_alligators(state: &mut GameState) {
    for gator in state.alligators.iter_mut() {
        gator.drift();
        emit_alligator_wake(gator, &mut state.particles, &mut state.rng);
    }
    state.alligators.retain(|gator| !gator.is_gone());

    let Some(interval) = alligator_spawn_interval(state.level) else {
        return;
    };
    state.spawn.alligator += 1;
    if state.spawn.alligator >= interval {
        if let Some(gator) = create_alligator(state.level, &state.geometry, &mut state.rng) {
            log::debug!("Spawned alligator: speed {:.2}", gator.speed);
            state.alligators.push(gator);
        }
        state.spawn.alligator = 0;
    }
}

/// Decorative clouds; keep drifting on the title and game-over screens
pub fn update_clouds(state: &mut GameState) {
    if !state.settings.clouds_enabled {
        return;
    }
    for cloud in state.clouds.iter_mut() {
        cloud.drift();
    }
    state.clouds.retain(|cloud| !cloud.is_gone());

    state.spawn.cloud += 1;
    if state.spawn.cloud >= state.spawn.cloud_interval {
        let cloud = create_cloud(&state.geometry, &mut state.rng);
        state.clouds.push(cloud);
        state.spawn.cloud = 0;
        state.spawn.cloud_interval = next_cloud_interval(&mut state.rng);
    }
}
