//! Particle aging and emission
//!
//! Splashes trail behind moving logs; alligators leave ripples and the odd
//! splash. None of this affects gameplay.

use glam::Vec2;
use rand::Rng;

use super::spawn::{create_ripple, create_splash};
use super::state::{Floater, Particle};
use crate::consts::*;

/// Age every particle by one tick and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        match particle {
            Particle::Splash { pos, vel, life, .. } => {
                *life -= 1.0;
                *pos += *vel;
                vel.y += SPLASH_GRAVITY;
                vel.x *= SPLASH_DAMPING;
            }
            Particle::Ripple {
                radius,
                max_radius,
                life,
                max_life,
                alpha,
                ..
            } => {
                *life -= 1.0;
                *radius += (*max_radius - *radius) * RIPPLE_EASE;
                *alpha = if *max_life > 0.0 {
                    (*life / *max_life).max(0.0) * RIPPLE_BASE_ALPHA
                } else {
                    0.0
                };
            }
        }
    }
    particles.retain(|p| !p.is_dead());
}

/// Maybe kick up a splash behind a drifting log
pub fn emit_log_wake(log: &Floater, particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    if rng.random_bool(LOG_SPLASH_CHANCE) {
        let at = Vec2::new(log.pos.x + log.size.x - 5.0, log.pos.y + log.size.y + 2.0);
        particles.extend(create_splash(at, 0.5, rng));
    }
}

/// Maybe leave a ripple (and rarely a splash) behind a swimming alligator
pub fn emit_alligator_wake(gator: &Floater, particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    if rng.random_bool(ALLIGATOR_RIPPLE_CHANCE) {
        let at = Vec2::new(
            gator.pos.x + gator.size.x / 2.0,
            gator.pos.y + gator.size.y + 3.0,
        );
        particles.push(create_ripple(at, rng));

        if rng.random_bool(ALLIGATOR_SPLASH_CHANCE) {
            let at = Vec2::new(
                gator.pos.x + gator.size.x - 10.0,
                gator.pos.y + gator.size.y,
            );
            particles.extend(create_splash(at, 0.3, rng));
        }
    }
}
