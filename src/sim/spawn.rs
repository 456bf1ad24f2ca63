//! Entity factories
//!
//! Pure functions of the current level and an injected RNG. Every draw is an
//! independent uniform sample.

use glam::Vec2;
use rand::Rng;

use super::geometry::Geometry;
use super::state::{Cloud, CloudPart, Floater, FloaterKind, Particle};
use crate::consts::*;

/// Splash droplet color (sky blue)
pub const SPLASH_COLOR: u32 = 0x87_CE_EB;

/// Ticks between log spawns at `level`
pub fn log_spawn_interval(level: u32) -> u32 {
    if level <= 1 {
        LOG_SPAWN_INTERVAL_LEVEL_ONE
    } else {
        LOG_SPAWN_INTERVAL
            .saturating_sub((level - 2) * 5)
            .max(LOG_SPAWN_INTERVAL_MIN)
    }
}

/// Ticks between alligator spawns at `level`, or `None` before alligators appear
pub fn alligator_spawn_interval(level: u32) -> Option<u32> {
    (level >= ALLIGATOR_FIRST_LEVEL).then(|| {
        ALLIGATOR_SPAWN_INTERVAL
            .saturating_sub((level - ALLIGATOR_FIRST_LEVEL) * 15)
            .max(ALLIGATOR_SPAWN_INTERVAL_MIN)
    })
}

/// Ticks until the next cloud, re-rolled after each spawn
pub fn next_cloud_interval(rng: &mut impl Rng) -> u32 {
    rng.random_range(200..600)
}

/// A new log entering at the right edge of the river
pub fn create_log(level: u32, geometry: &Geometry, rng: &mut impl Rng) -> Floater {
    // Level 1 gets slower, longer logs
    let (base_speed, max_speed, width) = if level <= 1 {
        (0.8, 1.8, rng.random_range(60.0..140.0))
    } else {
        let base = 1.0 + (level - 2) as f32 * 0.3;
        (base, base + 2.0, rng.random_range(40.0..100.0))
    };
    let speed = rng.random_range(base_speed..max_speed);
    let lanes = [
        geometry.river_top - 10.0,
        geometry.river_top - 5.0,
        geometry.river_top,
    ];
    let y = lanes[rng.random_range(0..lanes.len())];

    Floater {
        kind: FloaterKind::Log,
        pos: Vec2::new(geometry.width, y),
        size: Vec2::new(width, LOG_HEIGHT),
        speed,
        color: LOG_COLOR,
    }
}

/// A new alligator, or `None` before alligators appear
pub fn create_alligator(level: u32, geometry: &Geometry, rng: &mut impl Rng) -> Option<Floater> {
    if level < ALLIGATOR_FIRST_LEVEL {
        return None;
    }

    let base_speed = 0.5 + (level - ALLIGATOR_FIRST_LEVEL) as f32 * 0.2;
    let speed = rng.random_range(base_speed..base_speed + 1.0);
    let lanes = [
        geometry.river_top - 5.0,
        geometry.river_top,
        geometry.river_top + 5.0,
    ];
    let y = lanes[rng.random_range(0..lanes.len())];

    Some(Floater {
        kind: FloaterKind::Alligator,
        pos: Vec2::new(geometry.width, y),
        size: Vec2::new(ALLIGATOR_WIDTH, ALLIGATOR_HEIGHT),
        speed,
        color: ALLIGATOR_COLOR,
    })
}

/// An irregular cloud built from 3-6 overlapping rectangles
pub fn create_cloud(geometry: &Geometry, rng: &mut impl Rng) -> Cloud {
    let base_width: f32 = rng.random_range(60.0..100.0);
    let base_height: f32 = rng.random_range(20.0..35.0);
    let speed = rng.random_range(0.2..0.5);
    let y = rng.random_range(20.0..100.0);

    let part_count = rng.random_range(3..=6);
    let parts = (0..part_count)
        .map(|_| CloudPart {
            offset: Vec2::new(
                (rng.random::<f32>() - 0.5) * base_width * 0.8,
                (rng.random::<f32>() - 0.5) * base_height * 0.6,
            ),
            size: Vec2::new(
                base_width * rng.random_range(0.6..1.4),
                base_height * rng.random_range(0.5..1.5),
            ),
        })
        .collect();

    Cloud {
        pos: Vec2::new(geometry.width + CLOUD_SPAWN_OFFSET, y),
        speed,
        parts,
    }
}

/// Water droplets kicked up at `at`; `intensity` scales count and velocity
pub fn create_splash(at: Vec2, intensity: f32, rng: &mut impl Rng) -> Vec<Particle> {
    let extra = rng.random_range(0..2u32) as f32 * intensity;
    let count = (1.0 + extra).ceil() as usize;

    (0..count)
        .map(|_| {
            let life = rng.random_range(20.0..35.0);
            Particle::Splash {
                pos: at + Vec2::new(rng.random_range(-5.0..5.0), rng.random_range(-2.0..3.0)),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * intensity,
                    -rng.random::<f32>() * 1.5 * intensity,
                ),
                life,
                max_life: life,
                size: rng.random_range(1.0..2.0),
                color: SPLASH_COLOR,
                opacity: rng.random_range(0.3..0.5),
            }
        })
        .collect()
}

/// A single expanding ring at `at`
pub fn create_ripple(at: Vec2, rng: &mut impl Rng) -> Particle {
    Particle::Ripple {
        pos: at,
        radius: 1.0,
        max_radius: rng.random_range(8.0..13.0),
        life: RIPPLE_LIFE,
        max_life: RIPPLE_LIFE,
        alpha: 0.4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_intervals() {
        assert_eq!(log_spawn_interval(1), 110);
        assert_eq!(log_spawn_interval(2), 120);
        assert_eq!(log_spawn_interval(6), 100);
        assert_eq!(log_spawn_interval(40), 50);

        assert_eq!(alligator_spawn_interval(2), None);
        assert_eq!(alligator_spawn_interval(3), Some(180));
        assert_eq!(alligator_spawn_interval(6), Some(135));
        assert_eq!(alligator_spawn_interval(9), Some(120));
    }

    #[test]
    fn test_no_alligators_before_level_three() {
        let g = Geometry::default();
        let mut rng = rng();
        assert!(create_alligator(1, &g, &mut rng).is_none());
        assert!(create_alligator(2, &g, &mut rng).is_none());
        assert!(create_alligator(3, &g, &mut rng).is_some());
    }

    #[test]
    fn test_log_ranges_scale_with_level() {
        let g = Geometry::default();
        let mut rng = rng();
        for _ in 0..200 {
            let log = create_log(1, &g, &mut rng);
            assert_eq!(log.pos.x, g.width);
            assert!((60.0..140.0).contains(&log.size.x));
            assert!((0.8..1.8).contains(&log.speed));
            assert!([270.0, 275.0, 280.0].contains(&log.pos.y));

            let log = create_log(6, &g, &mut rng);
            assert!((40.0..100.0).contains(&log.size.x));
            // base 1.0 + 4 * 0.3
            assert!(log.speed >= 2.2 - 1e-5 && log.speed < 4.2 + 1e-5);
        }
    }

    #[test]
    fn test_alligator_speed_scales_with_level() {
        let g = Geometry::default();
        let mut rng = rng();
        for _ in 0..200 {
            let gator = create_alligator(5, &g, &mut rng).unwrap();
            assert_eq!(gator.kind, FloaterKind::Alligator);
            assert!(gator.speed >= 0.9 - 1e-5 && gator.speed < 1.9 + 1e-5);
            assert!([275.0, 280.0, 285.0].contains(&gator.pos.y));
        }
    }

    #[test]
    fn test_cloud_shape() {
        let g = Geometry::default();
        let mut rng = rng();
        for _ in 0..100 {
            let cloud = create_cloud(&g, &mut rng);
            assert_eq!(cloud.pos.x, g.width + 50.0);
            assert!((3..=6).contains(&cloud.parts.len()));
            assert!(cloud.speed >= 0.2 && cloud.speed < 0.5);
        }
    }

    #[test]
    fn test_splash_count_and_direction() {
        let mut rng = rng();
        for _ in 0..100 {
            let drops = create_splash(Vec2::new(100.0, 100.0), 0.5, &mut rng);
            assert!((1..=2).contains(&drops.len()));
            for drop in drops {
                match drop {
                    Particle::Splash { vel, life, max_life, .. } => {
                        assert!(vel.y <= 0.0);
                        assert_eq!(life, max_life);
                    }
                    Particle::Ripple { .. } => panic!("expected splash"),
                }
            }
        }
    }
}
