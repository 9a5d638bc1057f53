use crate::collision::resolve_landings;
use crate::entity::{Ball, Color, Platform, BALL_RADIUS};
use crate::settings::Physics;

const BALL_SPAWN_Y: f64 = 50.0;
const PLATFORM_HEIGHT: f64 = 20.0;
const LEDGE_WIDTH: f64 = 200.0;

/// Staircase of ledges: (left edge, distance of the top edge from the viewport bottom)
const LEDGES: [(f64, f64); 4] = [(100.0, 150.0), (400.0, 250.0), (700.0, 350.0), (1000.0, 450.0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The ball and the platforms it plays on.
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub platforms: Vec<Platform>,
}

impl World {
    /// Lay out a fresh world for `viewport`: the ball centred near the top,
    /// a full-width ground, then the ledges ascending left to right.
    pub fn build(viewport: Viewport) -> Self {
        let ball = Ball::new(viewport.width / 2.0, BALL_SPAWN_Y, BALL_RADIUS, Color::Blue);

        let mut platforms = Vec::with_capacity(LEDGES.len() + 1);
        platforms.push(Platform::new(
            0.0,
            viewport.height - PLATFORM_HEIGHT,
            viewport.width,
            PLATFORM_HEIGHT,
            Color::Green,
        ));
        for (x, rise) in LEDGES {
            platforms.push(Platform::new(
                x,
                viewport.height - rise,
                LEDGE_WIDTH,
                PLATFORM_HEIGHT,
                Color::Gray,
            ));
        }

        Self { ball, platforms }
    }

    /// One simulation frame.
    pub fn step(&mut self, physics: &Physics, viewport: Viewport) -> Option<usize> {
        self.ball.update(physics, viewport.width);
        resolve_landings(&mut self.ball, &self.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Direction, Position};
    use proptest::prelude::*;

    #[test]
    fn test_build_layout() {
        let world = World::build(Viewport::new(800.0, 600.0));

        assert_eq!(world.ball.position, Position::new(400.0, 50.0));
        assert_eq!(world.ball.radius, 20.0);
        assert_eq!(world.ball.velocity, (0.0, 0.0));
        assert_eq!(world.platforms.len(), 5);

        let ground = &world.platforms[0];
        assert_eq!(ground.position, Position::new(0.0, 580.0));
        assert_eq!(ground.width, 800.0);
        assert_eq!(ground.color, Color::Green);

        let tops: Vec<f64> = world.platforms[1..].iter().map(|p| p.position.y).collect();
        assert_eq!(tops, vec![450.0, 350.0, 250.0, 150.0]);
        let lefts: Vec<f64> = world.platforms[1..].iter().map(|p| p.position.x).collect();
        assert_eq!(lefts, vec![100.0, 400.0, 700.0, 1000.0]);
    }

    #[test]
    fn test_ball_settles_on_ledge_below_spawn() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = World::build(viewport);
        world.ball.airborne = true;

        let mut landed = None;
        for _ in 0..200 {
            if let Some(i) = world.step(&Physics::default(), viewport) {
                landed = Some(i);
            }
        }

        // Spawn column x=400 overhangs the second ledge (400..600, top 350)
        assert_eq!(landed, Some(2));
        assert_eq!(world.ball.bottom(), 350.0);
        assert!(!world.ball.airborne);
    }

    #[test]
    fn test_ball_settles_on_ground_in_open_column() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = World::build(viewport);
        world.ball.position.x = 350.0;

        for _ in 0..200 {
            world.step(&Physics::default(), viewport);
        }

        assert_eq!(world.ball.bottom(), 580.0);
    }

    #[test]
    fn test_jump_then_land_again() {
        let viewport = Viewport::new(800.0, 600.0);
        let physics = Physics::default();
        let mut world = World::build(viewport);
        for _ in 0..200 {
            world.step(&physics, viewport);
        }

        world.ball.steer(Direction::Up, &physics);
        assert!(world.ball.airborne);
        world.step(&physics, viewport);
        assert!(world.ball.bottom() < 350.0);

        for _ in 0..100 {
            world.step(&physics, viewport);
        }
        assert!(!world.ball.airborne);
        assert_eq!(world.ball.bottom(), 350.0);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_between_walls(
            moves in prop::collection::vec(
                prop_oneof![Just(Direction::Left), Just(Direction::Right), Just(Direction::Up)],
                1..60,
            ),
            width in 200.0f64..1600.0,
        ) {
            let viewport = Viewport::new(width, 600.0);
            let physics = Physics::default();
            let mut world = World::build(viewport);

            for direction in moves {
                world.ball.steer(direction, &physics);
                for _ in 0..5 {
                    world.step(&physics, viewport);
                    prop_assert!(world.ball.position.x >= world.ball.radius);
                    prop_assert!(world.ball.position.x <= width - world.ball.radius);
                }
            }
        }
    }
}
