use crate::entity::{Ball, Platform};

/// Resolve the ball against `platforms` in order.
///
/// Only landings are handled: a falling ball whose top is still above the
/// platform's top gets snapped onto it. Side and underside contacts pass
/// through untouched. Returns the index of the platform landed on.
pub fn resolve_landings(ball: &mut Ball, platforms: &[Platform]) -> Option<usize> {
    let mut landed_on = None;

    for (i, platform) in platforms.iter().enumerate() {
        let bounds = platform.bounds();
        if !ball.bounds().overlaps(&bounds) {
            continue;
        }

        if ball.velocity.1 > 0.0 && ball.top() < bounds.y {
            ball.velocity.1 = 0.0;
            ball.position.y = bounds.y - ball.radius;
            ball.airborne = false;
            // vy is now zero so no later platform can claim the landing
            landed_on.get_or_insert(i);
        }
    }

    landed_on
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Color, BALL_RADIUS};
    use proptest::prelude::*;

    fn ledge() -> Platform {
        Platform::new(100.0, 300.0, 200.0, 20.0, Color::Gray)
    }

    proptest! {
        #[test]
        fn prop_falling_ball_lands_on_top(
            x in 90.0f64..310.0,
            // Bottom edge between the platform top and just above its middle
            sink in 0.1f64..19.9,
            vy in 0.1f64..20.0,
        ) {
            let platform = ledge();
            let mut ball = Ball::new(x, 300.0 - BALL_RADIUS + sink, BALL_RADIUS, Color::Blue);
            ball.velocity.1 = vy;
            ball.airborne = true;

            let landed = resolve_landings(&mut ball, &[platform.clone()]);

            prop_assert_eq!(landed, Some(0));
            prop_assert_eq!(ball.velocity.1, 0.0);
            prop_assert_eq!(ball.bottom(), platform.position.y);
            prop_assert!(!ball.airborne);
        }

        #[test]
        fn prop_rising_ball_passes_through(
            x in 90.0f64..310.0,
            y in 285.0f64..335.0,
            vy in -20.0f64..0.0,
        ) {
            let mut ball = Ball::new(x, y, BALL_RADIUS, Color::Blue);
            ball.velocity.1 = vy;
            ball.airborne = true;
            let before = ball.clone();

            prop_assert_eq!(resolve_landings(&mut ball, &[ledge()]), None);
            prop_assert_eq!(ball, before);
        }
    }

    #[test]
    fn test_no_overlap_no_change() {
        let mut ball = Ball::new(50.0, 50.0, BALL_RADIUS, Color::Blue);
        ball.velocity = (1.0, 4.0);
        let before = ball.clone();
        assert_eq!(resolve_landings(&mut ball, &[ledge()]), None);
        assert_eq!(ball, before);
    }

    #[test]
    fn test_side_contact_is_not_resolved() {
        // Ball overlapping the left end with its top below the platform top
        let mut ball = Ball::new(95.0, 325.0, BALL_RADIUS, Color::Blue);
        ball.velocity = (5.0, 3.0);
        let before = ball.clone();
        assert_eq!(resolve_landings(&mut ball, &[ledge()]), None);
        assert_eq!(ball, before);
    }

    #[test]
    fn test_first_platform_wins() {
        let first = Platform::new(0.0, 300.0, 400.0, 20.0, Color::Green);
        let second = Platform::new(0.0, 305.0, 400.0, 20.0, Color::Gray);
        let mut ball = Ball::new(200.0, 290.0, BALL_RADIUS, Color::Blue);
        ball.velocity.1 = 6.0;

        let landed = resolve_landings(&mut ball, &[first, second]);

        assert_eq!(landed, Some(0));
        assert_eq!(ball.bottom(), 300.0);
    }
}
