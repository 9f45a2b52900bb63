//! Player movement and physics.
//!
//! The player moves on the floor plane with acceleration and deceleration, can jump and crouch,
//! and is stopped by wall blocks. Every constant is expressed per simulation tick.

use glam::DVec2;

use crate::world::{Aabb, World};

/// Speed gained along the movement direction for each movement input.
pub(crate) const ACCELERATION: f64 = 0.06;
/// Speed lost along each axis on every tick.
pub(crate) const DECELERATION: f64 = 0.02;
/// Upper bound of the planar speed.
pub(crate) const MAX_SPEED: f64 = 0.2;
/// Upward speed given by a jump.
pub(crate) const JUMP_FORCE: f64 = 0.15;
/// Downward acceleration while airborne.
pub(crate) const GRAVITY: f64 = 0.01;
/// Upper bound of the falling speed.
pub(crate) const MAX_FALL_SPEED: f64 = 0.5;
/// Height of the player when standing.
pub(crate) const NORMAL_HEIGHT: f64 = 1.8;
/// Height of the player when crouching.
pub(crate) const CROUCH_HEIGHT: f64 = 0.9;
/// Width and depth of the player's hit box.
pub(crate) const HITBOX_SIZE: f64 = 0.8;
/// Planar distance to the exit marker below which the level is completed.
pub(crate) const EXIT_REACH: f64 = 1.5;
/// Degrees turned by one turning input.
pub(crate) const TURN_STEP: f64 = 15.0;

/// Result of a player update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The player is still looking for the exit.
    Exploring,
    /// The player stands close enough to the exit to leave the level.
    ReachedExit,
}

/// Cardinal direction the player is roughly looking at, as seen from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Facing {
    /// Towards the first row.
    North,
    /// Towards the last column.
    East,
    /// Towards the last row.
    South,
    /// Towards the first column.
    West,
}

/// Posture of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stance {
    /// Full height.
    Standing,
    /// Reduced height.
    Crouching,
}

/// State of the player inside a level.
///
/// The yaw is measured in degrees and grows counter-clockwise as seen from above: `0` looks
/// towards increasing rows and `90` towards increasing columns.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Player {
    /// Centre of the player on the floor plane.
    pub(crate) position: DVec2,
    /// Elevation of the player's feet.
    pub(crate) elevation: f64,
    /// Planar velocity.
    pub(crate) velocity: DVec2,
    /// Vertical velocity, positive upwards.
    pub(crate) vertical_velocity: f64,
    /// Horizontal look direction in degrees, within `[0, 360)`.
    pub(crate) yaw: f64,
    /// Current posture.
    pub(crate) stance: Stance,
    /// Whether a jump is in progress.
    pub(crate) jumping: bool,
    /// Whether the player stands on the floor.
    pub(crate) on_ground: bool,
}

impl Player {
    /// Places a standing player at rest on `position`, with the feet at elevation `floor`.
    pub(crate) const fn spawn(position: DVec2, floor: f64) -> Self {
        Self {
            position,
            elevation: floor,
            velocity: DVec2::ZERO,
            vertical_velocity: 0.0,
            yaw: 0.0,
            stance: Stance::Standing,
            jumping: false,
            on_ground: true,
        }
    }

    /// Current height of the player, depending on the stance.
    pub(crate) const fn height(&self) -> f64 {
        match self.stance {
            Stance::Standing => NORMAL_HEIGHT,
            Stance::Crouching => CROUCH_HEIGHT,
        }
    }

    /// Cardinal direction closest to the current yaw.
    pub(crate) fn facing(&self) -> Facing {
        match self.yaw.rem_euclid(360.0) {
            yaw if yaw < 45.0 || yaw >= 315.0 => Facing::South,
            yaw if yaw < 135.0 => Facing::East,
            yaw if yaw < 225.0 => Facing::North,
            _ => Facing::West,
        }
    }

    /// Hit box of the player when standing at `position`.
    pub(crate) fn hitbox_at(position: DVec2) -> Aabb {
        Aabb::from_center(position, DVec2::splat(HITBOX_SIZE))
    }

    /// Accelerates towards the look direction.
    pub(crate) fn move_forward(&mut self) {
        self.accelerate(direction(self.yaw));
    }

    /// Accelerates away from the look direction.
    pub(crate) fn move_backward(&mut self) {
        self.accelerate(-direction(self.yaw));
    }

    /// Accelerates towards the left hand side.
    pub(crate) fn strafe_left(&mut self) {
        self.accelerate(direction(self.yaw + 90.0));
    }

    /// Accelerates towards the right hand side.
    pub(crate) fn strafe_right(&mut self) {
        self.accelerate(direction(self.yaw - 90.0));
    }

    /// Turns the look direction counter-clockwise.
    pub(crate) fn turn_left(&mut self) {
        self.yaw = (self.yaw + TURN_STEP).rem_euclid(360.0);
    }

    /// Turns the look direction clockwise.
    pub(crate) fn turn_right(&mut self) {
        self.yaw = (self.yaw - TURN_STEP).rem_euclid(360.0);
    }

    /// Starts a jump when standing on the floor and not already jumping.
    pub(crate) fn jump(&mut self) {
        if self.on_ground && !self.jumping {
            self.jumping = true;
            self.on_ground = false;
            self.vertical_velocity = JUMP_FORCE;
        }
    }

    /// Lowers the player to the crouching height.
    pub(crate) fn start_crouch(&mut self) {
        self.stance = Stance::Crouching;
    }

    /// Raises the player back to the standing height.
    pub(crate) fn end_crouch(&mut self) {
        self.stance = Stance::Standing;
    }

    /// Switches between crouching and standing.
    pub(crate) fn toggle_crouch(&mut self) {
        match self.stance {
            Stance::Standing => self.start_crouch(),
            Stance::Crouching => self.end_crouch(),
        }
    }

    /// Advances the player by one tick.
    ///
    /// Applies gravity, moves the player while resolving wall collisions one axis at a time,
    /// keeps the player between floor and ceiling, checks for the exit and finally slows the
    /// planar movement down.
    pub(crate) fn update(&mut self, world: &World) -> Outcome {
        if self.on_ground {
            self.vertical_velocity = 0.0;
        } else {
            self.vertical_velocity = (self.vertical_velocity - GRAVITY).max(-MAX_FALL_SPEED);
        }

        for axis in [DVec2::X, DVec2::Y] {
            let next = self.position + self.velocity * axis;

            if world.collides(&Self::hitbox_at(next)) {
                self.velocity *= DVec2::ONE - axis;
            } else {
                self.position = next;
            }
        }

        self.elevation += self.vertical_velocity;

        let floor = world.floor_height();
        if self.elevation <= floor {
            self.elevation = floor;
            self.vertical_velocity = 0.0;
            self.on_ground = true;
            self.jumping = false;
        }
        if let Some(ceiling) = world.ceiling_height() {
            let limit = ceiling - self.height();
            if self.elevation > limit {
                self.elevation = limit;
                self.vertical_velocity = self.vertical_velocity.min(0.0);
            }
        }

        let outcome = if world
            .exit()
            .is_some_and(|exit| exit.footprint.center().distance(self.position) < EXIT_REACH)
        {
            Outcome::ReachedExit
        } else {
            Outcome::Exploring
        };

        self.velocity = DVec2::new(decelerate(self.velocity.x), decelerate(self.velocity.y));

        outcome
    }

    /// Adds an acceleration impulse along `heading` and caps the resulting speed.
    fn accelerate(&mut self, heading: DVec2) {
        self.velocity = (self.velocity + heading * ACCELERATION).clamp_length_max(MAX_SPEED);
    }
}

/// Unit vector on the floor plane for a yaw in degrees.
fn direction(yaw: f64) -> DVec2 {
    let (sin, cos) = yaw.to_radians().sin_cos();

    DVec2::new(sin, cos)
}

/// Moves a velocity component towards zero by [`DECELERATION`] without crossing zero.
fn decelerate(value: f64) -> f64 {
    if value > 0.0 {
        (value - DECELERATION).max(0.0)
    } else {
        (value + DECELERATION).min(0.0)
    }
}
