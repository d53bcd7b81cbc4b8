//! Player physics: jump, duck, gravity
//!
//! Velocity uses screen convention (negative = rising) while `offset` is the
//! height above ground, so integration subtracts.

use glam::Vec2;

use super::collision::Aabb;
use super::config::RunnerConfig;
use super::state::{Player, Posture};

/// Offsets at or below this count as standing on the ground
pub const GROUND_EPSILON: f32 = 0.01;

impl Player {
    pub fn is_grounded(&self) -> bool {
        self.offset <= GROUND_EPSILON
    }

    pub fn is_airborne(&self) -> bool {
        !self.is_grounded() || self.posture == Posture::Jumping
    }

    /// Current collision height
    pub fn height(&self, config: &RunnerConfig) -> f32 {
        if self.posture == Posture::Ducking {
            config.duck_height
        } else {
            config.player_height
        }
    }

    /// Collision box before any tolerance buffer
    pub fn hitbox(&self, config: &RunnerConfig) -> Aabb {
        let min = Vec2::new(config.player_x, self.offset);
        Aabb::new(min, Vec2::new(config.player_width, self.height(config)))
    }

    pub fn center(&self, config: &RunnerConfig) -> Vec2 {
        self.hitbox(config).center()
    }
}

/// Start a jump. No-op (returns false) unless grounded and not already jumping.
///
/// A jump wins over a held duck.
pub fn jump(player: &mut Player, config: &RunnerConfig) -> bool {
    if !player.is_grounded() || player.posture == Posture::Jumping {
        return false;
    }
    player.velocity = config.jump_force;
    player.posture = Posture::Jumping;
    true
}

/// Press or release duck. Posture only changes on the ground.
pub fn set_duck(player: &mut Player, pressed: bool) {
    player.duck_held = pressed;
    if player.is_airborne() {
        return;
    }
    player.posture = if pressed {
        Posture::Ducking
    } else {
        Posture::Standing
    };
}

/// Advance vertical motion by one normalized step
pub fn integrate(player: &mut Player, config: &RunnerConfig, step: f32) {
    if step <= 0.0 {
        return;
    }
    // Resting on the ground
    if player.is_grounded() && player.velocity >= 0.0 {
        land(player);
        return;
    }

    player.velocity += config.gravity * step;
    player.offset -= player.velocity * step;

    if player.offset <= 0.0 {
        land(player);
    }
}

fn land(player: &mut Player) {
    player.offset = 0.0;
    player.velocity = 0.0;
    player.posture = if player.duck_held {
        Posture::Ducking
    } else {
        Posture::Standing
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_from_ground() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        assert!(jump(&mut player, &config));
        assert_eq!(player.posture, Posture::Jumping);
        assert_eq!(player.velocity, config.jump_force);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        jump(&mut player, &config);
        integrate(&mut player, &config, 1.0);
        let velocity = player.velocity;
        assert!(!jump(&mut player, &config));
        assert_eq!(player.velocity, velocity);
    }

    #[test]
    fn test_jump_arc_lands_standing() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        jump(&mut player, &config);

        let mut peak: f32 = 0.0;
        let mut frames = 0;
        loop {
            integrate(&mut player, &config, 1.0);
            frames += 1;
            peak = peak.max(player.offset);
            assert!(player.offset >= 0.0);
            if player.offset == 0.0 {
                break;
            }
            assert!(frames < 1000, "never landed");
        }

        assert_eq!(player.posture, Posture::Standing);
        assert_eq!(player.velocity, 0.0);
        // v^2 / 2g = 144 / 1.2
        assert!(peak > 100.0 && peak < 130.0, "peak {peak}");
    }

    #[test]
    fn test_duck_on_ground_shrinks_hitbox() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        set_duck(&mut player, true);
        assert_eq!(player.posture, Posture::Ducking);
        assert_eq!(player.hitbox(&config).size().y, config.duck_height);

        set_duck(&mut player, false);
        assert_eq!(player.posture, Posture::Standing);
        assert_eq!(player.hitbox(&config).size().y, config.player_height);
    }

    #[test]
    fn test_duck_ignored_mid_air() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        jump(&mut player, &config);
        integrate(&mut player, &config, 1.0);
        set_duck(&mut player, true);
        assert_eq!(player.posture, Posture::Jumping);
        assert!(player.duck_held);
    }

    #[test]
    fn test_held_duck_resumes_on_landing() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        jump(&mut player, &config);
        integrate(&mut player, &config, 1.0);
        set_duck(&mut player, true);
        while player.offset > 0.0 {
            integrate(&mut player, &config, 1.0);
        }
        assert_eq!(player.posture, Posture::Ducking);
    }

    #[test]
    fn test_jump_takes_precedence_over_duck() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        set_duck(&mut player, true);
        assert!(jump(&mut player, &config));
        assert_eq!(player.posture, Posture::Jumping);
        assert_eq!(player.height(&config), config.player_height);
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        for _ in 0..10 {
            integrate(&mut player, &config, 1.0);
        }
        assert_eq!(player, Player::default());
    }

    #[test]
    fn test_zero_step_does_not_move() {
        let config = RunnerConfig::default();
        let mut player = Player::default();
        jump(&mut player, &config);
        integrate(&mut player, &config, 0.0);
        assert_eq!(player.offset, 0.0);
        assert_eq!(player.posture, Posture::Jumping);
    }
}
