//! Timed power-up effects
//!
//! Buffs count down in real milliseconds, not normalized steps, so a five
//! second shield lasts five seconds at any frame rate.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

/// A single timed effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub active: bool,
    pub remaining_ms: f32,
}

impl Buff {
    /// Start or refresh the buff. Refreshing resets, never stacks.
    ///
    /// Pickups run before the countdown within a tick, so a buff collected
    /// this frame already loses that frame's `real_ms`.
    pub fn activate(&mut self, duration_ms: f32) {
        self.active = true;
        self.remaining_ms = duration_ms;
    }

    /// Count down by `real_ms`; expires within the same call
    pub fn tick(&mut self, real_ms: f32) {
        if !self.active {
            return;
        }
        self.remaining_ms -= real_ms.max(0.0);
        if self.remaining_ms <= 0.0 {
            self.active = false;
            self.remaining_ms = 0.0;
        }
    }
}

/// The buffs a run can hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuffs {
    pub shield: Buff,
    pub magnet: Buff,
}

impl ActiveBuffs {
    pub fn tick(&mut self, real_ms: f32) {
        let shield_was_active = self.shield.active;
        let magnet_was_active = self.magnet.active;

        self.shield.tick(real_ms);
        self.magnet.tick(real_ms);

        if shield_was_active && !self.shield.active {
            log::debug!("Shield expired");
        }
        if magnet_was_active && !self.magnet.active {
            log::debug!("Magnet expired");
        }
    }

    /// Timed buff backing a power-up kind (Star is instant)
    pub fn get_mut(&mut self, kind: PowerUpKind) -> Option<&mut Buff> {
        match kind {
            PowerUpKind::Shield => Some(&mut self.shield),
            PowerUpKind::Magnet => Some(&mut self.magnet),
            PowerUpKind::Star => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buff_expires_on_crossing_tick() {
        let mut buff = Buff::default();
        buff.activate(5000.0);

        // 100 frames of 50ms = 5000ms exactly
        for _ in 0..99 {
            buff.tick(50.0);
            assert!(buff.active);
        }
        buff.tick(49.0);
        assert!(buff.active);
        assert!((buff.remaining_ms - 1.0).abs() < 0.01);

        // Crossing to 5001ms total deactivates immediately
        buff.tick(2.0);
        assert!(!buff.active);
        assert_eq!(buff.remaining_ms, 0.0);
    }

    #[test]
    fn test_buff_exact_zero_deactivates() {
        let mut buff = Buff::default();
        buff.activate(100.0);
        buff.tick(100.0);
        assert!(!buff.active);
    }

    #[test]
    fn test_refresh_resets_instead_of_stacking() {
        let mut buff = Buff::default();
        buff.activate(8000.0);
        buff.tick(3000.0);
        buff.activate(8000.0);
        assert_eq!(buff.remaining_ms, 8000.0);
    }

    #[test]
    fn test_inactive_buff_ignores_ticks() {
        let mut buff = Buff::default();
        buff.tick(1000.0);
        assert!(!buff.active);
        assert_eq!(buff.remaining_ms, 0.0);
    }

    #[test]
    fn test_star_has_no_timer() {
        let mut buffs = ActiveBuffs::default();
        assert!(buffs.get_mut(PowerUpKind::Star).is_none());
        assert!(buffs.get_mut(PowerUpKind::Shield).is_some());
    }
}
