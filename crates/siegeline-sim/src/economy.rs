//! Economy and progression ledger: money, score, lives and the wave counter.
//!
//! Owned by `SimulationEngine`. Mutated only by command handling and by
//! systems reporting kills, leaks and wave completions.

use std::collections::BTreeSet;

use siegeline_core::constants::*;
use siegeline_core::enums::{Difficulty, TowerKind};
use siegeline_core::error::CommandError;
use siegeline_core::profiles::tower_profile;
use siegeline_core::state::EconomyView;

/// Running economy state.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub money: u32,
    pub score: u64,
    /// Defender health.
    pub lives: u32,
    /// Current wave counter: one past the highest wave completed in order.
    pub wave: u32,
    /// Waves beyond the counter that already finished. Folded into the
    /// counter once it catches up to them.
    completed_ahead: BTreeSet<u32>,

    // --- Statistics ---
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub towers_built: u32,
    pub projectiles_fired: u32,
    pub waves_completed: u32,
}

impl Ledger {
    pub fn new(money: u32, lives: u32) -> Self {
        Self {
            money,
            lives,
            wave: 1,
            ..Default::default()
        }
    }

    /// Debit `cost`, or reject without touching the balance.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if cost > self.money {
            return Err(CommandError::InsufficientFunds {
                needed: cost,
                available: self.money,
            });
        }
        self.money -= cost;
        Ok(())
    }

    pub fn credit(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// An enemy died: pay its reward and score it.
    pub fn record_kill(&mut self, reward: u32) {
        self.credit(reward);
        self.score += reward as u64 * SCORE_PER_REWARD;
        self.enemies_killed += 1;
    }

    /// An enemy reached the exit.
    pub fn record_leak(&mut self, damage: u32) {
        self.lives = self.lives.saturating_sub(damage);
        self.enemies_leaked += 1;
    }

    /// A wave finished spawning. Pays the bonus and advances the wave counter
    /// when the wave is the current one; a wave finishing ahead of the
    /// counter is held until the waves before it complete.
    /// Returns whether the counter advanced.
    pub fn record_wave_completed(&mut self, wave_number: u32, bonus: u32) -> bool {
        self.credit(bonus);
        self.score += bonus as u64;
        self.waves_completed += 1;

        if wave_number > self.wave {
            self.completed_ahead.insert(wave_number);
            return false;
        }
        if wave_number < self.wave {
            return false;
        }

        self.wave = self.wave.saturating_add(1);
        while self.completed_ahead.remove(&self.wave) {
            self.wave = self.wave.saturating_add(1);
        }
        true
    }

    /// Lowest wave number not yet completed or held: the counter, or one
    /// past the highest wave that finished ahead of it.
    pub fn frontier(&self) -> u32 {
        self.completed_ahead
            .last()
            .map_or(self.wave, |&n| self.wave.max(n.saturating_add(1)))
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            money: self.money,
            score: self.score,
            wave: self.wave,
            lives: self.lives,
            enemies_killed: self.enemies_killed,
            enemies_leaked: self.enemies_leaked,
            towers_built: self.towers_built,
            projectiles_fired: self.projectiles_fired,
            waves_completed: self.waves_completed,
        }
    }
}

/// Cost of raising a tower from `level` to `level + 1`, `None` at max level.
pub fn upgrade_cost(kind: TowerKind, level: u32) -> Option<u32> {
    let profile = tower_profile(kind);
    if level >= profile.max_level {
        return None;
    }
    Some(profile.upgrade_cost * level.max(1))
}

/// Money returned when selling a tower with `invested` total spend.
pub fn sell_value(invested: u32) -> u32 {
    (invested as u64 * SELL_REFUND_PERCENT as u64 / 100) as u32
}

/// Wave completion bonus: `floor((base + n*increment) * special * difficulty)`.
pub fn wave_bonus(wave_number: u32, special_multiplier: f64, difficulty: Difficulty) -> u32 {
    let base = WAVE_BONUS_BASE + wave_number as f64 * WAVE_BONUS_INCREMENT;
    (base * special_multiplier * difficulty.bonus_multiplier()).floor() as u32
}
