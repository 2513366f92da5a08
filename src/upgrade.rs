//! Upgrade wheel: stake an owned skin on a coin flip for a better one.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution};

use crate::error::GameError;
use crate::inventory::{Inventory, SkinInstance};

/// Wheel animation length. The flip lands when this runs out.
pub const SPIN_DURATION: Duration = Duration::from_millis(3000);

/// Flat odds for every stake. Rarity and price do not move them.
pub const SUCCESS_ODDS: f64 = 0.5;

const PRICE_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone)]
pub enum WheelPhase {
    Idle,
    Spinning { stake: SkinInstance, remaining: Duration },
    Settled { outcome: UpgradeOutcome },
}

impl Default for WheelPhase {
    fn default() -> Self {
        WheelPhase::Idle
    }
}

#[derive(Debug, Clone)]
pub enum UpgradeOutcome {
    Escalated(SkinInstance),
    Lost,
}

#[derive(Debug, Default)]
pub struct UpgradeWheel {
    phase: WheelPhase,
}

impl UpgradeWheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &WheelPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, WheelPhase::Idle)
    }

    /// Fraction of the spin already elapsed, for the progress gauge.
    pub fn progress(&self) -> f64 {
        match &self.phase {
            WheelPhase::Spinning { remaining, .. } => {
                (1.0 - remaining.as_secs_f64() / SPIN_DURATION.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Takes the stake out of the inventory and starts the spin. The stake
    /// stays consumed from this point on; only a win mints anything back.
    pub fn begin(&mut self, uid: &str, inventory: &mut Inventory) -> Result<(), GameError> {
        if !self.is_idle() {
            return Err(GameError::Busy {
                action: "an upgrade spin",
            });
        }
        let stake = inventory.remove(uid)?;
        self.phase = WheelPhase::Spinning {
            stake,
            remaining: SPIN_DURATION,
        };
        Ok(())
    }

    /// Advances the spin by `dt`. At expiry the coin lands: a win deposits
    /// the escalated skin, a loss deposits nothing.
    pub fn tick(
        &mut self,
        dt: Duration,
        inventory: &mut Inventory,
        rng: &mut StdRng,
    ) -> Option<UpgradeOutcome> {
        match std::mem::replace(&mut self.phase, WheelPhase::Idle) {
            WheelPhase::Spinning { stake, remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    self.phase = WheelPhase::Spinning { stake, remaining };
                    return None;
                }
                let trial = Bernoulli::new(SUCCESS_ODDS).unwrap();
                let outcome = if trial.sample(rng) {
                    let escalated = escalate(&stake);
                    inventory.add(escalated.clone());
                    UpgradeOutcome::Escalated(escalated)
                } else {
                    UpgradeOutcome::Lost
                };
                self.phase = WheelPhase::Settled {
                    outcome: outcome.clone(),
                };
                Some(outcome)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Acknowledges a settled spin and re-arms the wheel. A spin that is
    /// still running is left alone.
    pub fn reset(&mut self) -> Option<UpgradeOutcome> {
        match std::mem::replace(&mut self.phase, WheelPhase::Idle) {
            WheelPhase::Settled { outcome } => Some(outcome),
            other => {
                self.phase = other;
                None
            }
        }
    }
}

/// Derives the improved copy: one rarity tier up, price floored at
/// one-and-a-half times the stake, a star on the name.
fn escalate(stake: &SkinInstance) -> SkinInstance {
    SkinInstance {
        uid: format!("{}_upgraded", stake.uid),
        name: format!("{} ★", stake.name),
        rarity: stake.rarity.escalated(),
        price: (stake.price as f64 * PRICE_MULTIPLIER).floor() as u64,
        icon: stake.icon.clone(),
        acquired_at: Utc::now(),
    }
}
