//! Case opening: pay up front, wait out the reveal, bank the drop.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use crate::catalog::Case;
use crate::economy::Wallet;
use crate::error::GameError;
use crate::inventory::{Inventory, SkinInstance};

/// Reveal animation length. The drop is not decided until this runs out.
pub const OPEN_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub enum OpeningPhase {
    Idle,
    Opening { case: Case, remaining: Duration },
    Resolved { won: SkinInstance },
}

#[derive(Debug, Default)]
pub struct CaseOpening {
    phase: OpeningPhase,
}

impl Default for OpeningPhase {
    fn default() -> Self {
        OpeningPhase::Idle
    }
}

impl CaseOpening {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &OpeningPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, OpeningPhase::Idle)
    }

    /// Fraction of the reveal already elapsed, for the progress gauge.
    pub fn progress(&self) -> f64 {
        match &self.phase {
            OpeningPhase::Opening { remaining, .. } => {
                (1.0 - remaining.as_secs_f64() / OPEN_DURATION.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Charges the case price and starts the reveal. The debit happens
    /// before anything else changes, so a rejection leaves no trace.
    pub fn begin(&mut self, case: &Case, wallet: &mut Wallet) -> Result<(), GameError> {
        if !self.is_idle() {
            return Err(GameError::Busy {
                action: "a case opening",
            });
        }
        wallet.debit(case.price)?;
        self.phase = OpeningPhase::Opening {
            case: case.clone(),
            remaining: OPEN_DURATION,
        };
        Ok(())
    }

    /// Advances the reveal by `dt`. When it expires, draws one skin from
    /// the pool, deposits it and reports it exactly once. Every pool entry
    /// is equally likely; rarity carries no draw weight.
    pub fn tick(
        &mut self,
        dt: Duration,
        inventory: &mut Inventory,
        rng: &mut StdRng,
    ) -> Option<SkinInstance> {
        match std::mem::replace(&mut self.phase, OpeningPhase::Idle) {
            OpeningPhase::Opening { case, remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    self.phase = OpeningPhase::Opening { case, remaining };
                    return None;
                }
                let spec = &case.pool[rng.gen_range(0..case.pool.len())];
                let won = SkinInstance::minted(spec);
                inventory.add(won.clone());
                self.phase = OpeningPhase::Resolved { won: won.clone() };
                Some(won)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Acknowledges a resolved drop and re-arms the engine. The skin is
    /// already in the inventory; collecting only clears the showcase.
    pub fn collect(&mut self) -> Option<SkinInstance> {
        match std::mem::replace(&mut self.phase, OpeningPhase::Idle) {
            OpeningPhase::Resolved { won } => Some(won),
            other => {
                self.phase = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Rarity, SkinSpec};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn spec(id: &str, rarity: Rarity, price: u64) -> SkinSpec {
        SkinSpec {
            id: id.to_string(),
            name: id.to_uppercase(),
            rarity,
            price,
            icon: "🔫".to_string(),
        }
    }

    fn two_skin_case() -> Case {
        Case {
            id: "test_case".to_string(),
            name: "Test Case".to_string(),
            price: 100,
            pool: vec![
                spec("cheap", Rarity::Common, 10),
                spec("grail", Rarity::Legendary, 2500),
            ],
        }
    }

    #[test]
    fn begin_charges_up_front() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        opening.begin(&two_skin_case(), &mut wallet).unwrap();

        assert_eq!(wallet.balance(), 900);
        assert!(matches!(opening.phase(), OpeningPhase::Opening { .. }));
    }

    #[test]
    fn begin_without_funds_changes_nothing() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(40);
        let err = opening.begin(&two_skin_case(), &mut wallet).unwrap_err();

        assert_eq!(
            err,
            GameError::InsufficientFunds {
                need: 100,
                have: 40
            }
        );
        assert_eq!(wallet.balance(), 40);
        assert!(opening.is_idle());
    }

    #[test]
    fn begin_while_opening_is_rejected_and_charged_once() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        let case = two_skin_case();

        opening.begin(&case, &mut wallet).unwrap();
        let err = opening.begin(&case, &mut wallet).unwrap_err();

        assert!(matches!(err, GameError::Busy { .. }));
        assert_eq!(wallet.balance(), 900);
    }

    #[test]
    fn reveal_runs_the_full_duration() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        let mut inventory = Inventory::new();
        let mut rng = StdRng::seed_from_u64(11);

        opening.begin(&two_skin_case(), &mut wallet).unwrap();
        assert!(
            opening
                .tick(Duration::from_millis(1000), &mut inventory, &mut rng)
                .is_none()
        );
        assert!(matches!(opening.phase(), OpeningPhase::Opening { .. }));
        assert!(inventory.is_empty());

        let won = opening
            .tick(Duration::from_millis(1000), &mut inventory, &mut rng)
            .unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get(&won.uid).unwrap().name, won.name);
        assert!(matches!(opening.phase(), OpeningPhase::Resolved { .. }));
    }

    #[test]
    fn resolution_happens_once_even_with_a_huge_tick() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        let mut inventory = Inventory::new();
        let mut rng = StdRng::seed_from_u64(12);

        opening.begin(&two_skin_case(), &mut wallet).unwrap();
        let won = opening.tick(Duration::from_secs(60), &mut inventory, &mut rng);
        assert!(won.is_some());

        assert!(
            opening
                .tick(Duration::from_secs(60), &mut inventory, &mut rng)
                .is_none()
        );
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn drop_stays_banked_whether_or_not_it_is_collected() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        let mut inventory = Inventory::new();
        let mut rng = StdRng::seed_from_u64(13);
        let case = two_skin_case();

        opening.begin(&case, &mut wallet).unwrap();
        opening.tick(OPEN_DURATION, &mut inventory, &mut rng);

        // Uncollected: the skin is already owned, only the showcase lingers.
        assert_eq!(inventory.len(), 1);
        assert_eq!(wallet.balance(), 900);
        assert!(case.pool.iter().any(|s| {
            let won = inventory.iter().next().unwrap();
            won.name == s.name && won.price == s.price
        }));

        let collected = opening.collect().unwrap();
        assert!(opening.is_idle());
        assert_eq!(inventory.get(&collected.uid).unwrap().uid, collected.uid);
        assert!(opening.collect().is_none());
    }

    #[test]
    fn collect_mid_reveal_does_not_interrupt() {
        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(1000);
        opening.begin(&two_skin_case(), &mut wallet).unwrap();

        assert!(opening.collect().is_none());
        assert!(matches!(opening.phase(), OpeningPhase::Opening { .. }));
    }

    #[test]
    fn draws_are_uniform_across_the_pool() {
        let pool = vec![
            spec("a", Rarity::Common, 10),
            spec("b", Rarity::Uncommon, 50),
            spec("c", Rarity::Rare, 150),
            spec("d", Rarity::Epic, 300),
            spec("e", Rarity::Legendary, 2500),
        ];
        let case = Case {
            id: "wide_case".to_string(),
            name: "Wide Case".to_string(),
            price: 10,
            pool,
        };

        let mut opening = CaseOpening::new();
        let mut wallet = Wallet::new(50_000);
        let mut inventory = Inventory::new();
        let mut rng = StdRng::seed_from_u64(99);
        let mut tally: HashMap<String, usize> = HashMap::new();

        for _ in 0..5000 {
            opening.begin(&case, &mut wallet).unwrap();
            let won = opening.tick(OPEN_DURATION, &mut inventory, &mut rng).unwrap();
            *tally.entry(won.name).or_default() += 1;
            opening.collect().unwrap();
        }

        assert_eq!(tally.len(), 5);
        for (name, count) in &tally {
            assert!(
                (800..=1200).contains(count),
                "{} drew {} times out of 5000",
                name,
                count
            );
        }
    }
}
