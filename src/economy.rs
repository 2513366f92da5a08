use crate::error::GameError;

/// Single-currency credit balance. Debits are all-or-nothing: a rejected
/// debit leaves the balance exactly as it was.
#[derive(Debug, Clone)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(starting_balance: u64) -> Self {
        Self {
            balance: starting_balance,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn debit(&mut self, amount: u64) -> Result<(), GameError> {
        if amount > self.balance {
            return Err(GameError::InsufficientFunds {
                need: amount,
                have: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_reduces_the_balance() {
        let mut wallet = Wallet::new(1000);
        wallet.debit(100).unwrap();
        assert_eq!(wallet.balance(), 900);
    }

    #[test]
    fn debit_down_to_zero_is_allowed() {
        let mut wallet = Wallet::new(250);
        wallet.debit(250).unwrap();
        assert_eq!(wallet.balance(), 0);
    }

    #[test]
    fn overdraft_is_rejected_without_touching_the_balance() {
        let mut wallet = Wallet::new(40);
        let err = wallet.debit(250).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                need: 250,
                have: 40
            }
        );
        assert_eq!(wallet.balance(), 40);
    }

    #[test]
    fn credit_adds_and_saturates_at_the_top() {
        let mut wallet = Wallet::new(u64::MAX - 5);
        wallet.credit(100);
        assert_eq!(wallet.balance(), u64::MAX);
    }
}
