use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,
}

/// Link from an account to the bank it was registered in.
///
/// The bank owns its accounts, so this only names the bank instead of
/// pointing at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRef {
    name: String,
}

impl BankRef {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    owner: String,
    balance: Decimal,
    bank: Option<BankRef>,
}

impl Account {
    /// Negative initial balances are accepted as is.
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            owner: owner.into(),
            balance,
            bank: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn bank(&self) -> Option<&BankRef> {
        self.bank.as_ref()
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }

    pub(crate) fn link_bank(&mut self, bank: BankRef) {
        self.bank = Some(bank);
    }

    /// Withdraws `amount` from the balance.
    ///
    /// Amount sign is not checked. On error the balance is left untouched.
    ///
    /// # Panics
    ///
    /// If the result does not fit in a [`Decimal`].
    pub fn debit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance < amount {
            warn!(owner = %self.owner, balance = %self.balance, %amount, "debit rejected");
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        debug!(owner = %self.owner, balance = %self.balance, %amount, "debited");
        Ok(())
    }

    /// # Panics
    ///
    /// If the result does not fit in a [`Decimal`].
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        debug!(owner = %self.owner, balance = %self.balance, %amount, "credited");
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.balance == other.balance
    }
}

impl Eq for Account {}
