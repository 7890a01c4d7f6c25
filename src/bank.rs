use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::account::{Account, AccountError, BankRef};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("No account registered at index {index}")]
    UnknownAccount { index: usize },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

#[derive(Debug)]
pub struct Bank {
    name: String,
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered accounts, in registration order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn account_mut(&mut self, index: usize) -> Option<&mut Account> {
        self.accounts.get_mut(index)
    }

    /// Index of the first registered account owned by `owner`.
    pub fn position_of(&self, owner: &str) -> Option<usize> {
        self.accounts.iter().position(|acc| acc.owner() == owner)
    }

    pub fn find_by_owner(&self, owner: &str) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.owner() == owner)
    }

    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(Account::balance).sum()
    }

    /// Registers `account` with this bank and returns its index.
    ///
    /// There is no de-duplication: adding an equal account twice keeps both.
    pub fn add_account(&mut self, mut account: Account) -> usize {
        account.link_bank(BankRef::new(self.name.as_str()));
        debug!(bank = %self.name, owner = %account.owner(), "account registered");
        self.accounts.push(account);
        self.accounts.len() - 1
    }

    /// Debits `source` and then credits `destination`.
    ///
    /// Neither account has to be registered with this bank. A failed debit
    /// is returned as is and `destination` is not touched.
    pub fn transfer(
        &self,
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<(), AccountError> {
        source.debit(amount)?;
        destination.credit(amount);
        debug!(
            bank = %self.name,
            from = %source.owner(),
            to = %destination.owner(),
            %amount,
            "transfer completed"
        );
        Ok(())
    }

    /// Same as [`Bank::transfer`], for two registered accounts addressed by index.
    pub fn transfer_between(
        &mut self,
        from: usize,
        to: usize,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let len = self.accounts.len();
        for index in [from, to] {
            if index >= len {
                return Err(TransferError::UnknownAccount { index });
            }
        }

        if from == to {
            let acc = &mut self.accounts[from];
            acc.debit(amount)?;
            acc.credit(amount);
            return Ok(());
        }

        let (source, destination) = pair_mut(&mut self.accounts, from, to);
        source.debit(amount)?;
        destination.credit(amount);
        debug!(
            bank = %self.name,
            from = %source.owner(),
            to = %destination.owner(),
            %amount,
            "transfer completed"
        );
        Ok(())
    }
}

// `a` and `b` must be distinct and in bounds.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
