//! Replays a CSV list of operations against a single [`Bank`] and prints
//! the resulting balances. Lives outside the ledger core so the binary and
//! the integration tests can share it.

use std::io::{Read, Write};

use anyhow::Result;
use csv_parser::{CsvOperationParser, Operation, OperationKind};
use csv_printer::{AccountRow, print_accounts};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountError},
    bank::{Bank, TransferError},
};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("Amount is required for {kind:?}")]
    MissingAmount { kind: OperationKind },
    #[error("Counterparty is required for {kind:?}")]
    MissingCounterparty { kind: OperationKind },
    #[error("No account is owned by `{owner}`")]
    UnknownOwner { owner: String },
    #[error("Balance of `{owner}` would overflow with {kind:?} of {amount}")]
    Overflow {
        kind: OperationKind,
        owner: String,
        amount: Decimal,
    },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    TransferErr(#[from] TransferError),
}

pub struct Service<'w, R, W: 'w> {
    pub bank_name: String,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = Bank::new(self.bank_name);

        for (line, row) in parser {
            let res = row
                .map_err(OperationError::from)
                .and_then(|op| apply_operation(&mut bank, op));
            if let Err(err) = res {
                (self.error_printer)(line, err);
            }
        }
        info!(bank = %bank.name(), accounts = bank.accounts().len(), "replay finished");

        print_accounts(
            self.output,
            bank.accounts().iter().map(|acc| AccountRow {
                owner: acc.owner(),
                balance: acc.balance(),
                bank: acc.bank().map(|bank| bank.name()),
            }),
        )
    }
}

pub fn apply_operation(bank: &mut Bank, op: Operation) -> Result<(), OperationError> {
    debug!(?op, "applying operation");
    let amount = op
        .amount
        .ok_or(OperationError::MissingAmount { kind: op.kind })?;

    match op.kind {
        OperationKind::Open => {
            bank.add_account(Account::new(op.owner, amount));
        }
        OperationKind::Credit => {
            let acc = owner_account(bank, &op.owner)?;
            let credited = acc.balance().checked_add(amount);
            ensure_in_range(acc, op.kind, credited, amount)?;
            acc.credit(amount);
        }
        OperationKind::Debit => {
            let acc = owner_account(bank, &op.owner)?;
            // insufficient funds is reported before any range check
            if acc.balance() >= amount {
                let debited = acc.balance().checked_sub(amount);
                ensure_in_range(acc, op.kind, debited, amount)?;
            }
            acc.debit(amount)?;
        }
        OperationKind::Transfer => {
            let counterparty = op
                .counterparty
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or(OperationError::MissingCounterparty { kind: op.kind })?;
            transfer(bank, &op.owner, counterparty, amount)?;
        }
    }
    Ok(())
}

fn transfer(
    bank: &mut Bank,
    from: &str,
    to: &str,
    amount: Decimal,
) -> Result<(), OperationError> {
    let from = owner_index(bank, from)?;
    let to = owner_index(bank, to)?;
    let kind = OperationKind::Transfer;
    if let (Some(source), Some(destination)) = (bank.account(from), bank.account(to)) {
        if source.balance() >= amount {
            ensure_in_range(source, kind, source.balance().checked_sub(amount), amount)?;
            if from != to {
                let credited = destination.balance().checked_add(amount);
                ensure_in_range(destination, kind, credited, amount)?;
            }
        }
    }
    bank.transfer_between(from, to, amount)?;
    Ok(())
}

fn ensure_in_range(
    acc: &Account,
    kind: OperationKind,
    result: Option<Decimal>,
    amount: Decimal,
) -> Result<(), OperationError> {
    match result {
        Some(_) => Ok(()),
        None => Err(OperationError::Overflow {
            kind,
            owner: acc.owner().to_owned(),
            amount,
        }),
    }
}

fn owner_index(bank: &Bank, owner: &str) -> Result<usize, OperationError> {
    bank.position_of(owner)
        .ok_or_else(|| OperationError::UnknownOwner {
            owner: owner.to_owned(),
        })
}

fn owner_account<'a>(bank: &'a mut Bank, owner: &str) -> Result<&'a mut Account, OperationError> {
    let index = owner_index(bank, owner)?;
    bank.account_mut(index)
        .ok_or_else(|| OperationError::UnknownOwner {
            owner: owner.to_owned(),
        })
}
