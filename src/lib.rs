/// A single owner's balance, with debit and credit primitives.
/// Amounts are exact decimals, a debit never leaves the balance partially changed.
pub mod account;

/// Named collection of accounts and transfers between them.
pub mod bank;

/// CSV replay of operations against a [`bank::Bank`].
///
/// NOTE: this is only here so the binary and the integration tests can share it,
/// nothing in [`account`] or [`bank`] depends on it.
pub mod bin_utils;
