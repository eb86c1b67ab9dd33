use serde::{Deserialize, Serialize};

use prepaid_core::{AggregateRoot, CardId, DomainError, DomainResult, IdGenerator};

/// Raw card state as kept by storage.
///
/// Rebuilding a [`Card`] from a record does not re-check any creation invariant:
/// storage is the source of truth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub available_balance: u64,
    pub blocked_balance: u64,
}

/// Aggregate root: Card.
///
/// Holds two balances in minor units. `available_balance` can be spent or held;
/// `blocked_balance` is reserved by merchant holds until released or charged.
/// The four mutators below are the only way either balance changes, and a failed
/// call leaves both untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    available_balance: u64,
    blocked_balance: u64,
    version: u64,
}

impl Card {
    /// Create a card with a fresh identifier and zero balances.
    pub fn new(ids: &impl IdGenerator) -> DomainResult<Self> {
        let id = CardId::generate(ids)?;
        Ok(Self {
            id,
            available_balance: 0,
            blocked_balance: 0,
            version: 0,
        })
    }

    pub fn from_record(record: CardRecord) -> Self {
        Self {
            id: record.id,
            available_balance: record.available_balance,
            blocked_balance: record.blocked_balance,
            version: 0,
        }
    }

    pub fn to_record(&self) -> CardRecord {
        CardRecord {
            id: self.id,
            available_balance: self.available_balance,
            blocked_balance: self.blocked_balance,
        }
    }

    pub fn id_typed(&self) -> CardId {
        self.id
    }

    pub fn available_balance(&self) -> u64 {
        self.available_balance
    }

    pub fn blocked_balance(&self) -> u64 {
        self.blocked_balance
    }

    /// Add `amount` to the available balance.
    pub fn load_money(&mut self, amount: u64) -> DomainResult<()> {
        ensure_positive(amount)?;
        let available = self
            .available_balance
            .checked_add(amount)
            .ok_or(DomainError::Overflow)?;

        self.available_balance = available;
        self.version += 1;
        Ok(())
    }

    /// Move `amount` from available to blocked.
    pub fn block_money(&mut self, amount: u64) -> DomainResult<()> {
        ensure_positive(amount)?;
        if amount > self.available_balance {
            return Err(DomainError::InsufficientFunds {
                requested: amount,
                available: self.available_balance,
            });
        }
        let blocked = self
            .blocked_balance
            .checked_add(amount)
            .ok_or(DomainError::Overflow)?;

        self.available_balance -= amount;
        self.blocked_balance = blocked;
        self.version += 1;
        Ok(())
    }

    /// Move `amount` from blocked back to available.
    pub fn release_money(&mut self, amount: u64) -> DomainResult<()> {
        ensure_positive(amount)?;
        self.ensure_blocked(amount)?;
        let available = self
            .available_balance
            .checked_add(amount)
            .ok_or(DomainError::Overflow)?;

        self.available_balance = available;
        self.blocked_balance -= amount;
        self.version += 1;
        Ok(())
    }

    /// Remove `amount` from the blocked balance for good (settlement).
    pub fn charge_money(&mut self, amount: u64) -> DomainResult<()> {
        ensure_positive(amount)?;
        self.ensure_blocked(amount)?;

        self.blocked_balance -= amount;
        self.version += 1;
        Ok(())
    }

    fn ensure_blocked(&self, amount: u64) -> DomainResult<()> {
        if amount > self.blocked_balance {
            return Err(DomainError::InsufficientBlockedFunds {
                requested: amount,
                blocked: self.blocked_balance,
            });
        }
        Ok(())
    }
}

fn ensure_positive(amount: u64) -> DomainResult<()> {
    if amount == 0 {
        return Err(DomainError::InvalidAmount);
    }
    Ok(())
}

impl AggregateRoot for Card {
    type Id = CardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
