use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prepaid_core::{
    AggregateRoot, AuthorizationRequestId, CardId, Clock, DomainError, DomainResult, IdGenerator,
    MerchantId, SnapshotId, ValueObject,
};

use crate::card::Card;

/// Point-in-time copy of an authorization request's amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestSnapshot {
    id: SnapshotId,
    blocked_amount: u64,
    captured_amount: u64,
    refunded_amount: u64,
    created_at: DateTime<Utc>,
}

impl AuthorizationRequestSnapshot {
    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn blocked_amount(&self) -> u64 {
        self.blocked_amount
    }

    pub fn captured_amount(&self) -> u64 {
        self.captured_amount
    }

    pub fn refunded_amount(&self) -> u64 {
        self.refunded_amount
    }

    /// When the snapshot was taken.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl ValueObject for AuthorizationRequestSnapshot {}

/// Aggregate root: AuthorizationRequest (a merchant hold against one card).
///
/// The request refers to its card by id only. Every operation takes the card as
/// an argument and checks the id before touching it.
///
/// History is append-only; its last entry always mirrors the current amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    id: AuthorizationRequestId,
    card_id: CardId,
    merchant_id: MerchantId,
    blocked_amount: u64,
    captured_amount: u64,
    refunded_amount: u64,
    history: Vec<AuthorizationRequestSnapshot>,
}

impl AuthorizationRequest {
    /// Authorize a hold of `amount` on `card` for `merchant_id`.
    ///
    /// Blocking the amount on the card is the only side effect on the card. If it
    /// fails, its error is returned as-is and no request exists. A zero amount is
    /// rejected before any id is generated.
    pub fn new(
        card: &mut Card,
        merchant_id: MerchantId,
        amount: u64,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::InvalidAmount);
        }
        let id = AuthorizationRequestId::generate(ids)?;
        let snapshot_id = SnapshotId::generate(ids)?;

        card.block_money(amount)?;

        Ok(Self {
            id,
            card_id: card.id_typed(),
            merchant_id,
            blocked_amount: amount,
            captured_amount: 0,
            refunded_amount: 0,
            history: vec![AuthorizationRequestSnapshot {
                id: snapshot_id,
                blocked_amount: amount,
                captured_amount: 0,
                refunded_amount: 0,
                created_at: clock.now(),
            }],
        })
    }

    pub fn id_typed(&self) -> AuthorizationRequestId {
        self.id
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn merchant_id(&self) -> MerchantId {
        self.merchant_id
    }

    pub fn blocked_amount(&self) -> u64 {
        self.blocked_amount
    }

    pub fn captured_amount(&self) -> u64 {
        self.captured_amount
    }

    pub fn refunded_amount(&self) -> u64 {
        self.refunded_amount
    }

    /// The log of changes, oldest first.
    pub fn history(&self) -> &[AuthorizationRequestSnapshot] {
        &self.history
    }

    pub fn last_snapshot(&self) -> Option<&AuthorizationRequestSnapshot> {
        self.history.last()
    }

    /// Release `amount` of the hold back to the card's available balance.
    pub fn reverse(
        &mut self,
        card: &mut Card,
        amount: u64,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> DomainResult<()> {
        self.ensure_releasable(card, amount)?;
        let snapshot_id = SnapshotId::generate(ids)?;

        card.release_money(amount)?;

        self.blocked_amount -= amount;
        self.record(snapshot_id, clock);
        Ok(())
    }

    /// Settle `amount` of the hold: the funds leave the card for good.
    pub fn capture(
        &mut self,
        card: &mut Card,
        amount: u64,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> DomainResult<()> {
        self.ensure_releasable(card, amount)?;
        let captured = self
            .captured_amount
            .checked_add(amount)
            .ok_or(DomainError::Overflow)?;
        let snapshot_id = SnapshotId::generate(ids)?;

        card.charge_money(amount)?;

        self.blocked_amount -= amount;
        self.captured_amount = captured;
        self.record(snapshot_id, clock);
        Ok(())
    }

    fn ensure_releasable(&self, card: &Card, amount: u64) -> DomainResult<()> {
        if card.id_typed() != self.card_id {
            return Err(DomainError::CardMismatch);
        }
        if amount == 0 {
            return Err(DomainError::InvalidAmount);
        }
        if amount > self.blocked_amount {
            return Err(DomainError::ExceedsBlockedAmount {
                requested: amount,
                blocked: self.blocked_amount,
            });
        }
        Ok(())
    }

    fn record(&mut self, id: SnapshotId, clock: &impl Clock) {
        // History must never go back in time, even if the clock does.
        let mut created_at = clock.now();
        if let Some(last) = self.history.last() {
            created_at = created_at.max(last.created_at);
        }

        self.history.push(AuthorizationRequestSnapshot {
            id,
            blocked_amount: self.blocked_amount,
            captured_amount: self.captured_amount,
            refunded_amount: self.refunded_amount,
            created_at,
        });
    }
}

impl AggregateRoot for AuthorizationRequest {
    type Id = AuthorizationRequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.history.len().saturating_sub(1) as u64
    }
}
