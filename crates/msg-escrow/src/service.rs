//! # Escrow Service
//!
//! Implements [`EscrowApi`] over the outbound ports: validates each call
//! through the engine, verifies effect invariants, and hands the effect to
//! the runtime for its single atomic commit. Maintains operation statistics
//! and structured logs.

use crate::adapters::InMemoryLedger;
use crate::domain::entities::{Effect, FundTransfer, TxContext, MAX_CONTENT_LEN};
use crate::domain::invariants::check_all_effect_invariants;
use crate::domain::value_objects::{AccountId, RecordAddress};
use crate::engine;
use crate::errors::{EscrowError, StoreError};
use crate::ports::inbound::EscrowApi;
use crate::ports::outbound::{LedgerCommit, StateView};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

/// Escrow service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum message content length in bytes.
    pub max_content_len: usize,
    /// Check effect invariants before every commit.
    pub verify_effects: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_content_len: MAX_CONTENT_LEN,
            verify_effects: true,
        }
    }
}

/// Statistics for the escrow service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Profiles registered.
    pub profiles_registered: u64,
    /// Price updates applied.
    pub prices_updated: u64,
    /// Messages sent into escrow.
    pub messages_sent: u64,
    /// Messages claimed (and destroyed).
    pub messages_claimed: u64,
    /// Operations rejected by validation.
    pub rejected_operations: u64,
    /// Total units ever escrowed.
    pub total_escrowed: u64,
    /// Total units ever claimed out of escrow.
    pub total_claimed: u64,
}

/// The main escrow service.
///
/// Generic over the ledger implementation so tests inject
/// [`InMemoryLedger`] and production injects the real runtime.
pub struct EscrowService<L: StateView + LedgerCommit> {
    /// Service configuration.
    config: ServiceConfig,
    /// The ledger runtime (snapshot reads + atomic commits).
    ledger: Arc<L>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<L: StateView + LedgerCommit> EscrowService<L> {
    /// Creates a service over the given ledger.
    pub fn new(ledger: Arc<L>, config: ServiceConfig) -> Self {
        Self {
            config,
            ledger,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Returns current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// The underlying ledger (tests use this to seed balances).
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Verifies effect invariants (when enabled) and commits.
    async fn verify_and_commit(&self, operation: &str, effect: Effect) -> Result<(), EscrowError> {
        if self.config.verify_effects && !check_all_effect_invariants(&effect) {
            error!(operation, "effect failed invariant checks, refusing commit");
            return Err(
                StoreError::Corrupted(format!("{operation}: effect failed invariant checks"))
                    .into(),
            );
        }
        self.ledger.commit(effect)?;
        Ok(())
    }

    /// Records a validation rejection.
    async fn note_rejection(&self, operation: &str, err: &EscrowError) {
        warn!(operation, %err, "operation rejected");
        if err.is_rejection() {
            self.stats.write().await.rejected_operations += 1;
        }
    }
}

#[async_trait]
impl<L: StateView + LedgerCommit> EscrowApi for EscrowService<L> {
    #[instrument(skip(self), fields(caller = %ctx.caller))]
    async fn initialize(&self, ctx: TxContext) -> Result<(), EscrowError> {
        // Bootstrap no-op, retained for compatibility.
        info!("initialize: no-op");
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %ctx.caller))]
    async fn register_profile(
        &self,
        ctx: TxContext,
        price_min_units: u64,
    ) -> Result<RecordAddress, EscrowError> {
        let (address, effect) = match engine::register_profile(&*self.ledger, &ctx, price_min_units)
        {
            Ok(ok) => ok,
            Err(err) => {
                self.note_rejection("register_profile", &err).await;
                return Err(err);
            }
        };
        self.verify_and_commit("register_profile", effect).await?;

        self.stats.write().await.profiles_registered += 1;
        info!(profile = %address, price_min_units, "profile registered");
        Ok(address)
    }

    #[instrument(skip(self), fields(caller = %ctx.caller, owner = %owner))]
    async fn update_price(
        &self,
        ctx: TxContext,
        owner: AccountId,
        new_price: u64,
    ) -> Result<(), EscrowError> {
        let effect = match engine::update_price(&*self.ledger, &ctx, &owner, new_price) {
            Ok(effect) => effect,
            Err(err) => {
                self.note_rejection("update_price", &err).await;
                return Err(err);
            }
        };
        self.verify_and_commit("update_price", effect).await?;

        self.stats.write().await.prices_updated += 1;
        info!(new_price, "price updated");
        Ok(())
    }

    async fn get_price(&self, owner: AccountId) -> Result<u64, EscrowError> {
        engine::get_price(&*self.ledger, &owner)
    }

    #[instrument(skip(self, content), fields(caller = %ctx.caller, recipient = %recipient, nonce))]
    async fn send_message(
        &self,
        ctx: TxContext,
        recipient: AccountId,
        nonce: u64,
        amount: u64,
        content: String,
    ) -> Result<RecordAddress, EscrowError> {
        let (address, effect) = match engine::send_message(
            &*self.ledger,
            &ctx,
            &recipient,
            nonce,
            amount,
            &content,
            self.config.max_content_len,
        ) {
            Ok(ok) => ok,
            Err(err) => {
                self.note_rejection("send_message", &err).await;
                return Err(err);
            }
        };
        self.verify_and_commit("send_message", effect).await?;

        let mut stats = self.stats.write().await;
        stats.messages_sent += 1;
        stats.total_escrowed = stats.total_escrowed.saturating_add(amount);
        drop(stats);

        info!(message = %address, amount, "message escrowed");
        Ok(address)
    }

    #[instrument(skip(self), fields(caller = %ctx.caller, message = %message_id))]
    async fn read_and_claim(
        &self,
        ctx: TxContext,
        message_id: RecordAddress,
    ) -> Result<String, EscrowError> {
        let (content, effect) = match engine::read_and_claim(&*self.ledger, &ctx, &message_id) {
            Ok(ok) => ok,
            Err(err) => {
                self.note_rejection("read_and_claim", &err).await;
                return Err(err);
            }
        };
        let claimed = match &effect.transfer {
            Some(FundTransfer::EscrowCredit { amount, .. }) => *amount,
            _ => 0,
        };
        self.verify_and_commit("read_and_claim", effect).await?;

        let mut stats = self.stats.write().await;
        stats.messages_claimed += 1;
        stats.total_claimed = stats.total_claimed.saturating_add(claimed);
        drop(stats);

        info!(amount = claimed, "message claimed and destroyed");
        Ok(content)
    }
}

/// Creates a service over a fresh [`InMemoryLedger`] with default config.
#[must_use]
pub fn create_test_service() -> EscrowService<InMemoryLedger> {
    EscrowService::new(Arc::new(InMemoryLedger::new()), ServiceConfig::default())
}

// =============================================================================
// TESTS
// =============================================================================
