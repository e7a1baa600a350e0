//! # Escrow Flow Tests
//!
//! Full register -> price -> send -> claim choreography through the
//! `EscrowApi` surface, with the in-memory ledger providing the runtime's
//! atomic-commit guarantees.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use msg_escrow::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Fresh random ledger identity.
    fn random_id() -> AccountId {
        AccountId::new(rand::random::<[u8; 32]>())
    }

    /// Transaction context for an identity at a fixed test timestamp.
    fn ctx(caller: AccountId) -> TxContext {
        TxContext::new(caller, 1_700_000_000)
    }

    /// Service over a fresh in-memory ledger.
    fn service() -> EscrowService<InMemoryLedger> {
        EscrowService::new(Arc::new(InMemoryLedger::new()), ServiceConfig::default())
    }

    /// Registers a recipient at `price` and returns its context.
    async fn registered_recipient(
        service: &EscrowService<InMemoryLedger>,
        price: u64,
    ) -> TxContext {
        let recipient = ctx(random_id());
        service.register_profile(recipient, price).await.unwrap();
        recipient
    }

    /// Funds and returns a fresh sender context.
    fn funded_sender(service: &EscrowService<InMemoryLedger>, funds: u64) -> TxContext {
        let sender = ctx(random_id());
        service.ledger().set_balance(&sender.caller, funds);
        sender
    }

    // =============================================================================
    // PROFILE FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_register_then_query_price() {
        let service = service();
        let recipient = registered_recipient(&service, 1_000_000).await;

        assert_eq!(service.get_price(recipient.caller).await.unwrap(), 1_000_000);
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_first_price() {
        let service = service();
        let recipient = registered_recipient(&service, 1_000_000).await;

        let err = service.register_profile(recipient, 7).await.unwrap_err();
        assert_eq!(err, EscrowError::AlreadyExists);
        assert_eq!(service.get_price(recipient.caller).await.unwrap(), 1_000_000);
    }

    #[tokio::test]
    async fn test_only_owner_updates_price() {
        let service = service();
        let recipient = registered_recipient(&service, 100).await;
        let stranger = ctx(random_id());

        let err = service
            .update_price(stranger, recipient.caller, 0)
            .await
            .unwrap_err();
        assert_eq!(err, EscrowError::Unauthorized);
        assert_eq!(service.get_price(recipient.caller).await.unwrap(), 100);

        service
            .update_price(recipient, recipient.caller, 250)
            .await
            .unwrap();
        assert_eq!(service.get_price(recipient.caller).await.unwrap(), 250);
    }

    #[tokio::test]
    async fn test_price_query_for_unknown_identity() {
        let service = service();
        let err = service.get_price(random_id()).await.unwrap_err();
        assert_eq!(err, EscrowError::NotFound);
    }

    // =============================================================================
    // SEND + CLAIM FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_paid_message_lifecycle() {
        let service = service();
        let recipient = registered_recipient(&service, 1_000_000).await;
        let sender = funded_sender(&service, 5_000_000);

        let message_id = service
            .send_message(sender, recipient.caller, 1, 2_000_000, "hello there".into())
            .await
            .unwrap();

        // Funds are escrowed, not delivered.
        assert_eq!(service.ledger().balance_of(&sender.caller).unwrap(), 3_000_000);
        assert_eq!(service.ledger().balance_of(&recipient.caller).unwrap(), 0);
        assert_eq!(service.ledger().escrowed_total(), 2_000_000);

        // Read-and-claim releases exactly the escrowed amount and destroys
        // the record.
        let content = service.read_and_claim(recipient, message_id).await.unwrap();
        assert_eq!(content, "hello there");
        assert_eq!(
            service.ledger().balance_of(&recipient.caller).unwrap(),
            2_000_000
        );
        assert_eq!(service.ledger().escrowed_total(), 0);
        assert!(!service.ledger().record_exists(&message_id).unwrap());
    }

    #[tokio::test]
    async fn test_underpriced_send_changes_nothing() {
        let service = service();
        let recipient = registered_recipient(&service, 1_000_000).await;
        let sender = funded_sender(&service, 5_000_000);

        let err = service
            .send_message(sender, recipient.caller, 1, 999_999, "cheapskate".into())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EscrowError::Underpriced {
                required: 1_000_000,
                offered: 999_999,
            }
        );

        assert_eq!(service.ledger().balance_of(&sender.caller).unwrap(), 5_000_000);
        assert_eq!(service.ledger().escrowed_total(), 0);
        assert!(service
            .ledger()
            .pending_from(&sender.caller)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_claim_by_stranger_leaves_message_pending() {
        let service = service();
        let recipient = registered_recipient(&service, 100).await;
        let sender = funded_sender(&service, 1_000);
        let stranger = ctx(random_id());

        let message_id = service
            .send_message(sender, recipient.caller, 1, 100, "private".into())
            .await
            .unwrap();

        let err = service.read_and_claim(stranger, message_id).await.unwrap_err();
        assert_eq!(err, EscrowError::Unauthorized);

        assert!(service.ledger().record_exists(&message_id).unwrap());
        assert_eq!(service.ledger().balance_of(&stranger.caller).unwrap(), 0);
        assert_eq!(service.ledger().escrowed_total(), 100);

        // The true recipient can still claim.
        let content = service.read_and_claim(recipient, message_id).await.unwrap();
        assert_eq!(content, "private");
    }

    #[tokio::test]
    async fn test_second_claim_finds_nothing() {
        let service = service();
        let recipient = registered_recipient(&service, 100).await;
        let sender = funded_sender(&service, 1_000);

        let message_id = service
            .send_message(sender, recipient.caller, 1, 100, "once only".into())
            .await
            .unwrap();
        service.read_and_claim(recipient, message_id).await.unwrap();

        let err = service.read_and_claim(recipient, message_id).await.unwrap_err();
        assert_eq!(err, EscrowError::NotFound);
        assert_eq!(service.ledger().balance_of(&recipient.caller).unwrap(), 100);
    }

    #[tokio::test]
    async fn test_nonce_reuse_and_coexisting_messages() {
        let service = service();
        let recipient = registered_recipient(&service, 100).await;
        let sender = funded_sender(&service, 10_000);

        let first = service
            .send_message(sender, recipient.caller, 7, 100, "first".into())
            .await
            .unwrap();

        let err = service
            .send_message(sender, recipient.caller, 7, 100, "duplicate".into())
            .await
            .unwrap_err();
        assert_eq!(err, EscrowError::AlreadyExists);

        let second = service
            .send_message(sender, recipient.caller, 8, 100, "second".into())
            .await
            .unwrap();
        assert_ne!(first, second);

        // Both pending, claimable independently in any order.
        assert_eq!(service.ledger().pending_from(&sender.caller).unwrap().len(), 2);
        assert_eq!(
            service.read_and_claim(recipient, second).await.unwrap(),
            "second"
        );
        assert_eq!(
            service.read_and_claim(recipient, first).await.unwrap(),
            "first"
        );
        assert!(service
            .ledger()
            .pending_from(&sender.caller)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_free_profile_accepts_zero_amount() {
        let service = service();
        let recipient = registered_recipient(&service, 0).await;
        let sender = ctx(random_id());

        let message_id = service
            .send_message(sender, recipient.caller, 1, 0, "gratis".into())
            .await
            .unwrap();
        let content = service.read_and_claim(recipient, message_id).await.unwrap();
        assert_eq!(content, "gratis");
    }

    // =============================================================================
    // MULTI-PARTY CHOREOGRAPHY
    // =============================================================================

    #[tokio::test]
    async fn test_many_senders_one_recipient() {
        let service = service();
        let recipient = registered_recipient(&service, 10).await;

        let mut expected_total = 0u64;
        let mut message_ids = Vec::new();
        for i in 0..5u64 {
            let sender = funded_sender(&service, 1_000);
            let amount = 10 + i;
            expected_total += amount;
            let id = service
                .send_message(sender, recipient.caller, 0, amount, format!("msg {i}"))
                .await
                .unwrap();
            message_ids.push(id);
        }
        assert_eq!(service.ledger().escrowed_total(), expected_total);

        for id in message_ids {
            service.read_and_claim(recipient, id).await.unwrap();
        }
        assert_eq!(service.ledger().escrowed_total(), 0);
        assert_eq!(
            service.ledger().balance_of(&recipient.caller).unwrap(),
            expected_total
        );

        let stats = service.stats().await;
        assert_eq!(stats.messages_sent, 5);
        assert_eq!(stats.messages_claimed, 5);
        assert_eq!(stats.total_claimed, expected_total);
    }

    #[tokio::test]
    async fn test_price_raise_does_not_strand_pending_messages() {
        let service = service();
        let recipient = registered_recipient(&service, 100).await;
        let sender = funded_sender(&service, 1_000);

        let message_id = service
            .send_message(sender, recipient.caller, 1, 150, "grandfathered".into())
            .await
            .unwrap();

        service
            .update_price(recipient, recipient.caller, 1_000_000)
            .await
            .unwrap();

        // New sends must meet the new price...
        let late_sender = funded_sender(&service, 1_000);
        let err = service
            .send_message(late_sender, recipient.caller, 1, 150, "late".into())
            .await
            .unwrap_err();
        assert!(matches!(err, EscrowError::Underpriced { .. }));

        // ...but the pending message claims at its original amount.
        service.read_and_claim(recipient, message_id).await.unwrap();
        assert_eq!(service.ledger().balance_of(&recipient.caller).unwrap(), 150);
    }

    #[tokio::test]
    async fn test_two_recipients_independent_ledgers() {
        let service = service();
        let alice = registered_recipient(&service, 100).await;
        let bella = registered_recipient(&service, 200).await;
        let sender = funded_sender(&service, 10_000);

        let to_alice = service
            .send_message(sender, alice.caller, 0, 100, "for alice".into())
            .await
            .unwrap();
        let to_bella = service
            .send_message(sender, bella.caller, 0, 200, "for bella".into())
            .await
            .unwrap();

        // Neither recipient can claim the other's message.
        let err = service.read_and_claim(alice, to_bella).await.unwrap_err();
        assert_eq!(err, EscrowError::Unauthorized);
        let err = service.read_and_claim(bella, to_alice).await.unwrap_err();
        assert_eq!(err, EscrowError::Unauthorized);

        assert_eq!(
            service.read_and_claim(alice, to_alice).await.unwrap(),
            "for alice"
        );
        assert_eq!(
            service.read_and_claim(bella, to_bella).await.unwrap(),
            "for bella"
        );
    }
}
