//! # Integration Test Flows
//!
//! One protocol call at a time, from request to cache state and presented
//! result, through the real publication presenter and in-memory store.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sc_01_protocol_calls::{
        CollectRequest, CreateCommentRequest, CreatePostRequest, ExecutionConfig, FailureReason,
        Media, ProtocolCallError, RelayFallback, RelayTicket, Settlement, TransactionOutcome,
        TransactionReceipt, ValidationError,
    };
    use sc_02_publication_cache::PublicationPresenter;
    use shared_types::{
        ExecutionMode, ProfileId, PublicationId, ReactionType, TransactionKind, TxHash,
    };
    use tokio::time::timeout;

    use crate::integration::fixtures::{reaction, Harness, PUBLICATION, VIEWER};

    fn comment(content: Option<&str>, media: Vec<Media>) -> CreateCommentRequest {
        CreateCommentRequest {
            publication_id: PublicationId::new(PUBLICATION),
            profile_id: ProfileId::new(VIEWER),
            content: content.map(str::to_string),
            media,
            content_focus: Default::default(),
            reference: Default::default(),
            collect: Default::default(),
            locale: Default::default(),
            delegate: true,
        }
    }

    fn receipt() -> TransactionReceipt {
        TransactionReceipt {
            tx_hash: TxHash::new("0x7a11"),
            block_number: 9_000_001,
        }
    }

    // =============================================================================
    // REACTION SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_upvote_scenario() {
        let h = Harness::new(1, 0, None);
        h.use_case.add_reaction(reaction(ReactionType::Upvote)).await.unwrap();
        assert_eq!(h.reaction_state(), (2, 0, Some(ReactionType::Upvote)));
    }

    #[tokio::test]
    async fn test_downvote_scenario() {
        let h = Harness::new(0, 1, None);
        h.use_case.add_reaction(reaction(ReactionType::Downvote)).await.unwrap();
        assert_eq!(h.reaction_state(), (0, 2, Some(ReactionType::Downvote)));
    }

    #[tokio::test]
    async fn test_switch_scenario() {
        let h = Harness::new(1, 0, Some(ReactionType::Upvote));
        h.use_case.add_reaction(reaction(ReactionType::Downvote)).await.unwrap();
        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));
    }

    #[tokio::test]
    async fn test_remove_scenario() {
        let h = Harness::new(1, 0, Some(ReactionType::Upvote));
        h.use_case.remove_reaction(reaction(ReactionType::Upvote)).await.unwrap();
        assert_eq!(h.reaction_state(), (0, 0, None));
    }

    #[tokio::test]
    async fn test_unrelated_fields_survive_updates() {
        let h = Harness::new(1, 0, None);
        h.use_case.add_reaction(reaction(ReactionType::Upvote)).await.unwrap();

        let raw = h.raw_entry();
        assert_eq!(raw["metadata"]["content"], "gm frens");
        assert_eq!(raw["stats"]["totalAmountOfMirrors"], 7);
    }

    // =============================================================================
    // FAILURE AND COMPENSATION
    // =============================================================================

    #[tokio::test]
    async fn test_failed_reaction_restores_snapshot_and_reports() {
        let h = Harness::new(1, 0, Some(ReactionType::Upvote));
        let mut results = h.presenter.subscribe();
        h.gateway.push_outcome(TransactionOutcome::Failed(FailureReason::Reverted {
            tx_hash: TxHash::new("0xbad"),
            message: "PublicationDoesNotExist".into(),
        }));

        let err = h
            .use_case
            .add_reaction(reaction(ReactionType::Downvote))
            .await
            .unwrap_err();

        assert!(matches!(err, ProtocolCallError::ProtocolRevert { .. }));
        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));

        let presented = timeout(Duration::from_secs(1), results.recv())
            .await
            .expect("result presented")
            .unwrap();
        assert_eq!(presented.kind, TransactionKind::AddReaction);
        assert_eq!(presented.result, Err(err));
    }

    #[tokio::test]
    async fn test_invalid_comment_touches_nothing() {
        let h = Harness::new(1, 0, None);
        let before = h.raw_entry();

        let err = h.use_case.create_comment(comment(Some(""), vec![])).await.unwrap_err();

        assert_eq!(
            err,
            ProtocolCallError::Validation(ValidationError::MissingContentOrMedia)
        );
        assert_eq!(h.gateway.call_count(), 0);
        assert_eq!(h.raw_entry(), before);
    }

    #[tokio::test]
    async fn test_media_only_comment_bumps_count() {
        let h = Harness::new(0, 0, None);
        let media = vec![Media::new("ipfs://QmImage", "image/jpeg")];

        h.use_case.create_comment(comment(None, media)).await.unwrap();

        assert_eq!(h.raw_entry()["stats"]["totalAmountOfComments"], 1);
    }

    #[tokio::test]
    async fn test_relay_fallback_signs_once_more() {
        let config = ExecutionConfig {
            relay_fallback: RelayFallback::SelfSigned,
            ..ExecutionConfig::default()
        };
        let h = Harness::with_config(0, 0, None, config);
        h.gateway
            .push_outcome(TransactionOutcome::Failed(FailureReason::RelayUnavailable));

        h.use_case.add_reaction(reaction(ReactionType::Upvote)).await.unwrap();

        let modes: Vec<_> = h.gateway.calls().into_iter().map(|c| c.mode).collect();
        assert_eq!(modes, vec![ExecutionMode::Delegated, ExecutionMode::SelfSigned]);
        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));
    }

    // =============================================================================
    // RELAYED TRANSACTIONS
    // =============================================================================

    #[tokio::test]
    async fn test_relayed_collect_settles_mined() {
        let h = Harness::new(0, 0, None);
        let ticket = RelayTicket::new();
        h.gateway.push_outcome(TransactionOutcome::Relayed(ticket.clone()));

        h.use_case
            .collect(CollectRequest {
                profile_id: ProfileId::new(VIEWER),
                publication_id: PublicationId::new(PUBLICATION),
                delegate: true,
            })
            .await
            .unwrap();

        assert_eq!(h.use_case.pending_count(), 1);
        assert_eq!(h.raw_entry()["hasCollectedByMe"], true);

        h.use_case.settle(ticket.tx_id, Settlement::Mined(receipt())).unwrap();

        assert_eq!(h.use_case.pending_count(), 0);
        assert_eq!(h.raw_entry()["hasCollectedByMe"], true);
        assert_eq!(h.raw_entry()["stats"]["totalAmountOfCollects"], 1);
    }

    #[tokio::test]
    async fn test_relayed_comment_settles_reverted() {
        let h = Harness::new(0, 0, None);
        let mut results = h.presenter.subscribe();
        let ticket = RelayTicket::new();
        h.gateway.push_outcome(TransactionOutcome::Relayed(ticket.clone()));

        h.use_case.create_comment(comment(Some("ser"), vec![])).await.unwrap();
        assert_eq!(h.raw_entry()["stats"]["totalAmountOfComments"], 1);
        let accepted = results.recv().await.unwrap();
        assert!(matches!(accepted.result, Ok(TransactionOutcome::Relayed(_))));

        let err = h
            .use_case
            .settle(
                ticket.tx_id,
                Settlement::Reverted {
                    tx_hash: TxHash::new("0xdead"),
                    reason: "ReferenceNotAllowed".into(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, ProtocolCallError::ProtocolRevert { .. }));
        assert_eq!(h.raw_entry()["stats"]["totalAmountOfComments"], 0);

        let settled = timeout(Duration::from_secs(1), results.recv())
            .await
            .expect("settlement presented")
            .unwrap();
        assert_eq!(settled.kind, TransactionKind::CreateComment);
        assert_eq!(settled.publication_id, Some(PublicationId::new(PUBLICATION)));
        assert_eq!(settled.result, Err(err));
    }

    #[tokio::test]
    async fn test_whitespace_comment_is_submitted() {
        let h = Harness::new(0, 0, None);

        h.use_case.create_comment(comment(Some(" "), vec![])).await.unwrap();

        assert_eq!(h.gateway.call_count(), 1);
        assert_eq!(h.raw_entry()["stats"]["totalAmountOfComments"], 1);
    }

    #[tokio::test]
    async fn test_self_signed_call_ignores_full_relay_queue() {
        let config = ExecutionConfig {
            max_pending_transactions: 1,
            ..ExecutionConfig::default()
        };
        let h = Harness::with_config(0, 0, None, config);
        h.gateway
            .push_outcome(TransactionOutcome::Relayed(RelayTicket::new()));
        h.use_case.create_comment(comment(Some("gm"), vec![])).await.unwrap();

        let mut signed = reaction(ReactionType::Upvote);
        signed.delegate = false;
        h.use_case.add_reaction(signed).await.unwrap();

        assert_eq!(h.use_case.pending_count(), 1);
        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));
    }

    // =============================================================================
    // UNCACHED ENTITIES
    // =============================================================================

    #[tokio::test]
    async fn test_post_and_uncached_targets_still_execute() {
        let h = Harness::new(0, 0, None);
        let other = PublicationId::new("0x99-0x01");
        let mut upvote_elsewhere = reaction(ReactionType::Upvote);
        upvote_elsewhere.publication_id = other.clone();

        h.use_case.add_reaction(upvote_elsewhere).await.unwrap();
        h.use_case
            .create_post(CreatePostRequest {
                profile_id: ProfileId::new(VIEWER),
                content: Some("first post".into()),
                media: vec![],
                content_focus: Default::default(),
                reference: Default::default(),
                collect: Default::default(),
                locale: Default::default(),
                delegate: false,
            })
            .await
            .unwrap();

        assert_eq!(h.gateway.call_count(), 2);
        assert!(h.cache().read(&other).is_err());
        assert_eq!(h.reaction_state(), (0, 0, None));
    }

    #[tokio::test]
    async fn test_metrics_are_exported() {
        sc_telemetry::register_metrics().unwrap();
        let h = Harness::new(0, 0, None);
        h.use_case.add_reaction(reaction(ReactionType::Upvote)).await.unwrap();

        let text = sc_telemetry::encode_metrics().unwrap();
        assert!(text.contains("sc_protocol_calls_total"));
        assert!(text.contains("sc_optimistic_updates_total"));
    }

    #[test]
    fn test_presenter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PublicationPresenter<sc_02_publication_cache::InMemoryStore>>();
    }
}
