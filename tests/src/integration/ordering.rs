//! # Ordering Guarantees
//!
//! Optimistic writes land in the order calls are issued. Gateway calls may
//! resolve in any order afterwards; resolution only confirms or reverts.

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    use sc_01_protocol_calls::{
        FailureReason, ProtocolCallError, TransactionOutcome, TransactionReceipt,
    };
    use shared_types::{ReactionType, TxHash};
    use tokio::sync::oneshot;

    use crate::integration::fixtures::{reaction, Harness};

    fn confirmed(block_number: u64) -> TransactionOutcome {
        TransactionOutcome::Confirmed(TransactionReceipt {
            tx_hash: TxHash::new(format!("0x{block_number:x}")),
            block_number,
        })
    }

    /// Issues `add(reaction)` and waits until its optimistic write happened.
    async fn issue(
        h: &Harness,
        reaction_type: ReactionType,
        calls_so_far: usize,
    ) -> (
        oneshot::Sender<TransactionOutcome>,
        tokio::task::JoinHandle<Result<(), ProtocolCallError>>,
    ) {
        let release = h.gateway.hold();
        let use_case = h.use_case.clone();
        let handle =
            tokio::spawn(async move { use_case.add_reaction(reaction(reaction_type)).await });
        h.wait_for_calls(calls_so_far + 1).await;
        (release, handle)
    }

    #[tokio::test]
    async fn test_later_call_wins_when_resolved_first() {
        let h = Harness::new(0, 0, None);

        let (release_up, up) = issue(&h, ReactionType::Upvote, 0).await;
        let (release_down, down) = issue(&h, ReactionType::Downvote, 1).await;
        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));

        release_down.send(confirmed(2)).unwrap();
        down.await.unwrap().unwrap();
        release_up.send(confirmed(1)).unwrap();
        up.await.unwrap().unwrap();

        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_clobber_later_write() {
        let h = Harness::new(0, 0, None);

        let (release_up, up) = issue(&h, ReactionType::Upvote, 0).await;
        let (release_down, down) = issue(&h, ReactionType::Downvote, 1).await;

        release_up
            .send(TransactionOutcome::Failed(FailureReason::Timeout))
            .unwrap();
        assert!(up.await.unwrap().is_err());
        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));

        release_down.send(confirmed(3)).unwrap();
        down.await.unwrap().unwrap();
        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));
    }

    #[tokio::test]
    async fn test_failure_of_latest_call_restores_earlier_reaction() {
        let h = Harness::new(0, 0, None);

        let (release_up, up) = issue(&h, ReactionType::Upvote, 0).await;
        let (release_down, down) = issue(&h, ReactionType::Downvote, 1).await;

        release_down
            .send(TransactionOutcome::Failed(FailureReason::SigningRejected))
            .unwrap();
        assert!(down.await.unwrap().is_err());
        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));

        release_up.send(confirmed(4)).unwrap();
        up.await.unwrap().unwrap();
        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));
    }

    #[tokio::test]
    async fn test_both_failing_in_issue_order_restores_original() {
        let h = Harness::new(0, 0, None);

        let (release_up, up) = issue(&h, ReactionType::Upvote, 0).await;
        let (release_down, down) = issue(&h, ReactionType::Downvote, 1).await;

        release_up
            .send(TransactionOutcome::Failed(FailureReason::Timeout))
            .unwrap();
        assert!(up.await.unwrap().is_err());
        assert_eq!(h.reaction_state(), (0, 1, Some(ReactionType::Downvote)));

        release_down
            .send(TransactionOutcome::Failed(FailureReason::Timeout))
            .unwrap();
        assert!(down.await.unwrap().is_err());
        assert_eq!(h.reaction_state(), (0, 0, None));
    }

    #[tokio::test]
    async fn test_latest_failure_after_earlier_confirm_keeps_confirmed() {
        let h = Harness::new(0, 1, Some(ReactionType::Downvote));

        let (release_up, up) = issue(&h, ReactionType::Upvote, 0).await;
        let (release_remove, remove) = {
            let release = h.gateway.hold();
            let use_case = h.use_case.clone();
            let handle = tokio::spawn(async move {
                use_case.remove_reaction(reaction(ReactionType::Upvote)).await
            });
            h.wait_for_calls(2).await;
            (release, handle)
        };
        assert_eq!(h.reaction_state(), (0, 0, None));

        release_up.send(confirmed(5)).unwrap();
        up.await.unwrap().unwrap();
        release_remove
            .send(TransactionOutcome::Failed(FailureReason::SigningRejected))
            .unwrap();
        assert!(remove.await.unwrap().is_err());

        assert_eq!(h.reaction_state(), (1, 0, Some(ReactionType::Upvote)));
    }

    #[tokio::test]
    async fn test_shuffled_resolution_keeps_last_issued_reaction() {
        let h = Harness::new(3, 2, None);
        let requested = [
            ReactionType::Upvote,
            ReactionType::Downvote,
            ReactionType::Downvote,
            ReactionType::Upvote,
            ReactionType::Downvote,
            ReactionType::Upvote,
        ];

        let mut pending = Vec::new();
        for (i, reaction_type) in requested.iter().enumerate() {
            pending.push(issue(&h, *reaction_type, i).await);
        }
        pending.shuffle(&mut thread_rng());

        for (block, (release, handle)) in pending.into_iter().enumerate() {
            release.send(confirmed(block as u64 + 1)).unwrap();
            handle.await.unwrap().unwrap();
        }

        assert_eq!(h.reaction_state(), (4, 2, Some(ReactionType::Upvote)));
    }
}
