//! # Wait-Bridge Integration Flows
//!
//! End-to-end behavior of the bridge: submit a request, forward it to a
//! hand-driven processor probe, observe the future settle.
//!
//! Covered here:
//!
//! 1. A processor reply settles the future with that value
//! 2. A silent processor settles the future as failed after the deadline
//! 3. Concurrent requests are fully independent (no cross-talk)
//! 4. Settlement is exactly-once and the observed result never changes
//! 5. Stray traffic during the wait does not disturb the outcome
//! 6. Reads of a settled future are idempotent

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    use bridge_bus::{mailbox, ProcessorProbe, DEFAULT_MAILBOX_CAPACITY};
    use wait_broker::{result_slot, AlreadySettled, WaitBroker, WaitError, WaitRequest};

    /// Outer guard for "settles within a bounded grace period" assertions.
    const GRACE: Duration = Duration::from_millis(1500);

    // =============================================================================
    // SINGLE REQUEST
    // =============================================================================

    #[tokio::test]
    async fn test_processor_reply_settles_the_future() {
        crate::init_tracing();
        let broker = WaitBroker::new();
        let mut probe = ProcessorProbe::<u32, String>::new("processor");

        let future = broker.submit(WaitRequest::new(
            probe.recipient(),
            777,
            Duration::from_millis(5000),
        ));

        // Processor has not replied: still pending
        sleep(Duration::from_millis(500)).await;
        assert!(!future.is_settled());
        assert!(!future.is_failed());
        assert!(probe.has_messages());

        // Simulate processing finishing
        assert_eq!(probe.expect_message().await, 777);
        probe.reply("hello".to_string());

        let result = timeout(GRACE, future.result())
            .await
            .expect("future should settle within the grace period");
        assert_eq!(result.unwrap(), "hello");
        assert!(future.is_settled());
        assert!(!future.is_failed());
    }

    #[tokio::test]
    async fn test_silent_processor_fails_the_future_after_deadline() {
        crate::init_tracing();
        let broker = WaitBroker::new();
        let probe = ProcessorProbe::<u32, String>::new("processor");

        let future = broker.submit(WaitRequest::new(
            probe.recipient(),
            777,
            Duration::from_millis(600),
        ));

        // Before the deadline: still pending
        sleep(Duration::from_millis(500)).await;
        assert!(!future.is_settled());
        assert!(!future.is_failed());
        assert!(probe.has_messages());

        // Past the deadline: failed, never successful
        let result = timeout(GRACE, future.result())
            .await
            .expect("future should settle within the grace period");
        let error = result.unwrap_err();
        assert!(error.is_timeout());
        assert!(future.is_failed());
        assert_eq!(broker.stats().succeeded, 0);
    }

    #[tokio::test]
    async fn test_unreachable_target_fails_the_future() {
        let broker = WaitBroker::new();
        let (recipient, mb) = mailbox::<u32, String>("gone", DEFAULT_MAILBOX_CAPACITY);
        drop(mb);

        let future = broker.submit(WaitRequest::new(recipient, 1, Duration::from_millis(5000)));

        let error = timeout(GRACE, future.result())
            .await
            .expect("future should settle within the grace period")
            .unwrap_err();
        assert!(matches!(error, WaitError::ProcessorFailed { .. }));
        assert!(!error.is_timeout());
    }

    #[tokio::test]
    async fn test_discarded_request_fails_before_the_deadline() {
        let broker = WaitBroker::new();
        let mut probe = ProcessorProbe::<u32, String>::new("discarding");

        // Deadline far in the future: the failure must not wait for it.
        let future = broker.submit(WaitRequest::new(
            probe.recipient(),
            1,
            Duration::from_secs(60),
        ));

        probe.expect_message().await;
        drop(probe); // reply handle dropped without answering

        let error = timeout(GRACE, future.result())
            .await
            .expect("failure should surface promptly, not at the deadline")
            .unwrap_err();
        assert!(matches!(error, WaitError::ProcessorFailed { .. }));
    }

    // =============================================================================
    // CONCURRENT REQUESTS
    // =============================================================================

    /// N distinct processors, N requests; every future must settle to exactly
    /// its own processor's reply.
    async fn run_independent_requests(count: usize) {
        let broker = Arc::new(WaitBroker::new());

        let mut probes = Vec::with_capacity(count);
        let mut futures = Vec::with_capacity(count);
        for i in 0..count {
            let probe = ProcessorProbe::<u32, String>::new(format!("processor{i}"));
            let future = broker.submit(WaitRequest::new(
                probe.recipient(),
                i as u32,
                Duration::from_millis(5000),
            ));
            probes.push(probe);
            futures.push(future);
        }

        // No processor has replied: nothing settles
        sleep(Duration::from_millis(500)).await;
        assert!(
            futures.iter().all(|f| !f.is_settled() && !f.is_failed()),
            "no future may settle before its processor replies"
        );
        assert!(probes.iter().all(ProcessorProbe::has_messages));

        // Every processor replies with its own value
        for (i, probe) in probes.iter_mut().enumerate() {
            assert_eq!(probe.expect_message().await, i as u32);
            probe.reply(format!("{i}"));
        }

        let results = timeout(
            Duration::from_secs(5),
            futures::future::join_all(futures.iter().map(|f| f.result())),
        )
        .await
        .expect("all futures should settle within the grace period");

        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), format!("{i}"), "cross-talk on request {i}");
        }
        assert_eq!(broker.stats().succeeded, count as u64);
    }

    #[tokio::test]
    async fn test_10_concurrent_requests_are_independent() {
        run_independent_requests(10).await;
    }

    #[tokio::test]
    async fn test_1000_concurrent_requests_are_independent() {
        run_independent_requests(1000).await;
    }

    // =============================================================================
    // SETTLEMENT DISCIPLINE
    // =============================================================================

    #[tokio::test]
    async fn test_settlement_is_exactly_once() {
        let (promise, future) = result_slot::<String>();

        promise.try_settle(Ok("first".to_string())).unwrap();
        let observed = future.result().await.unwrap();
        assert_eq!(observed, "first");

        // A forced duplicate outcome must be rejected, not overwrite
        assert_eq!(
            promise.try_settle(Ok("second".to_string())),
            Err(AlreadySettled)
        );
        assert_eq!(future.result().await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_stray_messages_do_not_disturb_the_wait() {
        let broker = WaitBroker::new();
        let mut probe = ProcessorProbe::<String, String>::new("processor");
        let stray_sender = probe.recipient();

        let future = broker.submit(WaitRequest::new(
            probe.recipient(),
            "real".to_string(),
            Duration::from_millis(5000),
        ));

        assert_eq!(probe.expect_message().await, "real");

        // Unrelated traffic while the forwarder is waiting
        for i in 0..3 {
            stray_sender.send(format!("stray{i}")).await.unwrap();
        }
        sleep(Duration::from_millis(100)).await;
        assert!(
            !future.is_settled(),
            "stray messages must not settle the future"
        );

        // Strays drain as plain payloads; only the real ask has a reply slot
        for i in 0..3 {
            assert_eq!(probe.expect_message().await, format!("stray{i}"));
        }
        assert_eq!(probe.pending_reply_count(), 1);

        probe.reply("done".to_string());
        let result = timeout(GRACE, future.result())
            .await
            .expect("future should settle within the grace period");
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_settled_reads_are_idempotent() {
        let broker = WaitBroker::new();
        let mut probe = ProcessorProbe::<u32, String>::new("processor");

        let ok_future = broker.submit(WaitRequest::new(
            probe.recipient(),
            1,
            Duration::from_millis(5000),
        ));
        probe.expect_message().await;
        probe.reply("value".to_string());

        let failed_future = broker.submit(WaitRequest::new(
            probe.recipient(),
            2,
            Duration::from_millis(50),
        ));

        let first_ok = ok_future.result().await;
        let first_err = timeout(GRACE, failed_future.result())
            .await
            .expect("future should settle within the grace period");
        assert!(first_err.is_err());

        for _ in 0..3 {
            assert_eq!(ok_future.result().await, first_ok);
            assert_eq!(ok_future.try_result().unwrap(), first_ok);
            assert_eq!(failed_future.result().await, first_err);
        }
    }

    // =============================================================================
    // OUTCOME ACCOUNTING
    // =============================================================================

    #[tokio::test]
    async fn test_stats_track_mixed_outcomes() {
        let broker = WaitBroker::new();
        let mut replying = ProcessorProbe::<u32, String>::new("replying");
        let silent = ProcessorProbe::<u32, String>::new("silent");
        let (unreachable, mb) = mailbox::<u32, String>("unreachable", DEFAULT_MAILBOX_CAPACITY);
        drop(mb);

        let ok = broker.submit(WaitRequest::new(
            replying.recipient(),
            1,
            Duration::from_millis(5000),
        ));
        let timed_out = broker.submit(WaitRequest::new(
            silent.recipient(),
            2,
            Duration::from_millis(50),
        ));
        let failed = broker.submit(WaitRequest::new(unreachable, 3, Duration::from_millis(5000)));

        replying.expect_message().await;
        replying.reply("ok".to_string());

        assert!(ok.result().await.is_ok());
        assert!(timeout(GRACE, timed_out.result()).await.unwrap().is_err());
        assert!(timeout(GRACE, failed.result()).await.unwrap().is_err());

        let stats = broker.stats();
        assert_eq!(stats.submitted, 3);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.in_flight(), 0);
    }
}
