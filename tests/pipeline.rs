use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quotaflow::{
    Config, DelayPolicy, Dice, Driver, Event, EventKind, PipelineError, ScriptedDice, Subscribe,
    Summary, Tally,
};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<Event>>,
    /// Yields this many times per event, so its queue keeps filling up.
    yields: usize,
}

impl Recorder {
    fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    /// `(seq, succeeded, message)` of every delivered item, in arrival order.
    fn deliveries(&self) -> Vec<(u64, bool, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_delivery())
            .map(|e| {
                (
                    e.item.unwrap_or_default(),
                    e.kind == EventKind::ItemSucceeded,
                    e.reason.as_deref().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, ev: &Event) {
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        self.events.lock().unwrap().push(ev.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }

    fn queue_capacity(&self) -> usize {
        8
    }
}

struct BrokenDice;

impl Dice for BrokenDice {
    fn roll(&mut self, _range: RangeInclusive<u64>) -> u64 {
        panic!("dice")
    }
}

fn config(quota: u64) -> Config {
    Config {
        quota,
        delay: DelayPolicy::None,
        ..Config::default()
    }
}

async fn run_with(cfg: Config, dice: Option<ScriptedDice>) -> (Summary, Arc<Recorder>) {
    let rec = Arc::new(Recorder::default());
    let mut builder = Driver::builder(cfg).with_subscriber(rec.clone());
    if let Some(dice) = dice {
        builder = builder.with_dice(dice);
    }
    let summary = builder.build().run().await.expect("pipeline run");
    (summary, rec)
}

fn scripted(codes: &[u64]) -> Option<ScriptedDice> {
    Some(ScriptedDice::new(codes.iter().copied()))
}

#[tokio::test]
async fn test_zero_quota_reports_nothing() {
    let (summary, rec) = run_with(config(0), None).await;

    assert_eq!(summary.tally(), Tally::default());
    assert_eq!(summary.delivered, 0);
    assert!(summary.quota_reached);
    assert!(rec.deliveries().is_empty());
    assert_eq!(rec.count(EventKind::ShutdownAcknowledged), 1);
}

#[tokio::test]
async fn test_single_item_then_handshake() {
    let (summary, rec) = run_with(config(1), scripted(&[2])).await;

    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.tally(), Tally { succeeded: 1, failed: 0 });
    assert_eq!(rec.deliveries(), vec![(1, true, "Item #1 is ready!".to_string())]);
    assert_eq!(rec.count(EventKind::ShutdownRequested), 1);
    assert_eq!(rec.count(EventKind::ShutdownAcknowledged), 1);
}

#[tokio::test]
async fn test_every_item_once_in_order() {
    for quota in [2u64, 5, 17, 40] {
        let mut cfg = config(quota);
        cfg.seed = Some(quota);
        let (summary, rec) = run_with(cfg, None).await;

        let seqs: Vec<u64> = rec.deliveries().into_iter().map(|(s, _, _)| s).collect();
        assert_eq!(seqs, (1..=quota).collect::<Vec<_>>(), "quota {quota}");
        assert_eq!(summary.delivered, quota);
        assert_eq!(summary.succeeded + summary.failed, quota);
        assert!(summary.quota_reached);

        assert_eq!(rec.count(EventKind::QuotaReached), 1);
        assert_eq!(rec.count(EventKind::ShutdownRequested), 1);
        assert_eq!(rec.count(EventKind::ShutdownFailed), 0);
    }
}

#[tokio::test]
async fn test_handshake_event_order() {
    let (_, rec) = run_with(config(2), scripted(&[1])).await;
    let kinds = rec.kinds();

    let pos = |k: EventKind| kinds.iter().position(|x| *x == k).expect("kind present");
    assert!(pos(EventKind::PipelineStarted) < pos(EventKind::QuotaReached));
    assert!(pos(EventKind::QuotaReached) < pos(EventKind::ShutdownRequested));
    assert!(pos(EventKind::ShutdownRequested) < pos(EventKind::ShutdownAcknowledged));
    assert_eq!(kinds.last(), Some(&EventKind::PipelineFinished));
}

#[tokio::test]
async fn test_scripted_codes_scenario() {
    let codes = [4, 7, 3, 6, 9, 1, 2, 5, 12, 8];
    let (summary, rec) = run_with(config(10), scripted(&codes)).await;

    let failed: Vec<(u64, String)> = rec
        .deliveries()
        .into_iter()
        .filter(|(_, ok, _)| !ok)
        .map(|(seq, _, msg)| (seq, msg))
        .collect();

    let seqs: Vec<u64> = failed.iter().map(|(s, _)| *s).collect();
    assert_eq!(seqs, vec![3, 4, 5, 9]);
    assert!(failed[0].1.contains("ingredients"));
    assert!(failed[1].1.contains("cook"));
    assert!(failed[2].1.contains("ingredients"));
    assert!(failed[3].1.contains("ingredients"));
    assert_eq!(summary.tally(), Tally { succeeded: 6, failed: 4 });
}

#[tokio::test]
async fn test_failures_at_three_six_nine() {
    let codes: Vec<u64> = (1..=10).collect();
    let (summary, rec) = run_with(config(10), scripted(&codes)).await;

    let deliveries = rec.deliveries();
    let failed: Vec<u64> = deliveries
        .iter()
        .filter(|(_, ok, _)| !ok)
        .map(|(s, _, _)| *s)
        .collect();
    assert_eq!(failed, vec![3, 6, 9]);
    assert!(deliveries[2].2.contains("ingredients"));
    assert!(deliveries[5].2.contains("cook"));
    assert!(deliveries[8].2.contains("ingredients"));
    assert_eq!(summary.tally(), Tally { succeeded: 7, failed: 3 });
}

#[tokio::test]
async fn test_seeded_runs_are_identical() {
    let mut cfg = config(25);
    cfg.seed = Some(2024);

    let (first, rec_a) = run_with(cfg.clone(), None).await;
    let (second, rec_b) = run_with(cfg, None).await;

    assert_eq!(first, second);
    assert_eq!(rec_a.deliveries(), rec_b.deliveries());
}

#[tokio::test]
async fn test_summary_event_carries_tally() {
    let (summary, rec) = run_with(config(6), scripted(&[6, 1])).await;

    let finished = rec
        .events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.kind == EventKind::PipelineFinished)
        .cloned()
        .expect("finished event");
    assert_eq!(finished.tally, Some(summary.tally()));
    assert_eq!(finished.quota, Some(6));
    assert_eq!(summary.tally(), Tally { succeeded: 3, failed: 3 });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_multi_thread_runtime() {
    let (summary, rec) = run_with(config(30), None).await;
    assert_eq!(summary.delivered, 30);
    assert_eq!(rec.deliveries().len(), 30);
}

#[tokio::test]
async fn test_slow_subscriber_sees_every_outcome() {
    let rec = Arc::new(Recorder {
        yields: 2,
        ..Recorder::default()
    });
    let mut cfg = config(5_000);
    cfg.seed = Some(11);

    let summary = Driver::builder(cfg)
        .with_subscriber(rec.clone())
        .build()
        .run()
        .await
        .expect("pipeline run");

    assert_eq!(summary.delivered, 5_000);
    let seqs: Vec<u64> = rec.deliveries().into_iter().map(|(s, _, _)| s).collect();
    assert_eq!(seqs, (1..=5_000).collect::<Vec<_>>());
    assert_eq!(rec.count(EventKind::ItemOrdered), 5_000);
    assert_eq!(rec.count(EventKind::SubscriberClosed), 0);
    assert_eq!(rec.kinds().last(), Some(&EventKind::PipelineFinished));
}

#[tokio::test]
async fn test_producer_panic_is_the_run_error() {
    let rec = Arc::new(Recorder::default());
    let res = Driver::builder(config(3))
        .with_subscriber(rec.clone())
        .with_dice(BrokenDice)
        .build()
        .run()
        .await;

    match res {
        Err(PipelineError::ProducerFailed { reason }) => {
            assert!(reason.contains("dice"), "reason: {reason}");
        }
        other => panic!("expected ProducerFailed, got {other:?}"),
    }
    assert!(rec.deliveries().is_empty());
    assert_eq!(rec.count(EventKind::ShutdownRequested), 0);
    assert_eq!(rec.count(EventKind::PipelineFinished), 0);
    assert_eq!(rec.count(EventKind::PipelineStarted), 1);
}
