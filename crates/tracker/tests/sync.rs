use std::{
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::{
    expense::{Category, ExpenseRecord},
    tips::TipResponse,
};
use tracker::{
    ExpenseApi, LocalStore, RemoteError, RemoteStatus, Session, SyncOutcome, TipAdvisor,
    TipSource, Tracker,
};

fn store_path() -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_stores");
    std::fs::create_dir_all(&root).unwrap();
    root.join(format!("expenses_{}.json", Uuid::new_v4()))
}

fn record(id: &str, amount: f64, category: Category, date: &str) -> ExpenseRecord {
    ExpenseRecord {
        id: id.to_string(),
        amount,
        category,
        note: None,
        date: date.parse::<NaiveDate>().unwrap(),
    }
}

/// In-memory stand-in for the expense service.
#[derive(Default)]
struct FakeRemote {
    records: Mutex<Vec<ExpenseRecord>>,
    fail_list: bool,
    fail_create: bool,
    fail_tip: bool,
    calls: AtomicUsize,
}

impl FakeRemote {
    fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExpenseApi for FakeRemote {
    async fn create_expense(
        &self,
        _token: &str,
        record: &ExpenseRecord,
    ) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(RemoteError::Server("create rejected".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_expenses(&self, _token: &str) -> Result<Vec<ExpenseRecord>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(RemoteError::Server("list unavailable".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn delete_expense(&self, _token: &str, id: &str) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().retain(|record| record.id != id);
        Ok(())
    }

    async fn request_tip(
        &self,
        _token: &str,
        _expenses: &[ExpenseRecord],
    ) -> Result<TipResponse, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_tip {
            return Err(RemoteError::Server("ai unavailable".to_string()));
        }
        Ok(TipResponse {
            tip: "Cook at home twice a week.".to_string(),
            category: "spending".to_string(),
            priority: Some("high".to_string()),
        })
    }
}

fn session() -> Session {
    Session::authenticated("alice", "token-1")
}

#[tokio::test]
async fn add_then_list_contains_exactly_one_record() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), true);

    let status = tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();

    assert!(matches!(status, RemoteStatus::Synced));
    let matching: Vec<_> = tracker.expenses().iter().filter(|r| r.id == "1").collect();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
async fn readding_same_id_overwrites_instead_of_duplicating() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, Session::anonymous(), false);

    tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    tracker
        .add_expense(record("1", 99.0, Category::Bills, "2024-03-01"))
        .await
        .unwrap();

    assert_eq!(tracker.expenses().len(), 1);
    assert_eq!(tracker.expenses()[0].amount, 99.0);
}

#[tokio::test]
async fn deleting_absent_id_is_a_noop() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, Session::anonymous(), false);

    tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    let status = tracker.delete_expense("never-existed").await.unwrap();

    assert!(matches!(status, RemoteStatus::Skipped));
    assert_eq!(tracker.expenses().len(), 1);
}

#[tokio::test]
async fn records_survive_a_fresh_controller_over_the_same_store() {
    let path = store_path();
    let remote = FakeRemote::default();
    {
        let store = LocalStore::open(&path).unwrap();
        let mut tracker = Tracker::new(store, &remote, Session::anonymous(), false);
        tracker
            .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
            .await
            .unwrap();
        tracker
            .add_expense(record("2", 40.0, Category::Bills, "2024-03-02"))
            .await
            .unwrap();
    }

    let store = LocalStore::open(&path).unwrap();
    let tracker = Tracker::new(store, &remote, Session::anonymous(), false);

    assert_eq!(tracker.expenses().len(), 2);
    assert_eq!(tracker.expenses()[0], record("2", 40.0, Category::Bills, "2024-03-02"));
    assert_eq!(tracker.expenses()[1], record("1", 12.5, Category::Food, "2024-03-01"));
}

#[tokio::test]
async fn newest_date_lists_first() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, Session::anonymous(), false);

    tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    tracker
        .add_expense(record("2", 40.0, Category::Bills, "2024-03-02"))
        .await
        .unwrap();

    let ids: Vec<&str> = tracker.expenses().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[tokio::test]
async fn offline_add_skips_the_remote_call() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), false);

    let status = tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();

    assert!(matches!(status, RemoteStatus::Skipped));
    assert_eq!(remote.call_count(), 0);
    assert_eq!(tracker.expenses().len(), 1);
}

#[tokio::test]
async fn failed_mirror_keeps_the_local_write() {
    let remote = FakeRemote {
        fail_create: true,
        ..FakeRemote::default()
    };
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), true);

    let status = tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();

    assert!(matches!(status, RemoteStatus::Failed(_)));
    assert_eq!(tracker.expenses().len(), 1);
}

#[tokio::test]
async fn reconcile_while_offline_is_a_noop() {
    let remote = FakeRemote::with_records(vec![record("9", 1.0, Category::Other, "2024-01-01")]);
    let path = store_path();
    let store = LocalStore::open(&path).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), false);

    tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    let outcome = tracker.reconcile().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Skipped));
    assert_eq!(remote.call_count(), 0);
    assert_eq!(tracker.expenses().len(), 1);
    assert_eq!(LocalStore::open(&path).unwrap().len(), 1);
}

#[tokio::test]
async fn reconcile_keeps_local_state_when_the_fetch_fails() {
    let remote = FakeRemote {
        fail_list: true,
        ..FakeRemote::default()
    };
    let path = store_path();
    let store = LocalStore::open(&path).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), false);

    tracker
        .add_expense(record("1", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    tracker.set_online(true).await.unwrap();
    let outcome = tracker.reconcile().await.unwrap();

    // No partial clear: both the list and the store file are untouched.
    assert!(matches!(outcome, SyncOutcome::RemoteFailed(_)));
    assert_eq!(tracker.expenses().len(), 1);
    let reopened = LocalStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get("1").is_some());
}

#[tokio::test]
async fn reconcile_replaces_local_content_with_the_server_list() {
    let remote = FakeRemote::with_records(vec![
        record("s1", 5.0, Category::Transport, "2024-02-01"),
        record("s2", 8.0, Category::Food, "2024-02-03"),
    ]);
    let path = store_path();
    let store = LocalStore::open(&path).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), true);

    tracker
        .add_expense(record("local", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    let outcome = tracker.reconcile().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Applied(3)));
    let ids: Vec<&str> = tracker.expenses().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["local", "s2", "s1"]);
    assert_eq!(LocalStore::open(&path).unwrap().len(), 3);
}

/// Documents the data-loss window of server-authoritative reconciliation:
/// a record added while offline is discarded when connectivity returns
/// before it was ever mirrored. This is the intended last-write-wins
/// behavior, not an accident.
#[tokio::test]
async fn reconcile_discards_records_added_while_offline() {
    let remote = FakeRemote::with_records(vec![record("s1", 5.0, Category::Transport, "2024-02-01")]);
    let path = store_path();
    let store = LocalStore::open(&path).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), false);

    tracker
        .add_expense(record("unsynced", 12.5, Category::Food, "2024-03-01"))
        .await
        .unwrap();
    let outcome = tracker.set_online(true).await.unwrap();

    assert!(matches!(outcome, Some(SyncOutcome::Applied(1))));
    assert!(tracker.expenses().iter().all(|r| r.id != "unsynced"));
    assert!(LocalStore::open(&path).unwrap().get("unsynced").is_none());
}

#[tokio::test]
async fn going_online_triggers_exactly_one_reconcile() {
    let remote = FakeRemote::default();
    let store = LocalStore::open(store_path()).unwrap();
    let mut tracker = Tracker::new(store, &remote, session(), false);

    assert!(tracker.set_online(true).await.unwrap().is_some());
    assert_eq!(remote.call_count(), 1);

    // Already online: no further reconcile.
    assert!(tracker.set_online(true).await.unwrap().is_none());
    assert!(tracker.set_online(false).await.unwrap().is_none());
    assert_eq!(remote.call_count(), 1);
}

#[tokio::test]
async fn tip_for_empty_list_is_static_and_offline() {
    let remote = FakeRemote::default();
    let advisor = TipAdvisor::new(&remote);

    let outcome = advisor.tip_for(&[], &session()).await;

    assert!(matches!(outcome.source, TipSource::Static));
    assert_eq!(outcome.tip.category, "general");
    assert!(outcome.tip.text.starts_with("Start tracking"));
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn tip_without_identity_is_static_and_offline() {
    let remote = FakeRemote::default();
    let advisor = TipAdvisor::new(&remote);
    let expenses = [record("1", 12.5, Category::Food, "2024-03-01")];

    let outcome = advisor.tip_for(&expenses, &Session::anonymous()).await;

    assert!(matches!(outcome.source, TipSource::Static));
    assert!(outcome.tip.text.starts_with("Please log in"));
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn tip_uses_the_remote_response_when_available() {
    let remote = FakeRemote::default();
    let advisor = TipAdvisor::new(&remote);
    let expenses = [record("1", 12.5, Category::Food, "2024-03-01")];

    let outcome = advisor.tip_for(&expenses, &session()).await;

    assert!(matches!(outcome.source, TipSource::Remote));
    assert_eq!(outcome.tip.text, "Cook at home twice a week.");
    assert_eq!(outcome.tip.category, "spending");
}

#[tokio::test]
async fn tip_falls_back_when_the_service_fails() {
    let remote = FakeRemote {
        fail_tip: true,
        ..FakeRemote::default()
    };
    let advisor = TipAdvisor::new(&remote);
    let expenses = [record("1", 12.5, Category::Food, "2024-03-01")];

    let outcome = advisor.tip_for(&expenses, &session()).await;

    assert!(matches!(outcome.source, TipSource::Fallback(_)));
    assert_eq!(outcome.tip.category, "general");
    assert!(outcome.tip.text.contains("50/30/20"));
}
