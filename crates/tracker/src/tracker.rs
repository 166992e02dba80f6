//! The expense cache/sync controller.
//!
//! Presents one coherent in-memory list of expenses, combining local
//! durability with opportunistic remote mirroring. Local writes are
//! authoritative: a store failure aborts the operation, a remote failure
//! is reported in the outcome value and otherwise swallowed.

use api_types::expense::ExpenseRecord;

use crate::{
    client::ExpenseApi,
    error::{RemoteError, StoreError},
    session::{Session, UserHandle},
    store::LocalStore,
};

/// Outcome of the best-effort remote half of a local-first write.
#[derive(Debug)]
pub enum RemoteStatus {
    /// Mirrored to the server.
    Synced,
    /// Offline or unauthenticated; no remote call was attempted.
    Skipped,
    /// The remote call failed; local state stands and is not rolled back.
    Failed(RemoteError),
}

/// Outcome of a reconciliation pass.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Offline or unauthenticated; nothing was touched.
    Skipped,
    /// The remote list could not be fetched; local state is untouched.
    RemoteFailed(RemoteError),
    /// Local content replaced with the server's list of this many records.
    Applied(usize),
}

pub struct Tracker<A> {
    store: LocalStore,
    api: A,
    session: Session,
    online: bool,
    expenses: Vec<ExpenseRecord>,
}

impl<A: ExpenseApi> Tracker<A> {
    /// Loads the in-memory list from the store, newest date first.
    pub fn new(store: LocalStore, api: A, session: Session, online: bool) -> Self {
        let mut expenses = store.records();
        sort_by_date_desc(&mut expenses);
        Self {
            store,
            api,
            session,
            online,
            expenses,
        }
    }

    /// Current list, date descending. Records added since the last load
    /// sit at the front regardless of date; they are reordered on the
    /// next full load or reconciliation.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Writes locally, then mirrors to the server best-effort.
    ///
    /// A store failure aborts the whole operation and leaves the
    /// in-memory list unchanged. Re-adding an existing id overwrites the
    /// record instead of duplicating it.
    pub async fn add_expense(&mut self, record: ExpenseRecord) -> Result<RemoteStatus, StoreError> {
        self.store.put(record.clone())?;

        self.expenses.retain(|existing| existing.id != record.id);
        self.expenses.insert(0, record.clone());

        let Some(user) = self.remote_user() else {
            return Ok(RemoteStatus::Skipped);
        };
        match self.api.create_expense(user.id_token(), &record).await {
            Ok(()) => Ok(RemoteStatus::Synced),
            Err(err) => {
                tracing::warn!(id = %record.id, "failed to mirror expense to server: {err}");
                Ok(RemoteStatus::Failed(err))
            }
        }
    }

    /// Removes locally, then deletes on the server best-effort. An
    /// absent id is a no-op, not an error.
    pub async fn delete_expense(&mut self, id: &str) -> Result<RemoteStatus, StoreError> {
        self.store.delete(id)?;
        self.expenses.retain(|record| record.id != id);

        let Some(user) = self.remote_user() else {
            return Ok(RemoteStatus::Skipped);
        };
        match self.api.delete_expense(user.id_token(), id).await {
            Ok(()) => Ok(RemoteStatus::Synced),
            Err(err) => {
                tracing::warn!(%id, "failed to mirror deletion to server: {err}");
                Ok(RemoteStatus::Failed(err))
            }
        }
    }

    /// Replaces local content with the server's list.
    ///
    /// Server-authoritative, last-write-wins: a record added locally
    /// while offline and not yet mirrored is discarded when the server's
    /// list does not include it. No merge is attempted.
    pub async fn reconcile(&mut self) -> Result<SyncOutcome, StoreError> {
        let Some(user) = self.remote_user() else {
            return Ok(SyncOutcome::Skipped);
        };
        let remote = match self.api.list_expenses(user.id_token()).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("reconcile fetch failed, keeping local state: {err}");
                return Ok(SyncOutcome::RemoteFailed(err));
            }
        };

        // Clear only once the fetch has succeeded, so a failed fetch can
        // never leave a partially emptied store.
        self.store.clear()?;
        for record in &remote {
            self.store.put(record.clone())?;
        }

        let mut expenses = remote;
        sort_by_date_desc(&mut expenses);
        let count = expenses.len();
        self.expenses = expenses;
        Ok(SyncOutcome::Applied(count))
    }

    /// Records a connectivity change. The offline-to-online transition
    /// triggers one reconciliation pass; transitions are not debounced.
    pub async fn set_online(&mut self, online: bool) -> Result<Option<SyncOutcome>, StoreError> {
        let was_online = self.online;
        self.online = online;
        if online && !was_online {
            return self.reconcile().await.map(Some);
        }
        Ok(None)
    }

    fn remote_user(&self) -> Option<&UserHandle> {
        if !self.online {
            return None;
        }
        self.session.user()
    }
}

fn sort_by_date_desc(records: &mut [ExpenseRecord]) {
    // Stable sort: same-date records keep their storage order.
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
