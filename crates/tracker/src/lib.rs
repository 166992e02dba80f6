pub use client::{ExpenseApi, RemoteClient};
pub use error::{RemoteError, StoreError};
pub use session::{Session, UserHandle};
pub use stats::{SpendingSummary, summarize};
pub use store::{LocalStore, default_store_path};
pub use tips::{Tip, TipAdvisor, TipOutcome, TipSource};
pub use tracker::{RemoteStatus, SyncOutcome, Tracker};

mod client;
mod error;
mod session;
mod stats;
mod store;
mod tips;
mod tracker;
