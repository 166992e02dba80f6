mod config;

use api_types::expense::{Category, ExpenseRecord};
use chrono::Local;
use uuid::Uuid;

use tracker::{
    LocalStore, RemoteClient, RemoteStatus, Session, SyncOutcome, TipAdvisor, Tracker, summarize,
};

use crate::config::Command;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("tracker={level}", level = settings.log_level))
        .init();

    let session = match (&settings.user_id, &settings.token) {
        (Some(user_id), Some(token)) => Session::authenticated(user_id.as_str(), token.as_str()),
        _ => Session::anonymous(),
    };
    let client = RemoteClient::new(&settings.base_url)?;
    let store = LocalStore::open(&settings.store_path)?;
    let mut tracker = Tracker::new(store, client.clone(), session.clone(), !settings.offline);

    match command {
        Command::Add {
            amount,
            category,
            note,
            date,
        } => {
            let amount = config::validate_amount(amount)?;
            let record = ExpenseRecord {
                id: Uuid::new_v4().to_string(),
                amount,
                category: Category::from(category.as_str()),
                note,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
            };
            let id = record.id.clone();
            let status = tracker.add_expense(record).await?;
            println!("saved {id} ({})", describe_remote(&status));
        }
        Command::List => {
            if tracker.expenses().is_empty() {
                println!("no expenses yet");
            }
            for record in tracker.expenses() {
                let meta = record.category.meta();
                let note = record.note.as_deref().unwrap_or("");
                println!(
                    "{}  {:>10.2}  {} {:<14} {}  {}",
                    record.date, record.amount, meta.icon, meta.label, record.id, note
                );
            }
        }
        Command::Delete { id } => {
            let status = tracker.delete_expense(&id).await?;
            println!("deleted {id} ({})", describe_remote(&status));
        }
        Command::Sync => match tracker.reconcile().await? {
            SyncOutcome::Skipped => {
                println!("sync skipped: offline or not logged in");
            }
            SyncOutcome::RemoteFailed(err) => {
                println!("sync failed, local state kept: {err}");
            }
            SyncOutcome::Applied(count) => {
                println!("synced {count} expense(s) from the server");
            }
        },
        Command::Tip => {
            let advisor = TipAdvisor::new(client);
            let outcome = advisor.tip_for(tracker.expenses(), &session).await;
            println!("[{}] {}", outcome.tip.category, outcome.tip.text);
        }
        Command::Stats => {
            let summary = summarize(tracker.expenses());
            println!("total spent: {:.2} over {} expense(s)", summary.total, summary.count);
            let mut rows: Vec<_> = summary.by_category.iter().collect();
            rows.sort_by(|a, b| b.1.total_cmp(a.1));
            for (category, total) in rows {
                let meta = category.meta();
                println!("  {} {:<14} {:>10.2}", meta.icon, meta.label, total);
            }
            if let Some((top, total)) = summary.top_category() {
                println!("top category: {} ({total:.2})", top.meta().label);
            }
        }
    }

    Ok(())
}

fn describe_remote(status: &RemoteStatus) -> &'static str {
    match status {
        RemoteStatus::Synced => "synced to server",
        RemoteStatus::Skipped => "local only",
        RemoteStatus::Failed(_) => "local only, sync failed",
    }
}
