//! Personalized financial tips with static fallbacks.

use api_types::{expense::ExpenseRecord, tips::TipResponse};

use crate::{client::ExpenseApi, error::RemoteError, session::Session};

pub const START_TRACKING_TIP: &str =
    "Start tracking your expenses to get personalized financial advice! 💰";
pub const LOG_IN_TIP: &str = "Please log in to get personalized AI financial tips! 🔐";
pub const FALLBACK_TIP: &str = "Try the 50/30/20 rule: 50% needs, 30% wants, 20% savings! 💰";

/// A short financial suggestion with a category tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tip {
    pub text: String,
    pub category: String,
}

/// Where a tip came from, so callers can assert on the failure path
/// instead of relying on side-channel logging.
#[derive(Debug)]
pub enum TipSource {
    /// Canned tip; no network call was made.
    Static,
    /// Personalized tip from the tip service.
    Remote,
    /// The tip service failed; the fixed fallback tip was used.
    Fallback(RemoteError),
}

#[derive(Debug)]
pub struct TipOutcome {
    pub tip: Tip,
    pub source: TipSource,
}

pub struct TipAdvisor<A> {
    api: A,
}

impl<A: ExpenseApi> TipAdvisor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Produces a tip for the given expenses.
    ///
    /// An empty list or a missing identity short-circuits to a static
    /// tip without touching the network. A failed remote request falls
    /// back to a fixed general tip; the error travels in the outcome.
    pub async fn tip_for(&self, expenses: &[ExpenseRecord], session: &Session) -> TipOutcome {
        if expenses.is_empty() {
            return TipOutcome {
                tip: Tip::general(START_TRACKING_TIP),
                source: TipSource::Static,
            };
        }
        let Some(user) = session.user() else {
            return TipOutcome {
                tip: Tip::general(LOG_IN_TIP),
                source: TipSource::Static,
            };
        };

        match self.api.request_tip(user.id_token(), expenses).await {
            Ok(response) => TipOutcome {
                tip: Tip::from(response),
                source: TipSource::Remote,
            },
            Err(err) => {
                tracing::warn!("tip request failed, using fallback: {err}");
                TipOutcome {
                    tip: Tip::general(FALLBACK_TIP),
                    source: TipSource::Fallback(err),
                }
            }
        }
    }
}

impl Tip {
    fn general(text: &str) -> Self {
        Self {
            text: text.to_string(),
            category: "general".to_string(),
        }
    }
}

impl From<TipResponse> for Tip {
    fn from(response: TipResponse) -> Self {
        Self {
            text: response.tip,
            category: response.category,
        }
    }
}
