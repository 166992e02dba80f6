use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// A single logged spending event.
    ///
    /// The `id` is caller-generated and is the primary key in the local
    /// store and on the server; it is not validated for collisions.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseRecord {
        pub id: String,
        /// Positive amount in currency units. Enforced at submission,
        /// not by the store.
        pub amount: f64,
        pub category: Category,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub note: Option<String>,
        /// Calendar date, serialized as an ISO 8601 date string.
        pub date: NaiveDate,
    }

    /// Closed category set. Anything the server or an old store file sends
    /// that is not recognized collapses into [`Category::Other`] on
    /// deserialization, so downstream code never handles free text.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum Category {
        Food,
        Transport,
        Shopping,
        Entertainment,
        Health,
        Education,
        Bills,
        Other,
    }

    /// Display metadata for a category. The mapping in [`Category::meta`]
    /// is total; renderers must not keep their own fallback tables.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CategoryMeta {
        pub label: &'static str,
        pub icon: &'static str,
        /// Hex RGB, `#rrggbb`.
        pub color: &'static str,
    }

    impl Category {
        pub const ALL: [Category; 8] = [
            Category::Food,
            Category::Transport,
            Category::Shopping,
            Category::Entertainment,
            Category::Health,
            Category::Education,
            Category::Bills,
            Category::Other,
        ];

        /// Returns the canonical category string used on the wire and in
        /// the store file.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Food => "food",
                Self::Transport => "transport",
                Self::Shopping => "shopping",
                Self::Entertainment => "entertainment",
                Self::Health => "health",
                Self::Education => "education",
                Self::Bills => "bills",
                Self::Other => "other",
            }
        }

        pub fn meta(self) -> CategoryMeta {
            match self {
                Self::Food => CategoryMeta {
                    label: "Food",
                    icon: "🍕",
                    color: "#e07a5f",
                },
                Self::Transport => CategoryMeta {
                    label: "Transport",
                    icon: "🚌",
                    color: "#3d8bd4",
                },
                Self::Shopping => CategoryMeta {
                    label: "Shopping",
                    icon: "🛍️",
                    color: "#b675d4",
                },
                Self::Entertainment => CategoryMeta {
                    label: "Entertainment",
                    icon: "🎬",
                    color: "#e6a817",
                },
                Self::Health => CategoryMeta {
                    label: "Health",
                    icon: "🏥",
                    color: "#4caf78",
                },
                Self::Education => CategoryMeta {
                    label: "Education",
                    icon: "📚",
                    color: "#50a0a0",
                },
                Self::Bills => CategoryMeta {
                    label: "Bills",
                    icon: "🧾",
                    color: "#c85050",
                },
                Self::Other => CategoryMeta {
                    label: "Other",
                    icon: "💸",
                    color: "#8c8c8c",
                },
            }
        }
    }

    impl From<&str> for Category {
        fn from(value: &str) -> Self {
            match value.trim().to_ascii_lowercase().as_str() {
                "food" => Self::Food,
                "transport" => Self::Transport,
                "shopping" => Self::Shopping,
                "entertainment" => Self::Entertainment,
                "health" => Self::Health,
                "education" => Self::Education,
                "bills" => Self::Bills,
                _ => Self::Other,
            }
        }
    }

    impl From<String> for Category {
        fn from(value: String) -> Self {
            Self::from(value.as_str())
        }
    }

    impl From<Category> for String {
        fn from(value: Category) -> Self {
            value.as_str().to_string()
        }
    }
}

pub mod tips {
    use super::*;
    use crate::expense::ExpenseRecord;

    /// Request body for `POST /api/tips`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TipRequest {
        pub expenses: Vec<ExpenseRecord>,
    }

    /// Response body for `POST /api/tips`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TipResponse {
        pub tip: String,
        pub category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub priority: Option<String>,
    }
}
