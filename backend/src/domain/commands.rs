//! Domain-level command and query types
//! These structs are used by services inside the domain layer. Callers build
//! them directly; they never cross a serialization boundary.

pub mod expenses {
    use shared::SortKey;

    /// Filter and ordering for the expense list.
    ///
    /// Empty strings behave like absent filters.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ExpenseQuery {
        pub text_filter: Option<String>,
        pub category_id: Option<String>,
        pub sort_key: Option<SortKey>,
    }

    impl ExpenseQuery {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(mut self, text: impl Into<String>) -> Self {
            self.text_filter = Some(text.into());
            self
        }

        pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
            self.category_id = Some(category_id.into());
            self
        }

        pub fn sorted_by(mut self, sort_key: SortKey) -> Self {
            self.sort_key = Some(sort_key);
            self
        }

        pub fn effective_sort_key(&self) -> SortKey {
            self.sort_key.unwrap_or_default()
        }
    }

    /// Input for creating a new expense. The store assigns id and timestamps.
    #[derive(Debug, Clone, Default)]
    pub struct CreateExpenseCommand {
        pub amount: f64,
        pub description: String,
        pub date: String,
        pub category_id: String,
        pub notes: Option<String>,
        pub is_recurring: bool,
        pub tags: Vec<String>,
        pub receipt_url: Option<String>,
    }
}
