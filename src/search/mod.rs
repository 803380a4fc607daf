//! Query lifecycle
//!
//! - Debouncing raw keystrokes into committed queries (debounce.rs)
//! - Running a committed query against the photo source

pub mod debounce;

use crate::unsplash::{Photo, SharedSource};

/// Run one search and flatten failures to the banner text.
///
/// No retry: the failure is final for this query.
pub async fn run(source: SharedSource, query: String) -> Result<Vec<Photo>, String> {
    source
        .search(&query)
        .await
        .map_err(|e| {
            tracing::error!("Erro na API: {}", e);
            e.user_message()
        })
}
