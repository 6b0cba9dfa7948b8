//! Results table component.

use std::sync::Arc;
use tracing::warn;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};

/// A table read through its row locator.
///
/// Rows are never cached: every read re-queries the live DOM, so the table
/// tracks whatever the page currently shows.
pub struct Table {
    driver: Arc<dyn Driver>,
    rows: Locator,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("rows", &self.rows).finish()
    }
}

impl Table {
    /// Create a table component over its row locator.
    ///
    /// Reads are immediate rather than waited: an empty table is a valid
    /// result set, so waiting for rows would misreport it as a timeout.
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, rows: Locator) -> Self {
        Self { driver, rows }
    }

    /// Number of rows currently rendered
    pub async fn row_count(&self) -> CribarResult<usize> {
        self.driver.count(&self.rows).await
    }

    /// Text of the row at `index`, bounds-checked against the live count
    pub async fn row_text(&self, index: usize) -> CribarResult<String> {
        let texts = self.driver.texts(&self.rows).await?;
        let count = texts.len();
        texts
            .into_iter()
            .nth(index)
            .ok_or(CribarError::RowOutOfRange { index, count })
    }

    /// Materialized texts of every row, in document order.
    ///
    /// Each call re-queries the page; the returned vector is a snapshot.
    pub async fn all_row_texts(&self) -> CribarResult<Vec<String>> {
        self.driver.texts(&self.rows).await
    }

    /// Check every row's text for membership in `expected`, in document
    /// order, failing fast on the first non-member.
    ///
    /// Zero rows is a valid outcome: it logs a warning and succeeds.
    pub async fn validate_all_cells_contain(&self, expected: &[String]) -> CribarResult<()> {
        let rows = self.all_row_texts().await?;
        if rows.is_empty() {
            warn!(table = %self.rows, "result table is empty, nothing to validate");
            return Ok(());
        }
        for text in rows {
            if !expected.contains(&text) {
                return Err(CribarError::UnexpectedValue {
                    value: text,
                    expected: expected.to_vec(),
                });
            }
        }
        Ok(())
    }
}
