//! Filters page object.
//!
//! Composes the filter controls and the results table. The page returns
//! data and never judges it; whitelist validation and result assertions
//! belong to the calling workflow.

use std::sync::Arc;

use crate::components::{Checkbox, Dropdown, FormInput, Table, TextReader};
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::CribarResult;
use crate::timeouts::TimeoutPolicy;

/// Status dropdown trigger
pub const STATUS_TRIGGER: &str = "#status-filter .trigger";

/// Status dropdown options container
pub const STATUS_MENU: &str = "#status-filter .menu";

/// "Only my issues" checkbox
pub const ONLY_MY_ISSUES: &str = "#only-my-issues";

/// `name` attribute of the free-text search field
pub const SEARCH_FIELD: &str = "search";

/// Status cell of every result row
pub const RESULT_STATUS_CELLS: &str = ".results tbody tr .status";

/// Summary line above the results
pub const RESULTS_SUMMARY: &str = ".results-summary";

/// The issue-filter view
#[derive(Debug)]
pub struct FiltersPage {
    status_dropdown: Dropdown,
    only_my_issues: Checkbox,
    search: FormInput,
    results: Table,
    summary: TextReader,
}

impl FiltersPage {
    /// Create the filters page over a driver
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy) -> Self {
        Self {
            status_dropdown: Dropdown::new(
                Arc::clone(&driver),
                policy,
                Locator::css(STATUS_TRIGGER),
                Locator::css(STATUS_MENU),
            ),
            only_my_issues: Checkbox::new(Arc::clone(&driver), Locator::css(ONLY_MY_ISSUES)),
            search: FormInput::new(
                Arc::clone(&driver),
                policy,
                Locator::attribute("name", SEARCH_FIELD),
            ),
            results: Table::new(Arc::clone(&driver), Locator::css(RESULT_STATUS_CELLS)),
            summary: TextReader::new(driver, policy, Locator::css(RESULTS_SUMMARY)),
        }
    }

    /// Select one status option in the dropdown
    pub async fn select_status(&self, label: &str) -> CribarResult<()> {
        self.status_dropdown.select_option(label).await
    }

    /// The status dropdown, for close and open-state probes
    #[must_use]
    pub const fn status_dropdown(&self) -> &Dropdown {
        &self.status_dropdown
    }

    /// The "only my issues" checkbox
    #[must_use]
    pub const fn only_my_issues(&self) -> &Checkbox {
        &self.only_my_issues
    }

    /// Fill the free-text search filter
    pub async fn search(&self, text: &str) -> CribarResult<()> {
        self.search.fill(text).await
    }

    /// Clear the free-text search filter
    pub async fn clear_search(&self) -> CribarResult<()> {
        self.search.clear().await
    }

    /// Number of result rows currently rendered
    pub async fn result_count(&self) -> CribarResult<usize> {
        self.results.row_count().await
    }

    /// Status text of every result row, in document order
    pub async fn result_statuses(&self) -> CribarResult<Vec<String>> {
        self.results.all_row_texts().await
    }

    /// The results table, for row reads and membership validation
    #[must_use]
    pub const fn results(&self) -> &Table {
        &self.results
    }

    /// Summary line text
    pub async fn summary(&self) -> CribarResult<String> {
        self.summary.read().await
    }
}
