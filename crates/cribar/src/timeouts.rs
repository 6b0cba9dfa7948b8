//! Timeout policy: named wait bounds for every suspending operation.
//!
//! Components never wait on a literal duration. Each wait names an
//! [`OperationClass`] and the bound comes from the [`TimeoutPolicy`] in
//! effect, so changing policy is a one-place edit.

use std::time::Duration;

/// Default bound for full page loads (milliseconds)
pub const DEFAULT_PAGE_LOAD_MS: u64 = 30_000;

/// Default bound for a dropdown's options container to appear (milliseconds)
pub const DEFAULT_DROPDOWN_OPEN_MS: u64 = 10_000;

/// Default bound for quick element actions (milliseconds)
pub const DEFAULT_QUICK_ACTION_MS: u64 = 5_000;

/// Default bound for clearing applied filters (milliseconds)
pub const DEFAULT_FILTER_CLEAR_MS: u64 = 5_000;

/// Floor for the short state probe (milliseconds)
pub const MIN_PROBE_MS: u64 = 100;

/// Classes of suspending operations, each with its own policy entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    /// Full page navigation and load
    PageLoad,
    /// Waiting for a dropdown's options container
    DropdownOpen,
    /// Short element interactions (click targets, fields, rows)
    QuickAction,
    /// Clearing applied filters
    FilterClear,
}

impl OperationClass {
    /// All operation classes
    pub const ALL: [Self; 4] = [
        Self::PageLoad,
        Self::DropdownOpen,
        Self::QuickAction,
        Self::FilterClear,
    ];

    /// Get display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PageLoad => "page load",
            Self::DropdownOpen => "dropdown open",
            Self::QuickAction => "quick action",
            Self::FilterClear => "filter clear",
        }
    }
}

/// Maximum wait durations per operation class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Bound for [`OperationClass::PageLoad`] in milliseconds
    pub page_load_ms: u64,
    /// Bound for [`OperationClass::DropdownOpen`] in milliseconds
    pub dropdown_open_ms: u64,
    /// Bound for [`OperationClass::QuickAction`] in milliseconds
    pub quick_action_ms: u64,
    /// Bound for [`OperationClass::FilterClear`] in milliseconds
    pub filter_clear_ms: u64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeoutPolicy {
    /// Create the default policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_load_ms: DEFAULT_PAGE_LOAD_MS,
            dropdown_open_ms: DEFAULT_DROPDOWN_OPEN_MS,
            quick_action_ms: DEFAULT_QUICK_ACTION_MS,
            filter_clear_ms: DEFAULT_FILTER_CLEAR_MS,
        }
    }

    /// Set the page-load bound
    #[must_use]
    pub const fn with_page_load_ms(mut self, ms: u64) -> Self {
        self.page_load_ms = ms;
        self
    }

    /// Set the dropdown-open bound
    #[must_use]
    pub const fn with_dropdown_open_ms(mut self, ms: u64) -> Self {
        self.dropdown_open_ms = ms;
        self
    }

    /// Set the quick-action bound
    #[must_use]
    pub const fn with_quick_action_ms(mut self, ms: u64) -> Self {
        self.quick_action_ms = ms;
        self
    }

    /// Set the filter-clear bound
    #[must_use]
    pub const fn with_filter_clear_ms(mut self, ms: u64) -> Self {
        self.filter_clear_ms = ms;
        self
    }

    /// Bound for an operation class in milliseconds
    #[must_use]
    pub const fn bound_ms(&self, class: OperationClass) -> u64 {
        match class {
            OperationClass::PageLoad => self.page_load_ms,
            OperationClass::DropdownOpen => self.dropdown_open_ms,
            OperationClass::QuickAction => self.quick_action_ms,
            OperationClass::FilterClear => self.filter_clear_ms,
        }
    }

    /// Bound for an operation class as a [`Duration`]
    #[must_use]
    pub const fn bound(&self, class: OperationClass) -> Duration {
        Duration::from_millis(self.bound_ms(class))
    }

    /// Bound for the short state probe, far below normal timeouts.
    ///
    /// Derived from the quick-action entry so test overrides shrink it too.
    #[must_use]
    pub const fn probe_ms(&self) -> u64 {
        let derived = self.quick_action_ms / 5;
        if derived < MIN_PROBE_MS {
            MIN_PROBE_MS
        } else {
            derived
        }
    }
}
