//! Cribar: Page-Object Test Harness for Browser-Driven Issue Filtering
//!
//! Cribar (Spanish: "to sift/screen") drives a real or mock browser through
//! a login, a filter selection, and a result verification, with validation
//! kept outside the UI layer and every wait bound to a named timeout class.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     CRIBAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Workflow   │    │ Pages      │    │ Components │            │
//! │   │ (validate) │───►│ (compose)  │───►│ (interact) │            │
//! │   └────────────┘    └────────────┘    └──────┬─────┘            │
//! │   ┌────────────┐                             │                  │
//! │   │ Session    │    ┌──────────────────────▼─┴───┐              │
//! │   │ Bootstrap  │───►│ Driver (MockDriver | CDP)  │              │
//! │   └────────────┘    └────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod config;
mod driver;
mod locator;
mod result;
mod status;
mod timeouts;

/// UI components: dropdowns, checkboxes, inputs, tables, navigation.
pub mod components;

/// Page objects composing components into page-level workflows.
pub mod pages;

/// Authenticated-session bootstrap and persisted session state.
pub mod session;

/// Polling waits, probes, and URL patterns.
pub mod wait;

/// Caller-adjacent input validation and end-to-end filter flows.
pub mod workflow;

/// Real browser driver over the Chrome DevTools Protocol.
#[cfg(feature = "browser")]
pub mod cdp;

#[cfg(feature = "browser")]
pub use cdp::{BrowserConfig, CdpDriver};
pub use components::{
    Checkbox, Dropdown, FormInput, Navigation, Table, TextReader, DEFAULT_ACTIVE_CLASS,
};
pub use config::{
    Config, Credentials, KEY_BASE_URL, KEY_PASSWORD, KEY_USERNAME, REQUIRED_KEYS,
};
pub use driver::{Driver, MockDriver, MockElement};
pub use locator::{Locator, Selector};
pub use pages::{FiltersPage, HomePage, LoginPage};
pub use result::{CribarError, CribarResult};
pub use session::{
    OriginState, SameSite, SessionArtifact, SessionBootstrap, SessionCookie, StorageItem,
    DEFAULT_ARTIFACT_PATH,
};
pub use status::IssueStatus;
pub use timeouts::{
    OperationClass, TimeoutPolicy, DEFAULT_DROPDOWN_OPEN_MS, DEFAULT_FILTER_CLEAR_MS,
    DEFAULT_PAGE_LOAD_MS, DEFAULT_QUICK_ACTION_MS, MIN_PROBE_MS,
};
pub use wait::{
    probe_resolvable, probe_url, wait_for_resolvable, wait_for_url, UrlPattern, WaitOutcome,
    DEFAULT_POLL_INTERVAL_MS,
};
pub use workflow::{
    select_status_filters, status_labels, validate_status_selection, verify_result_statuses,
};

/// One-stop imports for tests and examples
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::cdp::*;
    pub use super::components::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::pages::*;
    pub use super::result::*;
    pub use super::session::*;
    pub use super::status::*;
    pub use super::timeouts::*;
    pub use super::wait::*;
    pub use super::workflow::*;
}
