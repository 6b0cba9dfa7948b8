//! Form input and read-only text components.

use std::sync::Arc;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::CribarResult;
use crate::timeouts::{OperationClass, TimeoutPolicy};
use crate::wait::wait_for_resolvable;

/// A writable form field
pub struct FormInput {
    driver: Arc<dyn Driver>,
    policy: TimeoutPolicy,
    locator: Locator,
}

impl std::fmt::Debug for FormInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInput")
            .field("locator", &self.locator)
            .finish()
    }
}

impl FormInput {
    /// Create a form input component
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy, locator: Locator) -> Self {
        Self {
            driver,
            policy,
            locator,
        }
    }

    /// Wait for the field, then replace its value
    pub async fn fill(&self, text: &str) -> CribarResult<()> {
        wait_for_resolvable(
            self.driver.as_ref(),
            &self.locator,
            OperationClass::QuickAction,
            &self.policy,
        )
        .await?;
        self.driver.fill(&self.locator, text).await
    }

    /// Wait for the field, then empty it.
    ///
    /// Clearing applied filters gets its own policy entry since the page
    /// re-renders results while the field resets.
    pub async fn clear(&self) -> CribarResult<()> {
        wait_for_resolvable(
            self.driver.as_ref(),
            &self.locator,
            OperationClass::FilterClear,
            &self.policy,
        )
        .await?;
        self.driver.fill(&self.locator, "").await
    }
}

/// A read-only text element
pub struct TextReader {
    driver: Arc<dyn Driver>,
    policy: TimeoutPolicy,
    locator: Locator,
}

impl std::fmt::Debug for TextReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextReader")
            .field("locator", &self.locator)
            .finish()
    }
}

impl TextReader {
    /// Create a text reader component
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy, locator: Locator) -> Self {
        Self {
            driver,
            policy,
            locator,
        }
    }

    /// Wait for the element, then read its text content
    pub async fn read(&self) -> CribarResult<String> {
        wait_for_resolvable(
            self.driver.as_ref(),
            &self.locator,
            OperationClass::QuickAction,
            &self.policy,
        )
        .await?;
        self.driver.text(&self.locator).await
    }
}
