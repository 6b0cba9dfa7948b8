//! Checkbox component.

use std::sync::Arc;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};

/// A checkbox wrapped behind force-state and toggle verbs.
///
/// A pure wrapper: state reads and writes go straight through, without
/// waits, so no timeout policy is involved.
pub struct Checkbox {
    driver: Arc<dyn Driver>,
    locator: Locator,
}

impl std::fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkbox")
            .field("locator", &self.locator)
            .finish()
    }
}

impl Checkbox {
    /// Create a checkbox component
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, locator: Locator) -> Self {
        Self { driver, locator }
    }

    /// Force the checked state on
    pub async fn check(&self) -> CribarResult<()> {
        self.driver.set_checked(&self.locator, true).await
    }

    /// Force the checked state off
    pub async fn uncheck(&self) -> CribarResult<()> {
        self.driver.set_checked(&self.locator, false).await
    }

    /// Read the current state, then write its inverse.
    ///
    /// Two sequential operations, not atomic; the page is single-actor per
    /// test, so a race with external mutation is accepted.
    pub async fn toggle(&self) -> CribarResult<()> {
        let current = self.driver.is_checked(&self.locator).await?;
        self.driver.set_checked(&self.locator, !current).await
    }

    /// Current checked state
    pub async fn is_checked(&self) -> CribarResult<bool> {
        self.driver.is_checked(&self.locator).await
    }

    /// Existence, visibility and enabled checks, in that order.
    ///
    /// Short-circuits on the first failing check with an error naming it.
    pub async fn validate_before_interaction(&self) -> CribarResult<()> {
        if self.driver.count(&self.locator).await? == 0 {
            return Err(CribarError::NotFound {
                locator: self.locator.description(),
            });
        }
        if !self.driver.is_visible(&self.locator).await? {
            return Err(CribarError::InvalidState {
                message: format!("checkbox {} is not visible", self.locator),
            });
        }
        if !self.driver.is_enabled(&self.locator).await? {
            return Err(CribarError::InvalidState {
                message: format!("checkbox {} is not enabled", self.locator),
            });
        }
        Ok(())
    }
}
