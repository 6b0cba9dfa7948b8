//! Dropdown component.
//!
//! State machine over the live page:
//! `Closed -> (open) -> Open -> (select_option | close) -> Closed`.
//! The component itself stays stateless; the page holds the state.

use std::sync::Arc;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};
use crate::timeouts::{OperationClass, TimeoutPolicy};
use crate::wait::{probe_resolvable, wait_for_resolvable};

/// A dropdown with a trigger element and an options container
pub struct Dropdown {
    driver: Arc<dyn Driver>,
    policy: TimeoutPolicy,
    trigger: Locator,
    options_container: Locator,
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("trigger", &self.trigger)
            .field("options_container", &self.options_container)
            .finish()
    }
}

impl Dropdown {
    /// Create a dropdown component
    #[must_use]
    pub fn new(
        driver: Arc<dyn Driver>,
        policy: TimeoutPolicy,
        trigger: Locator,
        options_container: Locator,
    ) -> Self {
        Self {
            driver,
            policy,
            trigger,
            options_container,
        }
    }

    /// Click the trigger and wait for the options container to appear.
    ///
    /// Bounded by the dropdown-open policy entry; expiry surfaces a Timeout
    /// error to the caller and is not retried here.
    pub async fn open(&self) -> CribarResult<()> {
        self.driver.click(&self.trigger).await?;
        wait_for_resolvable(
            self.driver.as_ref(),
            &self.options_container,
            OperationClass::DropdownOpen,
            &self.policy,
        )
        .await?;
        Ok(())
    }

    /// Open the dropdown and click the option whose text matches exactly.
    ///
    /// An option resolving to zero elements fails naming that option; the
    /// container contents are not enumerated.
    pub async fn select_option(&self, text: &str) -> CribarResult<()> {
        self.open().await?;

        let option = Locator::role_named("option", text);
        if self.driver.count(&option).await? == 0 {
            return Err(CribarError::NotFound {
                locator: format!("option {text:?} in {}", self.options_container),
            });
        }
        self.driver.click(&option).await
    }

    /// Send Escape unconditionally, without verifying the dropdown closed.
    ///
    /// Callers needing confirmation check [`Dropdown::is_open`] separately.
    pub async fn close(&self) -> CribarResult<()> {
        self.driver.press_key("Escape").await
    }

    /// Short probe for the open state.
    ///
    /// Bounded far below normal timeouts; reports `false` on its own timeout
    /// instead of failing.
    pub async fn is_open(&self) -> CribarResult<bool> {
        probe_resolvable(
            self.driver.as_ref(),
            &self.options_container,
            self.policy.probe_ms(),
        )
        .await
    }

    /// Trigger locator this dropdown wraps
    #[must_use]
    pub const fn trigger(&self) -> &Locator {
        &self.trigger
    }
}
