//! Navigation component.

use std::sync::Arc;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};
use crate::timeouts::{OperationClass, TimeoutPolicy};
use crate::wait::wait_for_resolvable;

/// CSS class marking the active navigation entry
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// A navigation trigger with an optional arrival-confirmation target
pub struct Navigation {
    driver: Arc<dyn Driver>,
    policy: TimeoutPolicy,
    trigger: Locator,
    target: Option<Locator>,
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation")
            .field("trigger", &self.trigger)
            .field("target", &self.target)
            .finish()
    }
}

impl Navigation {
    /// Create a navigation component with no confirmation target
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy, trigger: Locator) -> Self {
        Self {
            driver,
            policy,
            trigger,
            target: None,
        }
    }

    /// Configure the element whose appearance confirms arrival
    #[must_use]
    pub fn with_target(mut self, target: Locator) -> Self {
        self.target = Some(target);
        self
    }

    /// Wait for the trigger, then click it
    pub async fn click(&self) -> CribarResult<()> {
        wait_for_resolvable(
            self.driver.as_ref(),
            &self.trigger,
            OperationClass::QuickAction,
            &self.policy,
        )
        .await?;
        self.driver.click(&self.trigger).await
    }

    /// Click the trigger, then wait for the configured target to appear.
    ///
    /// Requires a target; calling this without one is a wiring mistake and
    /// fails instead of silently skipping the confirmation.
    pub async fn click_and_wait_for_target(&self) -> CribarResult<()> {
        let target = self.target.as_ref().ok_or_else(|| CribarError::TargetNotSet {
            component: format!("navigation {}", self.trigger),
        })?;
        self.click().await?;
        wait_for_resolvable(
            self.driver.as_ref(),
            target,
            OperationClass::PageLoad,
            &self.policy,
        )
        .await?;
        Ok(())
    }

    /// Whether the trigger carries the default active-state class
    pub async fn is_active(&self) -> CribarResult<bool> {
        self.is_marked_active(DEFAULT_ACTIVE_CLASS).await
    }

    /// Whether the trigger carries `class` among its CSS classes
    pub async fn is_marked_active(&self, class: &str) -> CribarResult<bool> {
        let classes = self.driver.attribute(&self.trigger, "class").await?;
        Ok(classes
            .map(|value| value.split_whitespace().any(|token| token == class))
            .unwrap_or(false))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn trigger() -> Locator {
        Locator::text("Filters")
    }

    fn target() -> Locator {
        Locator::css(".filters-panel")
    }

    fn short_policy() -> TimeoutPolicy {
        TimeoutPolicy::new()
            .with_quick_action_ms(200)
            .with_page_load_ms(200)
    }

    fn navigation(driver: &Arc<MockDriver>) -> Navigation {
        Navigation::new(
            Arc::clone(driver) as Arc<dyn Driver>,
            short_policy(),
            trigger(),
        )
    }

    mod click_tests {
        use super::*;

        #[tokio::test]
        async fn click_and_wait_requires_a_configured_target() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(&trigger(), MockElement::new());

            let err = navigation(&driver)
                .click_and_wait_for_target()
                .await
                .unwrap_err();
            match err {
                CribarError::TargetNotSet { component } => {
                    assert!(component.contains("text=Filters"));
                }
                other => panic!("expected target-not-set, got {other:?}"),
            }
            // Fails before touching the page.
            assert!(driver.calls().is_empty());
        }

        #[tokio::test]
        async fn click_and_wait_confirms_arrival() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(&trigger(), MockElement::new());
            driver.reveal_on_click(&trigger(), &target(), MockElement::new());

            navigation(&driver)
                .with_target(target())
                .click_and_wait_for_target()
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn click_and_wait_times_out_when_target_never_appears() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(&trigger(), MockElement::new());

            let err = navigation(&driver)
                .with_target(target())
                .click_and_wait_for_target()
                .await
                .unwrap_err();
            match err {
                CribarError::Timeout { operation, .. } => {
                    assert!(operation.contains("page load"));
                }
                other => panic!("expected timeout, got {other:?}"),
            }
        }
    }

    mod active_tests {
        use super::*;

        #[tokio::test]
        async fn default_active_class_is_matched_as_a_token() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(
                &trigger(),
                MockElement::new().with_attribute("class", "nav-item active"),
            );
            assert!(navigation(&driver).is_active().await.unwrap());
        }

        #[tokio::test]
        async fn partial_token_does_not_count_as_active() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(
                &trigger(),
                MockElement::new().with_attribute("class", "inactive"),
            );
            assert!(!navigation(&driver).is_active().await.unwrap());
        }

        #[tokio::test]
        async fn caller_supplied_class_overrides_the_default() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(
                &trigger(),
                MockElement::new().with_attribute("class", "nav-item selected"),
            );
            let nav = navigation(&driver);
            assert!(nav.is_marked_active("selected").await.unwrap());
            assert!(!nav.is_active().await.unwrap());
        }

        #[tokio::test]
        async fn missing_class_attribute_is_not_active() {
            let driver = Arc::new(MockDriver::new());
            driver.add_element(&trigger(), MockElement::new());
            assert!(!navigation(&driver).is_active().await.unwrap());
        }
    }
}
