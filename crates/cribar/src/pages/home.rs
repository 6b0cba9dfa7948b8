//! Home page object.

use std::sync::Arc;

use crate::components::{Navigation, TextReader};
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::CribarResult;
use crate::timeouts::TimeoutPolicy;

/// Navigation entry leading to the filters view
pub const FILTERS_NAV_TEXT: &str = "Filters";

/// Panel whose appearance confirms the filters view arrived
pub const FILTERS_PANEL: &str = ".filters-panel";

/// Page heading element
pub const PAGE_TITLE: &str = ".page-title";

/// The landing page after authentication
#[derive(Debug)]
pub struct HomePage {
    filters_nav: Navigation,
    title: TextReader,
}

impl HomePage {
    /// Create the home page over a driver
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy) -> Self {
        let filters_trigger = Locator::text(FILTERS_NAV_TEXT);
        let filters_panel = Locator::css(FILTERS_PANEL);
        let title = Locator::css(PAGE_TITLE);

        Self {
            filters_nav: Navigation::new(Arc::clone(&driver), policy, filters_trigger)
                .with_target(filters_panel),
            title: TextReader::new(driver, policy, title),
        }
    }

    /// Navigate to the filters view and wait for its panel
    pub async fn open_filters(&self) -> CribarResult<()> {
        self.filters_nav.click_and_wait_for_target().await
    }

    /// Whether the filters entry is marked active
    pub async fn is_filters_nav_active(&self) -> CribarResult<bool> {
        self.filters_nav.is_active().await
    }

    /// Current page heading
    pub async fn title(&self) -> CribarResult<String> {
        self.title.read().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn short_policy() -> TimeoutPolicy {
        TimeoutPolicy::new()
            .with_quick_action_ms(200)
            .with_page_load_ms(200)
    }

    #[tokio::test]
    async fn open_filters_confirms_panel_arrival() {
        let driver = Arc::new(MockDriver::new());
        let trigger = Locator::text(FILTERS_NAV_TEXT);
        driver.add_element(&trigger, MockElement::new());
        driver.reveal_on_click(&trigger, &Locator::css(FILTERS_PANEL), MockElement::new());

        let page = HomePage::new(Arc::clone(&driver) as Arc<dyn Driver>, short_policy());
        page.open_filters().await.unwrap();
        assert!(driver.was_called("click"));
    }

    #[tokio::test]
    async fn nav_active_state_comes_from_the_class_marker() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(
            &Locator::text(FILTERS_NAV_TEXT),
            MockElement::new().with_attribute("class", "nav-item active"),
        );

        let page = HomePage::new(Arc::clone(&driver) as Arc<dyn Driver>, short_policy());
        assert!(page.is_filters_nav_active().await.unwrap());
    }

    #[tokio::test]
    async fn title_reads_the_heading_text() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(
            &Locator::css(PAGE_TITLE),
            MockElement::with_text("Dashboard"),
        );

        let page = HomePage::new(Arc::clone(&driver) as Arc<dyn Driver>, short_policy());
        assert_eq!(page.title().await.unwrap(), "Dashboard");
    }
}
