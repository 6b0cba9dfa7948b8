//! Abstract driver seam over the browser engine.
//!
//! Components talk to the page exclusively through [`Driver`], so the real
//! CDP implementation and the in-memory [`MockDriver`] are interchangeable.
//! The mock records every call, which is how workflow tests verify that
//! validation failures never reach the page.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};
use crate::session::SessionArtifact;

/// Page-interaction seam every component talks through.
///
/// Implementations:
///
/// - `CdpDriver` - real browser over the DevTools protocol (feature `browser`)
/// - [`MockDriver`] - in-memory fake page for unit testing
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to URL
    async fn goto(&self, url: &str) -> CribarResult<()>;

    /// Get current URL
    async fn current_url(&self) -> CribarResult<String>;

    /// Click the first element the locator resolves to
    async fn click(&self, locator: &Locator) -> CribarResult<()>;

    /// Replace the value of an input element
    async fn fill(&self, locator: &Locator, text: &str) -> CribarResult<()>;

    /// Send a key press to the page
    async fn press_key(&self, key: &str) -> CribarResult<()>;

    /// Count elements the locator currently resolves to
    async fn count(&self, locator: &Locator) -> CribarResult<usize>;

    /// Text content of the first resolved element
    async fn text(&self, locator: &Locator) -> CribarResult<String>;

    /// Text content of every resolved element, in document order
    async fn texts(&self, locator: &Locator) -> CribarResult<Vec<String>>;

    /// Whether the first resolved element is visible
    async fn is_visible(&self, locator: &Locator) -> CribarResult<bool>;

    /// Whether the first resolved element is enabled
    async fn is_enabled(&self, locator: &Locator) -> CribarResult<bool>;

    /// Whether the first resolved element is checked
    async fn is_checked(&self, locator: &Locator) -> CribarResult<bool>;

    /// Force the checked state of the first resolved element
    async fn set_checked(&self, locator: &Locator, checked: bool) -> CribarResult<()>;

    /// Attribute value of the first resolved element
    async fn attribute(&self, locator: &Locator, name: &str) -> CribarResult<Option<String>>;

    /// Snapshot cookies and per-origin storage for session persistence
    async fn storage_snapshot(&self) -> CribarResult<SessionArtifact>;

    /// Release all browser resources
    async fn close(&self) -> CribarResult<()>;
}

// =============================================================================
// Mock driver
// =============================================================================

/// One staged element list behind a locator description.
///
/// `texts` holds one entry per resolved element; an empty vector means the
/// locator resolves to nothing, same as an absent entry.
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Text content per resolved element, in document order
    pub texts: Vec<String>,
    /// Visibility of the first element
    pub visible: bool,
    /// Enabled state of the first element
    pub enabled: bool,
    /// Checked state of the first element
    pub checked: bool,
    /// Attributes of the first element
    pub attributes: HashMap<String, String>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MockElement {
    /// A single visible, enabled element with empty text
    #[must_use]
    pub fn new() -> Self {
        Self {
            texts: vec![String::new()],
            visible: true,
            enabled: true,
            checked: false,
            attributes: HashMap::new(),
        }
    }

    /// Single element with the given text
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            ..Self::new()
        }
    }

    /// Multiple elements, one per text entry
    #[must_use]
    pub fn with_texts(texts: Vec<String>) -> Self {
        Self {
            texts,
            ..Self::new()
        }
    }

    /// Mark the element hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the element disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the checked state
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    fn count(&self) -> usize {
        self.texts.len()
    }
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    elements: HashMap<String, MockElement>,
    reveal_on_click: HashMap<String, Vec<(String, MockElement)>>,
    redirect_on_click: HashMap<String, String>,
    fills: HashMap<String, String>,
    storage: Option<SessionArtifact>,
    call_history: Vec<String>,
}

impl MockState {
    /// A staged entry with zero elements resolves to nothing, same as an
    /// absent entry.
    fn resolved(&self, key: &str) -> Option<&MockElement> {
        self.elements.get(key).filter(|e| e.count() > 0)
    }
}

/// Mock driver for unit testing.
///
/// Elements are staged against locator descriptions and looked up the same
/// way, so components exercise the exact locators they would send to a real
/// page. Every trait call lands in the call history for verification.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stage an element list behind a locator
    pub fn add_element(&self, locator: &Locator, element: MockElement) {
        self.state()
            .elements
            .insert(locator.description(), element);
    }

    /// Remove a staged element list
    pub fn remove_element(&self, locator: &Locator) {
        self.state().elements.remove(&locator.description());
    }

    /// Stage an element that only appears once `trigger` has been clicked
    pub fn reveal_on_click(&self, trigger: &Locator, revealed: &Locator, element: MockElement) {
        self.state()
            .reveal_on_click
            .entry(trigger.description())
            .or_default()
            .push((revealed.description(), element));
    }

    /// Change the current URL when `trigger` is clicked
    pub fn redirect_on_click(&self, trigger: &Locator, url: impl Into<String>) {
        self.state()
            .redirect_on_click
            .insert(trigger.description(), url.into());
    }

    /// Set the current URL directly
    pub fn set_current_url(&self, url: impl Into<String>) {
        self.state().current_url = url.into();
    }

    /// Stage the artifact returned by [`Driver::storage_snapshot`]
    pub fn set_storage(&self, artifact: SessionArtifact) {
        self.state().storage = Some(artifact);
    }

    /// Last value written into an input, if any
    #[must_use]
    pub fn filled_value(&self, locator: &Locator) -> Option<String> {
        self.state().fills.get(&locator.description()).cloned()
    }

    /// Snapshot of the call history
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().call_history.clone()
    }

    /// Check if a method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Number of calls whose record starts with `method`
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_history
            .iter()
            .filter(|c| c.starts_with(method))
            .count()
    }

    fn record(&self, entry: String) {
        self.state().call_history.push(entry);
    }

    fn missing(locator: &Locator) -> CribarError {
        CribarError::NotFound {
            locator: locator.description(),
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> CribarResult<()> {
        let mut state = self.state();
        state.call_history.push(format!("goto:{url}"));
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> CribarResult<String> {
        Ok(self.state().current_url.clone())
    }

    async fn click(&self, locator: &Locator) -> CribarResult<()> {
        let key = locator.description();
        let mut state = self.state();
        state.call_history.push(format!("click:{key}"));
        if state.resolved(&key).is_none() {
            return Err(Self::missing(locator));
        }
        if let Some(revealed) = state.reveal_on_click.remove(&key) {
            for (desc, element) in revealed {
                state.elements.insert(desc, element);
            }
        }
        if let Some(url) = state.redirect_on_click.get(&key).cloned() {
            state.current_url = url;
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> CribarResult<()> {
        let key = locator.description();
        let mut state = self.state();
        state.call_history.push(format!("fill:{key}={text}"));
        if state.resolved(&key).is_none() {
            return Err(Self::missing(locator));
        }
        state.fills.insert(key, text.to_string());
        Ok(())
    }

    async fn press_key(&self, key: &str) -> CribarResult<()> {
        self.record(format!("press_key:{key}"));
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> CribarResult<usize> {
        let key = locator.description();
        let state = self.state();
        Ok(state.elements.get(&key).map_or(0, MockElement::count))
    }

    async fn text(&self, locator: &Locator) -> CribarResult<String> {
        let key = locator.description();
        self.record(format!("text:{key}"));
        self.state()
            .elements
            .get(&key)
            .and_then(|e| e.texts.first().cloned())
            .ok_or_else(|| Self::missing(locator))
    }

    async fn texts(&self, locator: &Locator) -> CribarResult<Vec<String>> {
        let key = locator.description();
        self.record(format!("texts:{key}"));
        Ok(self
            .state()
            .elements
            .get(&key)
            .map(|e| e.texts.clone())
            .unwrap_or_default())
    }

    async fn is_visible(&self, locator: &Locator) -> CribarResult<bool> {
        self.state()
            .resolved(&locator.description())
            .map(|e| e.visible)
            .ok_or_else(|| Self::missing(locator))
    }

    async fn is_enabled(&self, locator: &Locator) -> CribarResult<bool> {
        self.state()
            .resolved(&locator.description())
            .map(|e| e.enabled)
            .ok_or_else(|| Self::missing(locator))
    }

    async fn is_checked(&self, locator: &Locator) -> CribarResult<bool> {
        self.record(format!("is_checked:{}", locator.description()));
        self.state()
            .resolved(&locator.description())
            .map(|e| e.checked)
            .ok_or_else(|| Self::missing(locator))
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> CribarResult<()> {
        let key = locator.description();
        let mut state = self.state();
        state.call_history.push(format!("set_checked:{key}={checked}"));
        if state.resolved(&key).is_none() {
            return Err(Self::missing(locator));
        }
        if let Some(element) = state.elements.get_mut(&key) {
            element.checked = checked;
        }
        Ok(())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> CribarResult<Option<String>> {
        self.state()
            .resolved(&locator.description())
            .map(|e| e.attributes.get(name).cloned())
            .ok_or_else(|| Self::missing(locator))
    }

    async fn storage_snapshot(&self) -> CribarResult<SessionArtifact> {
        self.record("storage_snapshot".to_string());
        Ok(self.state().storage.clone().unwrap_or_default())
    }

    async fn close(&self) -> CribarResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn trigger() -> Locator {
        Locator::css(".dropdown-trigger")
    }

    mod staging_tests {
        use super::*;

        #[tokio::test]
        async fn absent_locator_counts_zero() {
            let driver = MockDriver::new();
            assert_eq!(driver.count(&trigger()).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn staged_element_is_resolvable() {
            let driver = MockDriver::new();
            driver.add_element(&trigger(), MockElement::with_text("Status"));
            assert_eq!(driver.count(&trigger()).await.unwrap(), 1);
            assert_eq!(driver.text(&trigger()).await.unwrap(), "Status");
        }

        #[tokio::test]
        async fn multi_element_staging_reports_each_text() {
            let rows = Locator::css(".results tr");
            let driver = MockDriver::new();
            driver.add_element(
                &rows,
                MockElement::with_texts(vec!["Open".to_string(), "Done".to_string()]),
            );
            assert_eq!(driver.count(&rows).await.unwrap(), 2);
            assert_eq!(driver.texts(&rows).await.unwrap(), vec!["Open", "Done"]);
        }

        #[tokio::test]
        async fn remove_element_makes_locator_unresolvable() {
            let driver = MockDriver::new();
            driver.add_element(&trigger(), MockElement::new());
            driver.remove_element(&trigger());
            assert_eq!(driver.count(&trigger()).await.unwrap(), 0);
        }
    }

    mod interaction_tests {
        use super::*;

        #[tokio::test]
        async fn click_on_missing_element_is_not_found() {
            let driver = MockDriver::new();
            let err = driver.click(&trigger()).await.unwrap_err();
            assert!(matches!(err, CribarError::NotFound { .. }));
        }

        #[tokio::test]
        async fn reveal_on_click_adds_elements() {
            let menu = Locator::css(".dropdown-menu");
            let driver = MockDriver::new();
            driver.add_element(&trigger(), MockElement::new());
            driver.reveal_on_click(&trigger(), &menu, MockElement::new());

            assert_eq!(driver.count(&menu).await.unwrap(), 0);
            driver.click(&trigger()).await.unwrap();
            assert_eq!(driver.count(&menu).await.unwrap(), 1);
        }

        #[tokio::test]
        async fn redirect_on_click_updates_url() {
            let driver = MockDriver::new();
            driver.set_current_url("https://example.test/login");
            driver.add_element(&trigger(), MockElement::new());
            driver.redirect_on_click(&trigger(), "https://example.test/home");

            driver.click(&trigger()).await.unwrap();
            assert_eq!(
                driver.current_url().await.unwrap(),
                "https://example.test/home"
            );
        }

        #[tokio::test]
        async fn fill_stores_last_value() {
            let field = Locator::attribute("name", "username");
            let driver = MockDriver::new();
            driver.add_element(&field, MockElement::new());
            driver.fill(&field, "alex").await.unwrap();
            driver.fill(&field, "sam").await.unwrap();
            assert_eq!(driver.filled_value(&field), Some("sam".to_string()));
        }

        #[tokio::test]
        async fn set_checked_flips_state() {
            let boxed = Locator::css("#mine-only");
            let driver = MockDriver::new();
            driver.add_element(&boxed, MockElement::new().checked(false));
            driver.set_checked(&boxed, true).await.unwrap();
            assert!(driver.is_checked(&boxed).await.unwrap());
        }
    }

    mod history_tests {
        use super::*;

        #[tokio::test]
        async fn history_records_method_and_subject() {
            let driver = MockDriver::new();
            driver.add_element(&trigger(), MockElement::new());
            driver.goto("https://example.test").await.unwrap();
            driver.click(&trigger()).await.unwrap();
            driver.press_key("Escape").await.unwrap();

            let calls = driver.calls();
            assert_eq!(calls[0], "goto:https://example.test");
            assert!(calls[1].starts_with("click:css="));
            assert_eq!(calls[2], "press_key:Escape");
        }

        #[tokio::test]
        async fn was_called_matches_prefix() {
            let driver = MockDriver::new();
            driver.add_element(&trigger(), MockElement::new());
            driver.click(&trigger()).await.unwrap();
            assert!(driver.was_called("click"));
            assert!(!driver.was_called("fill"));
        }

        #[tokio::test]
        async fn call_count_tallies_per_method() {
            let driver = MockDriver::new();
            driver.press_key("Escape").await.unwrap();
            driver.press_key("Escape").await.unwrap();
            assert_eq!(driver.call_count("press_key"), 2);
            assert_eq!(driver.call_count("click"), 0);
        }

        #[tokio::test]
        async fn fresh_driver_has_empty_history() {
            let driver = MockDriver::new();
            assert!(driver.calls().is_empty());
        }
    }
}
