//! Real browser driver over the Chrome DevTools Protocol.
//!
//! Available behind the `browser` feature. Queries are the JavaScript
//! emissions of [`Selector`](crate::locator::Selector), evaluated in the
//! page, so the mock and the real driver resolve the same descriptors.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::cdp::browser_protocol::network::CookieSameSite;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};
use crate::session::{OriginState, SameSite, SessionArtifact, SessionCookie, StorageItem};

/// Launch options for the real browser
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Keep the Chromium sandbox enabled
    pub sandbox: bool,
    /// Explicit Chromium executable, when not on PATH
    pub chromium_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserConfig {
    /// Headless, sandboxed launch
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chromium_path: None,
        }
    }

    /// Show the browser window
    #[must_use]
    pub const fn with_headful(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the Chromium executable path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }
}

fn cdp_err(e: impl std::fmt::Display) -> CribarError {
    CribarError::Driver {
        message: e.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct LocalStorageCapture {
    origin: String,
    entries: Vec<StorageItem>,
}

#[derive(Debug, Deserialize)]
struct AttributeCapture {
    found: bool,
    value: Option<String>,
}

/// CDP-backed [`Driver`] driving one page in one fresh browser context
#[derive(Debug)]
pub struct CdpDriver {
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl CdpDriver {
    /// Launch a fresh, isolated browser and open its page
    pub async fn launch(config: BrowserConfig) -> CribarResult<Self> {
        let mut builder = CdpConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(cdp_err)?;
        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(cdp_err)?;

        // Drive the CDP event stream until the connection drops.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(cdp_err)?;

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handle,
        })
    }

    async fn evaluate<T: serde::de::DeserializeOwned>(&self, expr: &str) -> CribarResult<T> {
        let page = self.page.lock().await;
        let result = page.evaluate(expr).await.map_err(cdp_err)?;
        result.into_value().map_err(cdp_err)
    }

    /// Evaluate an element expression that yields `null` when the locator
    /// does not resolve.
    async fn evaluate_on_element<T: serde::de::DeserializeOwned>(
        &self,
        locator: &Locator,
        expr: &str,
    ) -> CribarResult<T> {
        let value: serde_json::Value = self.evaluate(expr).await?;
        if value.is_null() {
            return Err(CribarError::NotFound {
                locator: locator.description(),
            });
        }
        serde_json::from_value(value).map_err(cdp_err)
    }

    async fn dispatch_key(&self, event_type: DispatchKeyEventType, key: &str) -> CribarResult<()> {
        let params = DispatchKeyEventParams::builder()
            .r#type(event_type)
            .key(key)
            .build()
            .map_err(cdp_err)?;
        let page = self.page.lock().await;
        page.execute(params).await.map_err(cdp_err)?;
        Ok(())
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn goto(&self, url: &str) -> CribarResult<()> {
        let page = self.page.lock().await;
        page.goto(url).await.map_err(cdp_err)?;
        Ok(())
    }

    async fn current_url(&self) -> CribarResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(cdp_err)?;
        Ok(url.unwrap_or_default())
    }

    async fn click(&self, locator: &Locator) -> CribarResult<()> {
        let query = locator.selector().to_query();
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return null; el.click(); return true; }})()"
        );
        self.evaluate_on_element::<bool>(locator, &expr).await?;
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> CribarResult<()> {
        let query = locator.selector().to_query();
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return null; \
             el.value = {text:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()"
        );
        self.evaluate_on_element::<bool>(locator, &expr).await?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> CribarResult<()> {
        self.dispatch_key(DispatchKeyEventType::KeyDown, key).await?;
        self.dispatch_key(DispatchKeyEventType::KeyUp, key).await
    }

    async fn count(&self, locator: &Locator) -> CribarResult<usize> {
        self.evaluate(&locator.selector().to_count_query()).await
    }

    async fn text(&self, locator: &Locator) -> CribarResult<String> {
        let query = locator.selector().to_query();
        let expr =
            format!("(() => {{ const el = {query}; return el ? el.textContent.trim() : null; }})()");
        self.evaluate_on_element(locator, &expr).await
    }

    async fn texts(&self, locator: &Locator) -> CribarResult<Vec<String>> {
        self.evaluate(&locator.selector().to_texts_query()).await
    }

    async fn is_visible(&self, locator: &Locator) -> CribarResult<bool> {
        let query = locator.selector().to_query();
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return null; \
             const r = el.getBoundingClientRect(); \
             return r.width > 0 && r.height > 0; }})()"
        );
        self.evaluate_on_element(locator, &expr).await
    }

    async fn is_enabled(&self, locator: &Locator) -> CribarResult<bool> {
        let query = locator.selector().to_query();
        let expr =
            format!("(() => {{ const el = {query}; return el ? !el.disabled : null; }})()");
        self.evaluate_on_element(locator, &expr).await
    }

    async fn is_checked(&self, locator: &Locator) -> CribarResult<bool> {
        let query = locator.selector().to_query();
        let expr =
            format!("(() => {{ const el = {query}; return el ? !!el.checked : null; }})()");
        self.evaluate_on_element(locator, &expr).await
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> CribarResult<()> {
        let query = locator.selector().to_query();
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return null; \
             if (!!el.checked !== {checked}) {{ el.click(); }} \
             return true; }})()"
        );
        self.evaluate_on_element::<bool>(locator, &expr).await?;
        Ok(())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> CribarResult<Option<String>> {
        let query = locator.selector().to_query();
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return {{found: false, value: null}}; \
             return {{found: true, value: el.getAttribute({name:?})}}; }})()"
        );
        let capture: AttributeCapture = self.evaluate(&expr).await?;
        if capture.found {
            Ok(capture.value)
        } else {
            Err(CribarError::NotFound {
                locator: locator.description(),
            })
        }
    }

    async fn storage_snapshot(&self) -> CribarResult<SessionArtifact> {
        let cookies = {
            let page = self.page.lock().await;
            page.get_cookies().await.map_err(cdp_err)?
        };

        let mut artifact = SessionArtifact::new();
        for cookie in cookies {
            let same_site = match cookie.same_site {
                Some(CookieSameSite::Strict) => SameSite::Strict,
                Some(CookieSameSite::None) => SameSite::None,
                _ => SameSite::Lax,
            };
            artifact = artifact.with_cookie(
                SessionCookie::new(cookie.name, cookie.value)
                    .with_domain(cookie.domain)
                    .with_path(cookie.path)
                    .secure(cookie.secure)
                    .http_only(cookie.http_only)
                    .with_same_site(same_site),
            );
        }

        let capture: LocalStorageCapture = self
            .evaluate(
                "(() => ({ origin: window.location.origin, \
                 entries: Object.entries(window.localStorage)\
                 .map(([name, value]) => ({name, value})) }))()",
            )
            .await?;
        let mut origin = OriginState::new(capture.origin);
        origin.local_storage = capture.entries;
        Ok(artifact.with_origin(origin))
    }

    async fn close(&self) -> CribarResult<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(cdp_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_headless_and_sandboxed() {
        let config = BrowserConfig::new();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn builders_adjust_launch_options() {
        let config = BrowserConfig::new()
            .with_headful()
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
