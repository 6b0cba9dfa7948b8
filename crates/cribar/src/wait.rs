//! Bounded polling waits.
//!
//! Every wait here is bounded by a [`TimeoutPolicy`] entry and polls at a
//! fixed interval. Two flavors exist: `wait_for_*` fails with a Timeout
//! error when the bound expires, `probe_*` reports `Ok(false)` instead and
//! never fails on its own timeout.

use std::time::{Duration, Instant};

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CribarError, CribarResult};
use crate::timeouts::{OperationClass, TimeoutPolicy};

/// Polling interval between condition checks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Successful wait telemetry
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct WaitOutcome {
    /// Milliseconds spent waiting
    pub elapsed_ms: u64,
    /// Human-readable description of what was awaited
    pub waited_for: String,
}

/// URL matching strategy for navigation waits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// URL starts with prefix
    Prefix(String),
    /// URL contains substring
    Contains(String),
    /// URL matches a regular expression (validated at construction)
    Regex(String),
}

impl UrlPattern {
    /// Exact URL match
    #[must_use]
    pub fn exact(url: impl Into<String>) -> Self {
        Self::Exact(url.into())
    }

    /// Prefix match
    #[must_use]
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Substring match
    #[must_use]
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    /// Regular-expression match; the expression is validated here so a
    /// malformed pattern fails loudly instead of never matching
    pub fn regex(pattern: impl Into<String>) -> CribarResult<Self> {
        let pattern = pattern.into();
        regex::Regex::new(&pattern).map_err(|e| CribarError::Driver {
            message: format!("invalid URL pattern /{pattern}/: {e}"),
        })?;
        Ok(Self::Regex(pattern))
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(expected) => url == expected,
            Self::Prefix(prefix) => url.starts_with(prefix),
            Self::Contains(needle) => url.contains(needle),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(url) => write!(f, "exact={url}"),
            Self::Prefix(prefix) => write!(f, "prefix={prefix}"),
            Self::Contains(needle) => write!(f, "contains={needle}"),
            Self::Regex(pattern) => write!(f, "regex={pattern}"),
        }
    }
}

/// Wait until `locator` resolves to at least one element.
///
/// The bound comes from the policy entry for `class`; expiry fails with a
/// Timeout error naming that class. Never retried beyond the polling loop.
pub async fn wait_for_resolvable(
    driver: &dyn Driver,
    locator: &Locator,
    class: OperationClass,
    policy: &TimeoutPolicy,
) -> CribarResult<WaitOutcome> {
    let bound_ms = policy.bound_ms(class);
    let start = Instant::now();
    let bound = Duration::from_millis(bound_ms);
    let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

    loop {
        if driver.count(locator).await? > 0 {
            return Ok(WaitOutcome {
                elapsed_ms: start.elapsed().as_millis() as u64,
                waited_for: locator.description(),
            });
        }
        if start.elapsed() >= bound {
            return Err(CribarError::Timeout {
                operation: format!("{} ({})", class.name(), locator.description()),
                ms: bound_ms,
            });
        }
        tokio::time::sleep(poll).await;
    }
}

/// Short probe for `locator` resolvability.
///
/// Reports `Ok(false)` when the bound expires; driver failures still
/// propagate.
pub async fn probe_resolvable(
    driver: &dyn Driver,
    locator: &Locator,
    bound_ms: u64,
) -> CribarResult<bool> {
    let start = Instant::now();
    let bound = Duration::from_millis(bound_ms);
    let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

    loop {
        if driver.count(locator).await? > 0 {
            return Ok(true);
        }
        if start.elapsed() >= bound {
            return Ok(false);
        }
        tokio::time::sleep(poll).await;
    }
}

/// Wait until the current URL matches `pattern`, bounded by the policy
/// entry for `class`.
pub async fn wait_for_url(
    driver: &dyn Driver,
    pattern: &UrlPattern,
    class: OperationClass,
    policy: &TimeoutPolicy,
) -> CribarResult<WaitOutcome> {
    let bound_ms = policy.bound_ms(class);
    let start = Instant::now();
    let bound = Duration::from_millis(bound_ms);
    let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

    loop {
        if pattern.matches(&driver.current_url().await?) {
            return Ok(WaitOutcome {
                elapsed_ms: start.elapsed().as_millis() as u64,
                waited_for: pattern.to_string(),
            });
        }
        if start.elapsed() >= bound {
            return Err(CribarError::Timeout {
                operation: format!("{} (url {pattern})", class.name()),
                ms: bound_ms,
            });
        }
        tokio::time::sleep(poll).await;
    }
}

/// Poll the current URL against `pattern` until it matches or the bound
/// expires; `Ok(false)` on expiry.
pub async fn probe_url(
    driver: &dyn Driver,
    pattern: &UrlPattern,
    bound_ms: u64,
) -> CribarResult<bool> {
    let start = Instant::now();
    let bound = Duration::from_millis(bound_ms);
    let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

    loop {
        if pattern.matches(&driver.current_url().await?) {
            return Ok(true);
        }
        if start.elapsed() >= bound {
            return Ok(false);
        }
        tokio::time::sleep(poll).await;
    }
}
