//! Session artifact and one-shot authenticated-session bootstrap.
//!
//! The bootstrap runs once, strictly before any test body, logs in through
//! the two-step form and persists cookies plus per-origin storage to a JSON
//! artifact. Later test processes load that artifact read-only; nothing ever
//! rewrites it while readers exist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::driver::Driver;
use crate::pages::login::LoginPage;
use crate::result::{CribarError, CribarResult};
use crate::timeouts::{OperationClass, TimeoutPolicy};
use crate::wait::{probe_url, UrlPattern};

/// Well-known artifact location, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = ".auth/session.json";

/// Cookie restrictions for cross-site requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    /// Sent only for same-site requests
    Strict,
    /// Sent for same-site and top-level cross-site navigation
    Lax,
    /// Sent everywhere
    None,
}

/// One captured cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    pub domain: String,
    /// Cookie path
    pub path: String,
    /// HTTPS-only flag
    pub secure: bool,
    /// Inaccessible to page scripts when set
    pub http_only: bool,
    /// Cross-site restriction
    pub same_site: SameSite,
}

impl SessionCookie {
    /// Create a cookie with root path and Lax restriction
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
        }
    }

    /// Set the domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the HTTPS-only flag
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the script-inaccessible flag
    #[must_use]
    pub const fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set the cross-site restriction
    #[must_use]
    pub const fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }
}

/// One localStorage entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    /// Storage key
    pub name: String,
    /// Stored value
    pub value: String,
}

/// Captured localStorage for one origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
    /// Origin the entries belong to
    pub origin: String,
    /// Entries in capture order
    pub local_storage: Vec<StorageItem>,
}

impl OriginState {
    /// Empty storage for an origin
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            local_storage: Vec::new(),
        }
    }

    /// Append one entry
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.local_storage.push(StorageItem {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Persisted snapshot of an authenticated browser session.
///
/// Written once by the bootstrap, loaded read-only by every test process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionArtifact {
    /// Captured cookies, in capture order
    pub cookies: Vec<SessionCookie>,
    /// Captured per-origin storage, in capture order
    pub origins: Vec<OriginState>,
}

impl SessionArtifact {
    /// Empty artifact
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cookie
    #[must_use]
    pub fn with_cookie(mut self, cookie: SessionCookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Append an origin's storage
    #[must_use]
    pub fn with_origin(mut self, origin: OriginState) -> Self {
        self.origins.push(origin);
        self
    }

    /// Whether the artifact captured nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.origins.is_empty()
    }

    /// Write the artifact as pretty JSON, creating parent directories.
    ///
    /// Overwrites any previous artifact; runs never merge.
    pub fn save(&self, path: &Path) -> CribarResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load an artifact from disk
    pub fn load(path: &Path) -> CribarResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// One-shot authenticated-session bootstrap.
///
/// Protocol: resolve configuration, log in through the two-step form, wait
/// for the authenticated URL pattern, persist the artifact, release the
/// browser, then verify the artifact landed on disk. Each failure mode has
/// its own error class; nothing is retried here.
pub struct SessionBootstrap {
    driver: Arc<dyn Driver>,
    policy: TimeoutPolicy,
    artifact_path: PathBuf,
    auth_pattern: UrlPattern,
    login_path: String,
}

impl std::fmt::Debug for SessionBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBootstrap")
            .field("artifact_path", &self.artifact_path)
            .field("auth_pattern", &self.auth_pattern)
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl SessionBootstrap {
    /// Create a bootstrap over a freshly launched, isolated driver
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            policy: TimeoutPolicy::new(),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            auth_pattern: UrlPattern::contains("/home"),
            login_path: "login".to_string(),
        }
    }

    /// Override the timeout policy
    #[must_use]
    pub const fn with_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the artifact location
    #[must_use]
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Override the URL pattern that signals successful authentication
    #[must_use]
    pub fn with_auth_pattern(mut self, pattern: UrlPattern) -> Self {
        self.auth_pattern = pattern;
        self
    }

    /// Override the login surface path
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Artifact location this bootstrap writes to
    #[must_use]
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Resolve configuration through `lookup`, then run the protocol.
    ///
    /// Resolution failures carry every missing key and happen before the
    /// driver is touched.
    pub async fn run_with_lookup<L>(&self, lookup: L) -> CribarResult<SessionArtifact>
    where
        L: Fn(&str) -> Option<String>,
    {
        let config = Config::from_lookup(lookup)?;
        self.run(&config).await
    }

    /// Run the protocol against an already-resolved configuration
    pub async fn run(&self, config: &Config) -> CribarResult<SessionArtifact> {
        let login_url = config.url(&self.login_path);
        debug!(url = %login_url, "navigating to login surface");
        self.driver.goto(&login_url).await?;

        let login = LoginPage::new(Arc::clone(&self.driver), self.policy);
        login.login(&config.credentials()).await?;

        let auth_bound_ms = self.policy.bound_ms(OperationClass::PageLoad);
        let authenticated =
            probe_url(self.driver.as_ref(), &self.auth_pattern, auth_bound_ms).await?;
        if !authenticated {
            return Err(CribarError::AuthTimeout {
                pattern: self.auth_pattern.to_string(),
                ms: auth_bound_ms,
            });
        }
        info!("authentication confirmed");

        let artifact = self.driver.storage_snapshot().await?;
        artifact.save(&self.artifact_path)?;

        self.driver.close().await?;

        self.verify_artifact()?;
        info!(path = %self.artifact_path.display(), "session artifact written");
        Ok(artifact)
    }

    /// Confirm the artifact exists on disk.
    ///
    /// Auth succeeded by this point, so a missing file is a persistence
    /// failure, not an authentication one.
    pub fn verify_artifact(&self) -> CribarResult<()> {
        if self.artifact_path.exists() {
            Ok(())
        } else {
            Err(CribarError::Persistence {
                path: self.artifact_path.clone(),
            })
        }
    }
}
