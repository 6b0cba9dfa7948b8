//! Login page object.

use std::sync::Arc;

use crate::components::{FormInput, Navigation};
use crate::config::Credentials;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::CribarResult;
use crate::timeouts::TimeoutPolicy;

/// `name` attribute of the username field
pub const USERNAME_FIELD: &str = "username";

/// `name` attribute of the password field
pub const PASSWORD_FIELD: &str = "password";

/// CSS selector of the single submit trigger used by both login stages
pub const SUBMIT_BUTTON: &str = "button[type=submit]";

/// The application's two-step login form.
///
/// Stage one shows the username field; submitting reveals the password
/// field; the same trigger submits both stages.
#[derive(Debug)]
pub struct LoginPage {
    username_input: FormInput,
    password_input: FormInput,
    submit: Navigation,
}

impl LoginPage {
    /// Create the login page over a driver
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, policy: TimeoutPolicy) -> Self {
        let username = Locator::attribute("name", USERNAME_FIELD);
        let password = Locator::attribute("name", PASSWORD_FIELD);
        let submit = Locator::css(SUBMIT_BUTTON);

        Self {
            username_input: FormInput::new(Arc::clone(&driver), policy, username),
            password_input: FormInput::new(Arc::clone(&driver), policy, password.clone()),
            submit: Navigation::new(driver, policy, submit).with_target(password),
        }
    }

    /// Run the two-step flow: username, submit, password, same submit.
    ///
    /// The first submit waits for the password stage to appear before the
    /// password is typed.
    pub async fn login(&self, credentials: &Credentials) -> CribarResult<()> {
        self.username_input.fill(&credentials.username).await?;
        self.submit.click_and_wait_for_target().await?;
        self.password_input.fill(&credentials.password).await?;
        self.submit.click().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::result::CribarError;

    fn short_policy() -> TimeoutPolicy {
        TimeoutPolicy::new()
            .with_quick_action_ms(200)
            .with_page_load_ms(200)
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "alex".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn two_stage_driver() -> Arc<MockDriver> {
        let driver = MockDriver::new();
        let username = Locator::attribute("name", USERNAME_FIELD);
        let password = Locator::attribute("name", PASSWORD_FIELD);
        let submit = Locator::css(SUBMIT_BUTTON);
        driver.add_element(&username, MockElement::new());
        driver.add_element(&submit, MockElement::new());
        driver.reveal_on_click(&submit, &password, MockElement::new());
        Arc::new(driver)
    }

    mod login_tests {
        use super::*;

        #[tokio::test]
        async fn both_stages_submit_through_the_same_trigger() {
            let driver = two_stage_driver();
            let page = LoginPage::new(Arc::clone(&driver) as Arc<dyn Driver>, short_policy());

            page.login(&credentials()).await.unwrap();

            let clicks: Vec<String> = driver
                .calls()
                .into_iter()
                .filter(|c| c.starts_with("click:"))
                .collect();
            assert_eq!(clicks.len(), 2);
            assert_eq!(clicks[0], clicks[1]);
            assert!(clicks[0].contains(SUBMIT_BUTTON));
        }

        #[tokio::test]
        async fn username_is_typed_before_password() {
            let driver = two_stage_driver();
            let page = LoginPage::new(Arc::clone(&driver) as Arc<dyn Driver>, short_policy());

            page.login(&credentials()).await.unwrap();

            let calls = driver.calls();
            let user_fill = calls
                .iter()
                .position(|c| c.starts_with("fill:") && c.ends_with("=alex"))
                .unwrap();
            let pass_fill = calls
                .iter()
                .position(|c| c.starts_with("fill:") && c.ends_with("=s3cret"))
                .unwrap();
            let first_click = calls.iter().position(|c| c.starts_with("click:")).unwrap();
            assert!(user_fill < first_click);
            assert!(first_click < pass_fill);
        }

        #[tokio::test]
        async fn stalled_password_stage_times_out() {
            let driver = MockDriver::new();
            let username = Locator::attribute("name", USERNAME_FIELD);
            let submit = Locator::css(SUBMIT_BUTTON);
            driver.add_element(&username, MockElement::new());
            driver.add_element(&submit, MockElement::new());
            let page = LoginPage::new(Arc::new(driver) as Arc<dyn Driver>, short_policy());

            let err = page.login(&credentials()).await.unwrap_err();
            assert!(matches!(err, CribarError::Timeout { .. }));
        }
    }
}
