//! Example: End-to-End Issue Filter Flow
//!
//! Demonstrates: session bootstrap, page-object navigation, whitelist
//! validation, status filtering, and result verification, all against the
//! mock driver.
//!
//! Run with: `cargo run --example filter_flow`

use cribar::pages::filters::{RESULT_STATUS_CELLS, RESULTS_SUMMARY, STATUS_MENU, STATUS_TRIGGER};
use cribar::pages::home::{FILTERS_NAV_TEXT, FILTERS_PANEL};
use cribar::pages::login::{PASSWORD_FIELD, SUBMIT_BUTTON, USERNAME_FIELD};
use cribar::prelude::*;
use std::sync::Arc;

fn staged_login_driver() -> Arc<MockDriver> {
    let driver = Arc::new(MockDriver::new());
    let username = Locator::attribute("name", USERNAME_FIELD);
    let password = Locator::attribute("name", PASSWORD_FIELD);
    let submit = Locator::css(SUBMIT_BUTTON);

    driver.add_element(&username, MockElement::new());
    driver.add_element(&submit, MockElement::new());
    driver.reveal_on_click(&submit, &password, MockElement::new());
    driver.redirect_on_click(&submit, "https://tracker.example/home");
    driver.set_storage(
        SessionArtifact::new()
            .with_cookie(
                SessionCookie::new("JSESSIONID", "demo-token")
                    .with_domain("tracker.example")
                    .secure(true)
                    .http_only(true)
                    .with_same_site(SameSite::Strict),
            )
            .with_origin(
                OriginState::new("https://tracker.example").with_item("sidebar", "collapsed"),
            ),
    );
    driver
}

fn staged_filters_driver() -> Arc<MockDriver> {
    let driver = Arc::new(MockDriver::new());

    // Home page with the navigation entry to the filters view.
    let filters_nav = Locator::text(FILTERS_NAV_TEXT);
    driver.add_element(
        &filters_nav,
        MockElement::with_text(FILTERS_NAV_TEXT).with_attribute("class", "nav-item active"),
    );
    driver.reveal_on_click(
        &filters_nav,
        &Locator::css(FILTERS_PANEL),
        MockElement::new(),
    );

    // Status dropdown whose options appear once the trigger is clicked.
    let trigger = Locator::css(STATUS_TRIGGER);
    driver.add_element(&trigger, MockElement::with_text("Status"));
    driver.reveal_on_click(&trigger, &Locator::css(STATUS_MENU), MockElement::new());
    for label in ["Open", "To Do", "In Progress"] {
        driver.reveal_on_click(
            &trigger,
            &Locator::role_named("option", label),
            MockElement::with_text(label),
        );
    }

    // Result rows left behind by the filtered query.
    driver.add_element(
        &Locator::css(RESULT_STATUS_CELLS),
        MockElement::with_texts(vec![
            "Open".to_string(),
            "In Progress".to_string(),
            "To Do".to_string(),
            "Open".to_string(),
        ]),
    );
    driver.add_element(
        &Locator::css(RESULTS_SUMMARY),
        MockElement::with_text("4 issues"),
    );
    driver
}

#[tokio::main]
async fn main() -> CribarResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Issue Filter Flow Example ===\n");

    // 1. Bootstrap an authenticated session
    println!("1. Bootstrapping an authenticated session...");
    let artifact_path = std::env::temp_dir().join("cribar-demo-session.json");
    let bootstrap = SessionBootstrap::new(staged_login_driver())
        .with_artifact_path(&artifact_path)
        .with_auth_pattern(UrlPattern::contains("/home"));

    let artifact = bootstrap
        .run_with_lookup(|key| match key {
            KEY_BASE_URL => Some("https://tracker.example".to_string()),
            KEY_USERNAME => Some("demo-user".to_string()),
            KEY_PASSWORD => Some("demo-pass".to_string()),
            _ => None,
        })
        .await?;

    println!("   Cookies captured: {}", artifact.cookies.len());
    println!("   Origins captured: {}", artifact.origins.len());
    println!("   Artifact: {}", bootstrap.artifact_path().display());

    // 2. Missing configuration is reported in aggregate
    println!("\n2. Aggregated configuration errors...");
    let err = SessionBootstrap::new(staged_login_driver())
        .run_with_lookup(|_| None)
        .await
        .expect_err("lookup resolves nothing");
    println!("   {err}");

    // 3. Open the filters view from the home page
    println!("\n3. Navigating to the filters view...");
    let driver = staged_filters_driver();
    let policy = TimeoutPolicy::new().with_quick_action_ms(500);
    let home = HomePage::new(Arc::clone(&driver) as Arc<dyn Driver>, policy);
    home.open_filters().await?;
    println!("   Filters nav active: {}", home.is_filters_nav_active().await?);

    // 4. Whitelist validation happens before any UI interaction
    println!("\n4. Validating status selections...");
    let good = ["Open", "To Do", "In Progress"];
    println!("   {good:?}: {:?}", validate_status_selection(&good));
    let bad = ["Open", "Blocked"];
    match validate_status_selection(&bad) {
        Err(e) => println!("   {bad:?}: rejected: {e}"),
        Ok(()) => println!("   {bad:?}: accepted"),
    }

    // 5. Select the open-like statuses and verify the results
    println!("\n5. Selecting filters and verifying results...");
    let filters = FiltersPage::new(Arc::clone(&driver) as Arc<dyn Driver>, policy);
    select_status_filters(&filters, &good).await?;

    // The page collapses the menu in response to the Escape sent by close.
    driver.remove_element(&Locator::css(STATUS_MENU));
    println!(
        "   Dropdown open after close: {}",
        filters.status_dropdown().is_open().await?
    );
    println!("   Summary: {}", filters.summary().await?);
    println!("   Rows: {}", filters.result_count().await?);

    verify_result_statuses(&filters, &IssueStatus::OPEN_LIKE).await?;
    println!("   Every row carries an open-like status");

    println!("\nIssue filter flow example completed");
    Ok(())
}
