//! Workflow entry points sitting between tests and page objects.
//!
//! Whitelist validation lives here, next to the callers, not inside the
//! components: a rejected selection must produce zero UI interaction, and
//! components stay reusable data movers.

use crate::pages::FiltersPage;
use crate::result::{CribarError, CribarResult};
use crate::status::IssueStatus;

/// Validate a status selection: non-empty shape first, then whitelist
/// membership.
///
/// Every non-member is collected before failing, and the error carries the
/// full whitelist alongside the offenders.
pub fn validate_status_selection<S: AsRef<str>>(statuses: &[S]) -> CribarResult<()> {
    if statuses.is_empty() {
        return Err(CribarError::EmptySelection);
    }

    let offending: Vec<String> = statuses
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| IssueStatus::from_label(s).is_none())
        .map(String::from)
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(CribarError::Validation {
            offending,
            allowed: IssueStatus::labels(),
        })
    }
}

/// Select status filters on the page, validating the selection first.
///
/// On a validation failure the page is never touched. The dropdown is
/// closed after the last selection, fire-and-forget.
pub async fn select_status_filters<S: AsRef<str>>(
    page: &FiltersPage,
    statuses: &[S],
) -> CribarResult<()> {
    validate_status_selection(statuses)?;

    for status in statuses {
        page.select_status(status.as_ref()).await?;
    }
    page.status_dropdown().close().await
}

/// Display labels for a status group
#[must_use]
pub fn status_labels(statuses: &[IssueStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.label().to_string()).collect()
}

/// Check that every rendered result row carries one of the expected
/// statuses. Zero rows is a valid (warned) outcome.
pub async fn verify_result_statuses(
    page: &FiltersPage,
    expected: &[IssueStatus],
) -> CribarResult<()> {
    page.results()
        .validate_all_cells_contain(&status_labels(expected))
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{Driver, MockDriver, MockElement};
    use crate::locator::Locator;
    use crate::pages::filters::{RESULT_STATUS_CELLS, STATUS_MENU, STATUS_TRIGGER};
    use crate::timeouts::TimeoutPolicy;
    use std::sync::Arc;

    fn short_policy() -> TimeoutPolicy {
        TimeoutPolicy::new()
            .with_dropdown_open_ms(200)
            .with_quick_action_ms(200)
    }

    fn staged_page(driver: &Arc<MockDriver>, options: &[&str], rows: &[&str]) -> FiltersPage {
        let trigger = Locator::css(STATUS_TRIGGER);
        driver.add_element(&trigger, MockElement::new());
        driver.reveal_on_click(&trigger, &Locator::css(STATUS_MENU), MockElement::new());
        for option in options {
            driver.add_element(
                &Locator::role_named("option", *option),
                MockElement::with_text(*option),
            );
        }
        driver.add_element(
            &Locator::css(RESULT_STATUS_CELLS),
            MockElement::with_texts(rows.iter().map(|s| (*s).to_string()).collect()),
        );
        FiltersPage::new(Arc::clone(driver) as Arc<dyn Driver>, short_policy())
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn empty_selection_is_rejected() {
            let err = validate_status_selection::<&str>(&[]).unwrap_err();
            assert!(matches!(err, CribarError::EmptySelection));
        }

        #[test]
        fn valid_selections_pass() {
            validate_status_selection(&["Open"]).unwrap();
            validate_status_selection(&["Open", "To Do", "In Progress", "Done", "Closed"])
                .unwrap();
        }

        #[test]
        fn every_offender_is_named_in_input_order() {
            let err =
                validate_status_selection(&["Open", "Blocked", "Done", "NotAStatus"]).unwrap_err();
            match err {
                CribarError::Validation { offending, allowed } => {
                    assert_eq!(offending, vec!["Blocked", "NotAStatus"]);
                    assert_eq!(allowed, IssueStatus::labels());
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        #[test]
        fn error_message_carries_offenders_and_whitelist() {
            let message = validate_status_selection(&["NotAStatus"])
                .unwrap_err()
                .to_string();
            assert!(message.contains("NotAStatus"));
            for label in IssueStatus::labels() {
                assert!(message.contains(&label), "message should name {label}");
            }
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn label_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                prop::sample::select(IssueStatus::labels()),
                "[A-Za-z][A-Za-z ]{0,11}".prop_filter("outside the whitelist", |s| {
                    IssueStatus::from_label(s).is_none()
                }),
            ]
        }

        proptest! {
            #[test]
            fn membership_errors_name_exactly_the_offenders(
                input in prop::collection::vec(label_strategy(), 1..8)
            ) {
                let expected_offenders: Vec<String> = input
                    .iter()
                    .filter(|s| IssueStatus::from_label(s).is_none())
                    .cloned()
                    .collect();

                match validate_status_selection(&input) {
                    Ok(()) => prop_assert!(expected_offenders.is_empty()),
                    Err(CribarError::Validation { offending, allowed }) => {
                        prop_assert!(!expected_offenders.is_empty());
                        prop_assert_eq!(offending, expected_offenders);
                        prop_assert_eq!(allowed, IssueStatus::labels());
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
            }

            #[test]
            fn valid_selections_never_error(
                input in prop::collection::vec(
                    prop::sample::select(IssueStatus::labels()), 1..10
                )
            ) {
                prop_assert!(validate_status_selection(&input).is_ok());
            }
        }
    }

    mod interaction_tests {
        use super::*;

        #[tokio::test]
        async fn rejected_selection_touches_no_ui() {
            let driver = Arc::new(MockDriver::new());
            let page = staged_page(&driver, &["Open"], &[]);

            let err = select_status_filters(&page, &["NotAStatus"])
                .await
                .unwrap_err();
            assert!(matches!(err, CribarError::Validation { .. }));
            assert!(driver.calls().is_empty());
        }

        #[tokio::test]
        async fn empty_selection_touches_no_ui() {
            let driver = Arc::new(MockDriver::new());
            let page = staged_page(&driver, &["Open"], &[]);

            let err = select_status_filters::<&str>(&page, &[]).await.unwrap_err();
            assert!(matches!(err, CribarError::EmptySelection));
            assert!(driver.calls().is_empty());
        }

        #[tokio::test]
        async fn accepted_selection_drives_the_dropdown_then_closes_it() {
            let driver = Arc::new(MockDriver::new());
            let page = staged_page(&driver, &["Open", "To Do", "In Progress"], &[]);

            select_status_filters(&page, &["Open", "To Do", "In Progress"])
                .await
                .unwrap();

            for label in ["Open", "To Do", "In Progress"] {
                assert!(driver
                    .calls()
                    .iter()
                    .any(|c| c == &format!("click:role=option[name={label}]")));
            }
            assert!(driver.was_called("press_key:Escape"));
        }
    }

    mod scenario_tests {
        use super::*;

        #[tokio::test]
        async fn open_like_rows_match_the_open_like_selection() {
            let driver = Arc::new(MockDriver::new());
            let page = staged_page(
                &driver,
                &["Open", "To Do", "In Progress"],
                &["Open", "To Do", "In Progress", "Open"],
            );

            select_status_filters(&page, &["Open", "To Do", "In Progress"])
                .await
                .unwrap();
            verify_result_statuses(&page, &IssueStatus::OPEN_LIKE)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn stray_row_fails_naming_it_and_the_expected_statuses() {
            let driver = Arc::new(MockDriver::new());
            let page = staged_page(
                &driver,
                &["Open", "To Do", "In Progress"],
                &["Open", "Blocked"],
            );

            let err = verify_result_statuses(&page, &IssueStatus::OPEN_LIKE)
                .await
                .unwrap_err();
            match err {
                CribarError::UnexpectedValue { value, expected } => {
                    assert_eq!(value, "Blocked");
                    assert_eq!(expected, vec!["Open", "To Do", "In Progress"]);
                }
                other => panic!("expected unexpected-value, got {other:?}"),
            }
        }
    }
}
