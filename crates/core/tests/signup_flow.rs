//! Integration tests for publishing an activity, applying, and host review.

use jiff::{Timestamp, ToSpan};
use testresult::TestResult;

use mingled::prelude::*;

fn host() -> UserUuid {
    user_uuid_for_email("sarah@mingled.app")
}

fn draft(max_spots: u8) -> ActivityDraft {
    ActivityDraft {
        title: Some("Sunset Hiking Adventure".to_string()),
        description: Some("Moderate trail, bring water".to_string()),
        category: Some(Category::Outdoor),
        starts_at: Some(Timestamp::UNIX_EPOCH + 48.hours()),
        area: Some("Mountain View".to_string()),
        max_spots: Some(max_spots),
        budget: Some(BudgetBand::Free),
        ..ActivityDraft::new(host())
    }
}

fn applicant(email: &str, name: &str) -> Applicant {
    Applicant::new(user_uuid_for_email(email), name)
}

#[test]
fn third_applicant_fills_three_spot_activity() -> TestResult {
    let mut catalog = Catalog::new();
    let key = catalog.create(draft(3))?.key;

    for (email, name) in [
        ("alice@mingled.app", "Alice"),
        ("bob@mingled.app", "Bob"),
        ("carol@mingled.app", "Carol"),
    ] {
        catalog.apply(key, applicant(email, name))?;
    }

    let activity = catalog.get(key).ok_or("activity missing")?;
    assert_eq!(catalog.spots_left(activity), 0);

    let result = catalog.apply(key, applicant("dave@mingled.app", "Dave"));
    assert_eq!(result, Err(SignupError::ActivityFull));
    assert_eq!(catalog.signups().count(key), 3, "no signup should be added");

    Ok(())
}

#[test]
fn ranked_applicants_are_listed_best_first() -> TestResult {
    let mut catalog = Catalog::new();
    let key = catalog.create(draft(6))?.key;

    for (email, name, rank) in [
        ("alice@mingled.app", "Alice", 0),
        ("bob@mingled.app", "Bob", 4),
        ("carol@mingled.app", "Carol", 5),
    ] {
        let signup = catalog.apply(key, applicant(email, name))?;
        catalog.set_rank(signup.key, rank)?;
    }

    let names: Vec<&str> = catalog
        .ranked_view(key)
        .into_iter()
        .map(|signup| signup.name.as_str())
        .collect();

    assert_eq!(names, ["Carol", "Bob", "Alice"]);

    Ok(())
}

#[test]
fn spots_left_never_goes_negative() -> TestResult {
    let mut catalog = Catalog::new();
    let key = catalog.create(draft(1))?.key;

    catalog.apply(key, applicant("alice@mingled.app", "Alice"))?;
    let _rejected = catalog.apply(key, applicant("bob@mingled.app", "Bob"));

    let activity = catalog.get(key).ok_or("activity missing")?;
    assert_eq!(catalog.spots_left(activity), 0);
    assert!(catalog.is_full(activity));

    Ok(())
}

#[test]
fn accepted_applicants_form_the_attendance_roster() -> TestResult {
    let mut catalog = Catalog::new();
    let key = catalog.create(draft(4))?.key;

    let alice = catalog.apply(key, applicant("alice@mingled.app", "Alice"))?;
    let bob = catalog.apply(key, applicant("bob@mingled.app", "Bob"))?;
    let carol = catalog.apply(key, applicant("carol@mingled.app", "Carol"))?;

    catalog.review(alice.key, Decision::Accept)?;
    catalog.review(bob.key, Decision::Reject)?;
    catalog.review(carol.key, Decision::Accept)?;

    let roster = AttendanceLedger::from_accepted(catalog.signups(), key);
    let names: Vec<&str> = roster.records().map(|r| r.name.as_str()).collect();

    assert_eq!(roster.activity(), Some(key));
    assert_eq!(names, ["Alice", "Carol"]);

    Ok(())
}

#[test]
fn second_review_is_an_invalid_transition() -> TestResult {
    let mut catalog = Catalog::new();
    let key = catalog.create(draft(2))?.key;
    let signup = catalog.apply(key, applicant("alice@mingled.app", "Alice"))?;

    catalog.review(signup.key, Decision::Reject)?;
    let result = catalog.review(signup.key, Decision::Accept).map(|s| s.state);

    assert_eq!(
        result,
        Err(SignupError::InvalidTransition {
            from: ReviewState::Rejected,
            to: ReviewState::Accepted,
        })
    );

    Ok(())
}
