//! Integration tests for the bundled demo data and the event wrap-up flow.

use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

use mingled::prelude::*;

#[test]
fn host_dashboard_is_seeded_with_ranked_applicants() -> TestResult {
    let demo = Demo::load(Timestamp::UNIX_EPOCH)?;
    let key = demo.activity("coffee_art_tour")?;

    let applicants: Vec<(&str, u8, ReviewState)> = demo
        .catalog
        .ranked_view(key)
        .into_iter()
        .map(|s| (s.name.as_str(), s.rank.stars(), s.state))
        .collect();

    assert_eq!(
        applicants,
        [
            ("Carol Davis", 5, ReviewState::Accepted),
            ("Bob Smith", 4, ReviewState::Pending),
            ("Alice Johnson", 0, ReviewState::Pending),
        ]
    );

    Ok(())
}

#[test]
fn feed_reports_spots_left() -> TestResult {
    let demo = Demo::load(Timestamp::UNIX_EPOCH)?;

    let spots: Vec<(&str, u8)> = demo
        .catalog
        .list(CategoryFilter::All)
        .map(|a| (a.title.as_str(), demo.catalog.spots_left(a)))
        .collect();

    assert_eq!(
        spots,
        [
            ("Coffee & Art Gallery Tour", 1),
            ("Sunset Hiking Adventure", 5),
            ("Wine Tasting Evening", 3),
        ]
    );

    Ok(())
}

#[test]
fn feed_filters_by_category() -> TestResult {
    let demo = Demo::load(Timestamp::UNIX_EPOCH)?;

    let culinary: Vec<&str> = demo
        .catalog
        .list("culinary".parse()?)
        .map(|a| a.title.as_str())
        .collect();

    assert_eq!(culinary, ["Wine Tasting Evening"]);

    Ok(())
}

#[test]
fn seeded_host_is_a_reliable_member() -> TestResult {
    let demo = Demo::load(Timestamp::UNIX_EPOCH)?;
    let sarah = demo.user("sarah")?;

    let profile = demo.profiles.get(sarah).ok_or("profile missing")?;

    assert_eq!(profile.display_name(), "Sarah Johnson");
    assert_eq!(profile.show_up.percent_points(), Some(Decimal::new(917, 1)));
    assert!(profile.show_up.is_reliable());

    Ok(())
}

#[test]
fn completing_the_event_updates_show_up_scores() -> TestResult {
    let mut demo = Demo::load(Timestamp::UNIX_EPOCH)?;
    let alice = demo.user("alice")?;
    let bob = demo.user("bob")?;
    let carol = demo.user("carol")?;

    demo.attendance.mark_arrival(alice, true);
    demo.attendance.mark_feedback(alice, true)?;
    demo.attendance.mark_arrival(bob, true);
    demo.attendance.mark_arrival(carol, false);

    assert_eq!(
        demo.attendance.mark_feedback(carol, true).map(|r| r.feedback),
        Err(AttendanceError::NotArrived(carol))
    );
    assert_eq!(demo.attendance.summary().to_string(), "2/3 attended");

    for outcome in demo.attendance.complete() {
        demo.profiles
            .record_outcome(outcome.participant, outcome.attended)?;
    }

    let carol_record = demo.profiles.get(carol).ok_or("profile missing")?.show_up;
    let alice_record = demo.profiles.get(alice).ok_or("profile missing")?.show_up;

    assert_eq!(
        carol_record,
        ShowUpRecord {
            total: 1,
            attended: 0,
        }
    );
    assert!(alice_record.is_reliable());

    Ok(())
}
