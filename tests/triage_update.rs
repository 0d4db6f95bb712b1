use civic_triage::{
    config::Triage,
    error::TriageError,
    fixture,
    model::Status,
    query::lookup_by_id,
    stats::aggregate_stats,
    triage::{StatusUpdate, update_status},
};
use time::macros::datetime;

fn update(id: u64, status: Status) -> StatusUpdate {
    StatusUpdate {
        id,
        status,
        notes: "checked on site".into(),
    }
}

#[test]
fn resolving_stamps_resolved_at() {
    let mut reports = fixture::builtin().unwrap();
    let now = datetime!(2025-01-13 09:00 UTC);
    let policy = Triage::default();
    let updated =
        update_status(&mut reports, &update(2, Status::Resolved), now, &policy).unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.resolved_at, Some(now));
    assert_eq!(lookup_by_id(&reports, 2).unwrap(), &updated);

    let stats = aggregate_stats(&reports);
    assert_eq!((stats.approved, stats.resolved), (1, 2));
}

#[test]
fn lifecycle_is_enforced_by_default() {
    let mut reports = fixture::builtin().unwrap();
    let now = datetime!(2025-01-13 09:00 UTC);
    let policy = Triage::default();
    let before = reports.clone();

    let err =
        update_status(&mut reports, &update(1, Status::Resolved), now, &policy).unwrap_err();
    assert_eq!(
        err,
        TriageError::InvalidTransition {
            id: 1,
            from: Status::Pending,
            to: Status::Resolved,
        }
    );

    let err =
        update_status(&mut reports, &update(5, Status::Approved), now, &policy).unwrap_err();
    assert!(matches!(err, TriageError::InvalidTransition { id: 5, .. }));
    assert_eq!(reports, before);
}

#[test]
fn relaxed_policy_allows_reopening() {
    let mut reports = fixture::builtin().unwrap();
    let policy = Triage {
        enforce_lifecycle: false,
    };
    let now = datetime!(2025-01-13 09:00 UTC);
    let reopened = update_status(&mut reports, &update(3, Status::Pending), now, &policy).unwrap();
    assert_eq!(reopened.status, Status::Pending);
    assert_eq!(reopened.resolved_at, None);
}

#[test]
fn same_status_is_a_no_op() {
    let mut reports = fixture::builtin().unwrap();
    let before = reports.clone();
    let now = datetime!(2025-01-13 09:00 UTC);
    let policy = Triage::default();
    let same =
        update_status(&mut reports, &update(3, Status::Resolved), now, &policy).unwrap();
    assert_eq!(same, before[2]);
    assert_eq!(reports, before);
}

#[test]
fn unknown_id_and_backdated_resolution_fail() {
    let mut reports = fixture::builtin().unwrap();
    let now = datetime!(2025-01-13 09:00 UTC);
    let policy = Triage::default();
    assert_eq!(
        update_status(&mut reports, &update(99, Status::Approved), now, &policy),
        Err(TriageError::NotFound(99))
    );

    let too_early = datetime!(2025-01-01 00:00 UTC);
    assert_eq!(
        update_status(&mut reports, &update(2, Status::Resolved), too_early, &policy),
        Err(TriageError::ResolvedBeforeCreated(2))
    );
    assert_eq!(lookup_by_id(&reports, 2).unwrap().status, Status::Approved);
}
