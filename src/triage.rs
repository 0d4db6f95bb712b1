use crate::{
    config::Triage,
    error::TriageError,
    model::{Report, ReportId, Status},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: ReportId,
    pub status: Status,
    #[serde(default)]
    pub notes: String,
}

/// Whether staff may move a report from `from` to `to`.
pub fn transition_allowed(from: Status, to: Status) -> bool {
    matches!(
        (from, to),
        (Status::Pending, Status::Approved)
            | (Status::Pending, Status::Rejected)
            | (Status::Approved, Status::Resolved)
    )
}

/// Applies a status change to the matching record and returns the updated copy.
///
/// Moving to `Resolved` stamps `resolved_at` with `now`; moving away from it
/// clears the stamp. Re-applying the current status changes nothing.
pub fn update_status(
    reports: &mut [Report],
    update: &StatusUpdate,
    now: OffsetDateTime,
    policy: &Triage,
) -> Result<Report, TriageError> {
    let report = reports
        .iter_mut()
        .find(|r| r.id == update.id)
        .ok_or(TriageError::NotFound(update.id))?;

    let from = report.status;
    if from == update.status {
        debug!("report {} already {}", report.id, from);
        return Ok(report.clone());
    }

    if policy.enforce_lifecycle && !transition_allowed(from, update.status) {
        return Err(TriageError::InvalidTransition {
            id: report.id,
            from,
            to: update.status,
        });
    }

    if update.status == Status::Resolved {
        if now < report.created_at {
            return Err(TriageError::ResolvedBeforeCreated(report.id));
        }
        report.resolved_at = Some(now);
    } else {
        report.resolved_at = None;
    }
    report.status = update.status;

    info!(
        id = report.id,
        from = %from,
        to = %update.status,
        notes = update.notes.as_str(),
        "status updated"
    );
    Ok(report.clone())
}
