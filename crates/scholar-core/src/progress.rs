//! Application lifecycle projection.
//!
//! Pure, total mapping from the server-reported status to everything the
//! progress view needs: stage index, percentage, status chrome, and whether
//! the correction flow is open. Unknown statuses always resolve to the
//! default branch so the progress bar stays renderable.

use serde::Serialize;

use crate::models::{Application, ApplicationStatus};

/// Number of milestone stages in the progress view.
pub const TOTAL_STAGES: u32 = 3;

/// Severity bucket for status chrome.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
    Danger,
    Neutral,
}

/// User-facing status metadata.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPresentation {
    pub severity: Severity,
    pub label: &'static str,
    pub message: &'static str,
}

/// Context handed to the correction flow so it can pre-fill the form.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionContext {
    pub application_id: i64,
    pub remarks: Option<String>,
}

/// Current milestone stage (1-based, of [`TOTAL_STAGES`]). An unrecognized
/// status is treated as "just submitted" rather than erroring.
pub fn stage_index(status: ApplicationStatus) -> u32 {
    match status {
        ApplicationStatus::Draft | ApplicationStatus::Submitted => 1,
        ApplicationStatus::UnderVerification | ApplicationStatus::DocsRequired => 2,
        ApplicationStatus::Approved | ApplicationStatus::Rejected => 3,
        ApplicationStatus::Unknown => 1,
    }
}

/// Progress bar fill, 0.0 to 100.0.
pub fn progress_percent(status: ApplicationStatus) -> f64 {
    (stage_index(status) - 1) as f64 / (TOTAL_STAGES - 1) as f64 * 100.0
}

/// Status chrome for the progress header. Total: every status, including
/// unrecognized ones, resolves to the default branch.
pub fn presentation(status: ApplicationStatus) -> StatusPresentation {
    match status {
        ApplicationStatus::Approved => StatusPresentation {
            severity: Severity::Success,
            label: "Approved",
            message: "Congratulations! Your application has been approved.",
        },
        ApplicationStatus::Rejected => StatusPresentation {
            severity: Severity::Danger,
            label: "Rejected",
            message: "Unfortunately, your application was not approved.",
        },
        ApplicationStatus::UnderVerification => StatusPresentation {
            severity: Severity::Info,
            label: "Under Review",
            message: "Your application is being reviewed by the scholarship committee.",
        },
        ApplicationStatus::DocsRequired => StatusPresentation {
            severity: Severity::Warning,
            label: "Documents Required",
            message: "Additional documents are required to proceed.",
        },
        ApplicationStatus::Draft => StatusPresentation {
            severity: Severity::Neutral,
            label: "Draft",
            message: "Your application is saved as a draft.",
        },
        ApplicationStatus::Submitted | ApplicationStatus::Unknown => StatusPresentation {
            severity: Severity::Info,
            label: "Submitted",
            message: "Your application has been submitted and is awaiting review.",
        },
    }
}

/// The correction flow is open only while the server asks for documents.
pub fn can_request_correction(status: ApplicationStatus) -> bool {
    status == ApplicationStatus::DocsRequired
}

/// Pre-fill context for the correction flow, present only when a correction
/// is currently permitted.
pub fn correction_context(application: &Application) -> Option<CorrectionContext> {
    if !can_request_correction(application.status) {
        return None;
    }
    Some(CorrectionContext {
        application_id: application.id,
        remarks: application.remarks.clone(),
    })
}
