// Model exports
pub mod domain;
pub mod events;
pub mod responses;

pub use domain::{
    GradeEligibility, IncompleteRecord, InternshipDetails, InterviewInfo, MajorEligibility,
    Notification, Posting, ProfileRecord, Qualifications, StudentProfile, SupportAmount,
    ANY_SENTINEL,
};
pub use events::{ChangeBatch, ChangeOp, ChangeRecord, ScheduledTrigger, TAG_SCAN_SOURCE};
pub use responses::{HealthResponse, IngestResponse};
