pub mod application;
pub mod document;
pub mod scholarship;
pub mod university;
pub mod user;

pub use application::{Application, ApplicationDocument, ApplicationStatus};
pub use document::{DocumentTypeDefinition, UploadedDocument};
pub use scholarship::Scholarship;
pub use university::{AcademicSession, Branch, Department};
pub use user::{Claims, Identity, Role, StudentProfile, UserAccount};
