pub mod enums;
pub mod patient;
pub mod record;

pub use patient::Patient;
pub use record::{PatientRecord, PatientUpdate};
