pub mod error;
pub mod patient;
pub mod payment;

pub use error::{ErrorBody, ErrorDetail};
pub use patient::{Patient, PatientSummary, PatientUpsert};
pub use payment::{Payment, PaymentUpsert};
