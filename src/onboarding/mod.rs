//! Tenant-configurable onboarding form: field validation and profile
//! completion scoring.

pub mod completion;
pub mod fields;

pub use completion::{compute, Completion};
pub use fields::FieldType;
