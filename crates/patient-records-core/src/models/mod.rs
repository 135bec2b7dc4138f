//! Domain models for the patient records form.

mod draft;
mod patient;

pub use draft::*;
pub use patient::*;
