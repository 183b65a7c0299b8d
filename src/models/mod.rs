pub mod candidate;
pub mod cv_upload;
pub mod extracted;
