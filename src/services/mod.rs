pub mod candidate_service;
pub mod extraction_service;
pub mod local_store;
pub mod record_store;
pub mod registry_service;
pub mod remote_store;
