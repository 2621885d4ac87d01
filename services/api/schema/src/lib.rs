//! sea-orm entities for the LINX API service.

pub mod employers;
pub mod jobs;
pub mod users;
