//! User-management domain module: contract models, the validation &
//! creation workflow, SeaORM-backed storage, and the REST surface with
//! the uniform error envelope.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
