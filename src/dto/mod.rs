//! DTO modules that bridge the backend envelope, services and templates.

pub mod customers;
