//! Explicit state objects for the customer list and the record form.
//!
//! Each object is a plain value updated through reducer-style methods. Route
//! handlers rebuild them from the request, apply the triggering action and
//! hand them to the templates; nothing lives in globals.

pub mod form;
pub mod listing;
