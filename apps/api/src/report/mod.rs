// CV analysis report: single-page PDF layout and per-request artifact storage.
// Reports are keyed by a generated id so concurrent analyses never clobber
// each other's file.

pub mod handlers;
pub mod layout;
pub mod pdf;
pub mod store;
