//! HTTP middleware: request ID stamping.

pub mod request_id;
