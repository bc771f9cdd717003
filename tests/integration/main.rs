//! HTTP-level integration tests against the in-memory drive.

mod helpers;

mod health_test;
mod ocr_test;
mod sharepoint_test;
