//! REST API Tests

pub mod chat_tests;
pub mod health_tests;
