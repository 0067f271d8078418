//! HTTP route handlers

pub mod form;
pub mod health;
pub mod sms;
