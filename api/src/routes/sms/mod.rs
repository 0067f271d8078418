//! `/api/sms` - verification code endpoints

pub mod send;
pub mod verify;
