#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockVerificationCodeRepository;
pub use trait_::VerificationCodeRepository;

#[cfg(test)]
mod tests;
