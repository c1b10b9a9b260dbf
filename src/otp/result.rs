//! Validation outcomes.

/// Terminal outcome of a validation attempt.
///
/// These are ordinary results, not errors: a wrong code is an expected,
/// frequent, user-facing case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// Nothing was issued for the identifier, or it was already consumed
    Empty,
    /// A record exists but its semantic expiry has passed
    Expired,
    /// A live record exists and the submitted code does not match it
    Invalid,
    /// The code matched and the record has been consumed
    Valid,
}

impl ValidationResult {
    pub const OTP_EMPTY: &'static str = "otp.empty";
    pub const OTP_EXPIRED: &'static str = "otp.expired";
    pub const OTP_INVALID: &'static str = "otp.invalid";
    pub const OTP_VALID: &'static str = "otp.valid";

    /// The boolean status callers branch on.
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Stable message key for the outcome.
    pub fn message(self) -> &'static str {
        match self {
            ValidationResult::Empty => Self::OTP_EMPTY,
            ValidationResult::Expired => Self::OTP_EXPIRED,
            ValidationResult::Invalid => Self::OTP_INVALID,
            ValidationResult::Valid => Self::OTP_VALID,
        }
    }
}
