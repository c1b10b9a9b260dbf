//! OTP delivery message.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::otp::OtpRecord;

/// Subject line used for every OTP message.
pub const OTP_SUBJECT: &str = "Security code";

// == OTP Message ==
/// Everything a delivery channel needs to tell a user their code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpMessage {
    /// Address on the delivery channel (email, phone, ...)
    pub recipient: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// Optional line shown above the code
    pub custom_message: Option<String>,
}

impl OtpMessage {
    pub fn new(recipient: impl Into<String>, record: &OtpRecord) -> Self {
        Self {
            recipient: recipient.into(),
            code: record.code.clone(),
            expires_at: record.expires_at,
            custom_message: None,
        }
    }

    pub fn with_custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    pub fn subject(&self) -> &'static str {
        OTP_SUBJECT
    }

    /// Plain-text body.
    pub fn body(&self) -> String {
        let mut body = String::new();
        if let Some(custom) = &self.custom_message {
            body.push_str(custom);
            body.push('\n');
        }
        body.push_str(&format!("Your security code is {}.\n", self.code));
        body.push_str(&format!(
            "It expires at {}.",
            self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        body
    }
}
