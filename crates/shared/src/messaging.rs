//! Messaging transport for contribution receipts over SMS and WhatsApp.
//!
//! Sends through the Twilio REST API with `reqwest`. The WhatsApp channel is
//! preferred when a WhatsApp sender number is configured; otherwise the
//! receipt goes out as a plain SMS.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::MessagingConfig;

/// Messaging service errors.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// HTTP transport failure.
    #[error("messaging transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider rejected the request.
    #[error("messaging provider rejected request ({status}): {body}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Response body returned by the provider.
        body: String,
    },
    /// The destination number could not be normalized.
    #[error("invalid destination number: {0}")]
    InvalidNumber(String),
}

/// Messaging channel for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Plain SMS.
    Sms,
    /// WhatsApp message.
    Whatsapp,
}

/// Messaging service for sending contribution receipts.
#[derive(Clone)]
pub struct MessagingService {
    config: MessagingConfig,
    client: reqwest::Client,
}

impl MessagingService {
    /// Creates a new messaging service.
    #[must_use]
    pub fn new(config: MessagingConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Normalizes an area code + subscriber number to E.164.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::InvalidNumber` if no digits remain after
    /// stripping formatting.
    pub fn to_e164(&self, area_code: &str, number: &str) -> Result<String, MessagingError> {
        let digits: String = format!("{area_code}{number}")
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        if digits.is_empty() {
            return Err(MessagingError::InvalidNumber(format!(
                "{area_code} {number}"
            )));
        }

        let cc = &self.config.country_code;
        if digits.starts_with(cc.as_str()) && digits.len() > 11 {
            Ok(format!("+{digits}"))
        } else {
            Ok(format!("+{cc}{digits}"))
        }
    }

    /// Returns which channel a receipt will use.
    #[must_use]
    pub fn receipt_channel(&self) -> Channel {
        if self.config.whatsapp_from.is_empty() {
            Channel::Sms
        } else {
            Channel::Whatsapp
        }
    }

    /// Sends a contribution receipt to the given E.164 number.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails. The caller treats this as
    /// a warning; it never affects the stored entry.
    pub async fn send_receipt(
        &self,
        to_e164: &str,
        payer_name: &str,
        amount: Decimal,
        category: &str,
        date: NaiveDate,
    ) -> Result<(), MessagingError> {
        let body = format!(
            "Hello {payer_name}! Your contribution of {amount:.2} ({category}) \
             on {date} has been recorded. Thank you and God bless!"
        );

        match self.receipt_channel() {
            Channel::Whatsapp => {
                let from = self.config.whatsapp_from.clone();
                let to = format!("whatsapp:{to_e164}");
                self.send(&from, &to, &body).await
            }
            Channel::Sms => {
                let from = self.config.from_number.clone();
                self.send(&from, to_e164, &body).await
            }
        }
    }

    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), MessagingError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base, self.config.account_sid
        );

        let params = [("From", from), ("To", to), ("Body", body)];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(MessagingError::Api { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MessagingService {
        MessagingService::new(MessagingConfig::default())
    }

    #[test]
    fn test_to_e164_prepends_country_code() {
        let number = service().to_e164("11", "987654321").unwrap();
        assert_eq!(number, "+5511987654321");
    }

    #[test]
    fn test_to_e164_strips_formatting() {
        let number = service().to_e164("(11)", "98765-4321").unwrap();
        assert_eq!(number, "+5511987654321");
    }

    #[test]
    fn test_to_e164_keeps_existing_country_code() {
        let number = service().to_e164("55", "11987654321").unwrap();
        assert_eq!(number, "+5511987654321");
    }

    #[test]
    fn test_to_e164_rejects_empty() {
        assert!(matches!(
            service().to_e164("", "---"),
            Err(MessagingError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_receipt_channel_prefers_whatsapp() {
        let mut config = MessagingConfig::default();
        assert_eq!(MessagingService::new(config.clone()).receipt_channel(), Channel::Sms);

        config.whatsapp_from = "whatsapp:+14155238886".to_string();
        assert_eq!(
            MessagingService::new(config).receipt_channel(),
            Channel::Whatsapp
        );
    }
}
