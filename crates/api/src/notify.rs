//! Best-effort notification dispatch after entry creation.
//!
//! Each channel validates its own input independently and reports its outcome
//! as a warning; a failed or skipped notification never rolls back or blocks
//! the persisted entry. Receipt messages (WhatsApp/SMS) go out only for pix
//! payments.

use serde::Serialize;
use tracing::warn;

use offertory_core::entry::{OwnEntry, PaymentMethod, validation};
use offertory_shared::config::NotificationConfig;
use offertory_shared::{EmailService, MessagingService};

/// Outcome of one notification channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelOutcome {
    /// Whether the channel delivered.
    pub sent: bool,
    /// Human-readable detail, shown as a warning when `sent` is false.
    pub detail: String,
}

impl ChannelOutcome {
    fn sent(detail: impl Into<String>) -> Self {
        Self {
            sent: true,
            detail: detail.into(),
        }
    }

    fn failed(detail: impl Into<String>) -> Self {
        Self {
            sent: false,
            detail: detail.into(),
        }
    }
}

/// Per-channel outcomes for one entry creation.
///
/// `None` means the channel was not attempted (disabled, no contact info, or
/// the payment method does not qualify).
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationReport {
    /// Email receipt outcome.
    pub email: Option<ChannelOutcome>,
    /// WhatsApp/SMS receipt outcome.
    pub message: Option<ChannelOutcome>,
}

/// Best-effort notification dispatcher.
pub struct Notifier {
    config: NotificationConfig,
    email: EmailService,
    messaging: MessagingService,
}

impl Notifier {
    /// Creates a dispatcher from the notification configuration.
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        let email = EmailService::new(config.email.clone());
        let messaging = MessagingService::new(config.messaging.clone());
        Self {
            config,
            email,
            messaging,
        }
    }

    /// Sends receipts for a freshly created entry.
    ///
    /// Never fails; every problem is folded into the report.
    pub async fn send_receipts(&self, entry: &OwnEntry) -> NotificationReport {
        let mut report = NotificationReport::default();

        if !self.config.enabled {
            return report;
        }

        if self.config.email_enabled {
            if let Some(address) = entry.email.as_deref() {
                report.email = Some(self.send_email_receipt(address, entry).await);
            }
        }

        // Receipt messages are a pix-only business rule.
        if self.config.sms_enabled && entry.payment_method == PaymentMethod::Pix {
            if let (Some(area_code), Some(number)) =
                (entry.area_code.as_deref(), entry.phone_number.as_deref())
            {
                report.message = Some(self.send_message_receipt(area_code, number, entry).await);
            }
        }

        report
    }

    async fn send_email_receipt(&self, address: &str, entry: &OwnEntry) -> ChannelOutcome {
        if validation::validate_email(address).is_err() {
            return ChannelOutcome::failed("email address is invalid");
        }

        match self
            .email
            .send_receipt(
                address,
                &entry.payer_name,
                entry.amount,
                entry.category.label(),
                entry.date,
            )
            .await
        {
            Ok(()) => ChannelOutcome::sent(format!("email receipt sent to {address}")),
            Err(e) => {
                warn!(entry_id = entry.id, error = %e, "Email receipt failed");
                ChannelOutcome::failed(e.to_string())
            }
        }
    }

    async fn send_message_receipt(
        &self,
        area_code: &str,
        number: &str,
        entry: &OwnEntry,
    ) -> ChannelOutcome {
        if validation::validate_phone_parts(area_code, number).is_err() {
            return ChannelOutcome::failed("phone number is invalid");
        }

        let to = match self.messaging.to_e164(area_code, number) {
            Ok(to) => to,
            Err(e) => return ChannelOutcome::failed(e.to_string()),
        };

        match self
            .messaging
            .send_receipt(
                &to,
                &entry.payer_name,
                entry.amount,
                entry.category.label(),
                entry.date,
            )
            .await
        {
            Ok(()) => ChannelOutcome::sent(format!("receipt message sent to {to}")),
            Err(e) => {
                warn!(entry_id = entry.id, error = %e, "Receipt message failed");
                ChannelOutcome::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use offertory_core::entry::Category;
    use rust_decimal_macros::dec;

    fn entry(method: PaymentMethod, email: Option<&str>, phone: Option<(&str, &str)>) -> OwnEntry {
        OwnEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            payer_name: "Maria Silva".to_string(),
            amount: dec!(120.50),
            payment_method: method,
            category: Category::Tithe,
            email: email.map(str::to_string),
            area_code: phone.map(|(a, _)| a.to_string()),
            phone_number: phone.map(|(_, n)| n.to_string()),
            operator: None,
        }
    }

    fn notifier(enabled: bool, email_enabled: bool, sms_enabled: bool) -> Notifier {
        Notifier::new(NotificationConfig {
            enabled,
            email_enabled,
            sms_enabled,
            ..NotificationConfig::default()
        })
    }

    #[tokio::test]
    async fn test_disabled_dispatch_attempts_nothing() {
        let notifier = notifier(false, true, true);
        let report = notifier
            .send_receipts(&entry(
                PaymentMethod::Pix,
                Some("maria@example.com"),
                Some(("11", "987654321")),
            ))
            .await;

        assert!(report.email.is_none());
        assert!(report.message.is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_is_reported_not_fatal() {
        let notifier = notifier(true, true, false);
        let report = notifier
            .send_receipts(&entry(PaymentMethod::Cash, Some("not-an-email"), None))
            .await;

        let outcome = report.email.expect("email channel should be attempted");
        assert!(!outcome.sent);
    }

    #[tokio::test]
    async fn test_message_skipped_for_non_pix() {
        let notifier = notifier(true, false, true);
        let report = notifier
            .send_receipts(&entry(
                PaymentMethod::Cash,
                None,
                Some(("11", "987654321")),
            ))
            .await;

        assert!(report.message.is_none());
    }

    #[tokio::test]
    async fn test_invalid_phone_is_reported_not_fatal() {
        let notifier = notifier(true, false, true);
        let report = notifier
            .send_receipts(&entry(PaymentMethod::Pix, None, Some(("11", "4321"))))
            .await;

        let outcome = report.message.expect("message channel should be attempted");
        assert!(!outcome.sent);
    }
}
