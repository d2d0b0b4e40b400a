//! Outbound email transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

/// A fully addressed multipart/alternative message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()>;
}

fn parse_mailbox(field: &str, address: &str) -> AppResult<Mailbox> {
    address.parse().map_err(|e| AppError::Validation {
        field: field.to_string(),
        reason: format!("invalid address '{}': {}", address, e),
    })
}

fn build_message(email: &OutgoingEmail) -> AppResult<Message> {
    Message::builder()
        .from(parse_mailbox("from", &email.from)?)
        .to(parse_mailbox("to", &email.to)?)
        .subject(email.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to build email: {}", e),
        })
}

/// SMTP relay over STARTTLS, one session per message.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> AppResult<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Invalid SMTP relay '{}': {}", self.config.host, e),
            })?;

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        let message = build_message(email)?;

        // Only reachable in development and test; validation demands
        // credentials elsewhere. The body carries a recovery token and is
        // never logged.
        if self.config.username.is_empty() {
            tracing::warn!(
                to = %email.to,
                subject = %email.subject,
                "SMTP credentials not configured, email not sent"
            );
            return Ok(());
        }

        let response = self
            .transport()?
            .send(message)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("SMTP delivery to {} failed: {}", email.to, e),
            })?;

        tracing::info!(
            to = %email.to,
            code = %response.code(),
            "Email delivered to relay"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use super::*;

    /// Captures sent messages; optionally fails every send.
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        notify: Notify,
        fail: bool,
    }

    impl RecordingMailer {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }

        /// Resolves once at least `count` sends have been attempted.
        pub(crate) async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
            loop {
                let notified = self.notify.notified();
                {
                    let sent = self.sent.lock().unwrap();
                    if sent.len() >= count {
                        return sent.clone();
                    }
                }
                notified.await;
            }
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
            self.sent.lock().unwrap().push(email.clone());
            self.notify.notify_waiters();
            if self.fail {
                return Err(AppError::Internal {
                    source: anyhow::anyhow!("relay refused connection"),
                });
            }
            Ok(())
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: "GameDevs <gamedevs.recovery@outlook.com>".to_string(),
            to: to.to_string(),
            subject: "Recuperar Senha".to_string(),
            text: "texto".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&email("ana@gamedevs.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Recuperar Senha"));
        assert!(raw.contains("To: ana@gamedevs.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_invalid_recipient_is_validation_error() {
        match build_message(&email("not an address")) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "to"),
            other => panic!("Expected Validation error, got {:?}", other.err()),
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_smtp_mailer_without_credentials_skips_send_and_hides_body() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut message = email("ana@gamedevs.com");
        message.text = "reset link /recover/eyJhbGciOiJIUzI1NiJ9.secret-token".to_string();
        message.html = "<a href=\"/recover/eyJhbGciOiJIUzI1NiJ9.secret-token\">".to_string();

        let mailer = SmtpMailer::new(MailConfig::default());
        assert!(mailer.send(&message).await.is_ok());

        let output = logs.contents();
        assert!(output.contains("email not sent"), "{}", output);
        assert!(output.contains("ana@gamedevs.com"));
        assert!(!output.contains("secret-token"), "{}", output);
    }
}
