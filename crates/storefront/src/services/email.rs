//! Email delivery for the contact form.
//!
//! Uses SMTP via lettre with Askama templates. The contact endpoint is a
//! proxy: the customer's message is forwarded to the shop inbox with the
//! customer's address set as reply-to, so staff can answer directly.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use cortado_core::Email;

use crate::config::SmtpConfig;

/// HTML template for a forwarded contact message.
#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Plain text template for a forwarded contact message.
#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactEmailText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service backed by an SMTP relay.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    to_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }

    /// Forward a contact-form submission to the shop inbox.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to render or send.
    pub async fn send_contact_message(
        &self,
        name: &str,
        reply_to: &Email,
        subject: Option<&str>,
        message: &str,
    ) -> Result<(), EmailError> {
        let html = ContactEmailHtml {
            name,
            email: reply_to.as_str(),
            message,
        }
        .render()?;
        let text = ContactEmailText {
            name,
            email: reply_to.as_str(),
            message,
        }
        .render()?;

        let subject = subject.map_or_else(
            || format!("Contact form message from {name}"),
            |s| format!("Contact form: {s}"),
        );

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .to_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.to_address.clone()))?)
            .reply_to(
                reply_to
                    .as_str()
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(reply_to.as_str().to_string()))?,
            )
            .subject(&subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(subject = %subject, "Contact message forwarded");
        Ok(())
    }
}
