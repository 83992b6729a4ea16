//! Outbound notifications derived from a valid submission.
//!
//! Two emails are composed per submission: the primary notification for the
//! business inbox and a courtesy confirmation for the submitter. Both are
//! transient values handed to a [`MailTransport`](super::ports::MailTransport).

use super::contact::{Submission, is_valid_email};

/// Company name used when none is configured.
pub const DEFAULT_COMPANY_NAME: &str = "Al Shamil Turning LLC";

/// Contact block appended to confirmations when none is configured.
pub const DEFAULT_SIGNATURE: &str = "AL Hayl Industrial Area, Behind National Hypermarket
Fujairah, United Arab Emirates
Phone: +971 50 579 7905
Email: info@alshamilturning.com
Website: https://alshamilturning.com";

/// Rejected mail settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailSettingsError {
    /// The default sender address is not a valid email address.
    #[error("invalid default from address: {0}")]
    InvalidFromAddress(String),
    /// The business inbox is not a valid email address.
    #[error("invalid contact inbox address: {0}")]
    InvalidContactAddress(String),
    /// The company name is blank.
    #[error("company name must not be empty")]
    EmptyCompanyName,
}

/// Static addressing and branding for outbound notifications.
///
/// # Examples
/// ```
/// use contact_backend::domain::MailSettings;
///
/// let settings = MailSettings::new("info@example.com", "inbox@example.com")
///     .expect("valid addresses");
/// assert_eq!(settings.contact_email(), "inbox@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    from_email: String,
    contact_email: String,
    company_name: String,
    signature: String,
}

impl MailSettings {
    /// Build settings with the default company name and signature.
    pub fn new(
        from_email: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Result<Self, MailSettingsError> {
        let from_email = from_email.into().trim().to_owned();
        let contact_email = contact_email.into().trim().to_owned();
        if !is_valid_email(&from_email) {
            return Err(MailSettingsError::InvalidFromAddress(from_email));
        }
        if !is_valid_email(&contact_email) {
            return Err(MailSettingsError::InvalidContactAddress(contact_email));
        }
        Ok(Self {
            from_email,
            contact_email,
            company_name: DEFAULT_COMPANY_NAME.to_owned(),
            signature: DEFAULT_SIGNATURE.to_owned(),
        })
    }

    /// Override the company name shown in subjects and footers.
    pub fn with_company_name(
        mut self,
        company_name: impl Into<String>,
    ) -> Result<Self, MailSettingsError> {
        let company_name = company_name.into().trim().to_owned();
        if company_name.is_empty() {
            return Err(MailSettingsError::EmptyCompanyName);
        }
        self.company_name = company_name;
        Ok(self)
    }

    /// Override the contact block appended to confirmations.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Sender address for every notification.
    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    /// Business inbox receiving primary notifications.
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Company name.
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Confirmation signature block.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// A plain-text email ready for a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    subject: String,
    body: String,
    from: String,
    to: Vec<String>,
    reply_to: Vec<String>,
}

impl Notification {
    /// Assemble a notification from its parts.
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: Vec<String>,
        reply_to: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
            reply_to,
        }
    }

    /// Primary notification for the business inbox.
    ///
    /// Replies go straight to the submitter.
    ///
    /// # Examples
    /// ```
    /// use contact_backend::domain::{MailSettings, Notification, Submission};
    /// use serde_json::json;
    ///
    /// let raw = json!({"name": "A", "email": "a@b.com", "phone": "123", "message": "hi"});
    /// let submission = Submission::validate(raw.as_object().unwrap()).unwrap();
    /// let settings = MailSettings::new("info@example.com", "inbox@example.com").unwrap();
    ///
    /// let email = Notification::for_business(&submission, &settings);
    /// assert_eq!(email.to(), &["inbox@example.com"]);
    /// assert_eq!(email.reply_to(), &["a@b.com"]);
    /// ```
    pub fn for_business(submission: &Submission, settings: &MailSettings) -> Self {
        let service = submission
            .service()
            .map_or("Not specified", |category| category.key());

        let body = format!(
            "New Contact Form Submission\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Service Required: {service}\n\n\
             Message:\n{message}\n\n\
             ---\n\
             This email was sent from the {company} contact form.\n",
            name = submission.name(),
            email = submission.email(),
            phone = submission.phone(),
            message = submission.message(),
            company = settings.company_name(),
        );

        Self::new(
            format!("New Contact Form Submission from {}", submission.name()),
            body,
            settings.from_email(),
            vec![settings.contact_email().to_owned()],
            vec![submission.email().to_owned()],
        )
    }

    /// Courtesy acknowledgment addressed back to the submitter.
    ///
    /// Replies go to the business sender address.
    pub fn confirmation(submission: &Submission, settings: &MailSettings) -> Self {
        let body = format!(
            "Dear {name},\n\n\
             Thank you for reaching out to us. We have received your message and will \
             get back to you within 24 hours.\n\n\
             Best regards,\n\
             {company}\n\
             {signature}",
            name = submission.name(),
            company = settings.company_name(),
            signature = settings.signature(),
        );

        Self::new(
            format!("Thank you for contacting {}", settings.company_name()),
            body,
            settings.from_email(),
            vec![submission.email().to_owned()],
            vec![settings.from_email().to_owned()],
        )
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain-text body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Sender address.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Recipient addresses.
    pub fn to(&self) -> &[String] {
        &self.to
    }

    /// Reply-To addresses.
    pub fn reply_to(&self) -> &[String] {
        &self.reply_to
    }
}
