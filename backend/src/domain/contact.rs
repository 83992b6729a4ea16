//! Contact form submission and its validator.
//!
//! [`Submission::validate`] is a pure function from a decoded JSON object to
//! either a fully valid submission or the complete set of field errors. No
//! partially valid submission can be constructed.
//!
//! Scalar values are coerced the way an HTML form would see them: strings are
//! trimmed, numbers and booleans become their text form, and `null` counts as
//! empty.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{FieldErrors, FieldViolation};

/// Maximum characters accepted for [`ContactField::Name`].
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum characters accepted for [`ContactField::Phone`].
pub const PHONE_MAX_CHARS: usize = 20;
/// Maximum characters accepted for an email address.
pub const EMAIL_MAX_CHARS: usize = 320;

/// Fields accepted by the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    /// Submitter's name.
    Name,
    /// Submitter's email address.
    Email,
    /// Submitter's phone number.
    Phone,
    /// Requested service category.
    Service,
    /// Free-form message.
    Message,
}

impl ContactField {
    /// Every field in form order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Service,
        Self::Message,
    ];

    /// Key used in JSON payloads and error maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Message => "message",
        }
    }

    /// Whether the form rejects an empty value.
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Service)
    }

    /// Character cap, if the field has one.
    pub const fn max_chars(self) -> Option<usize> {
        match self {
            Self::Name => Some(NAME_MAX_CHARS),
            Self::Phone => Some(PHONE_MAX_CHARS),
            Self::Email => Some(EMAIL_MAX_CHARS),
            Self::Service | Self::Message => None,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service categories offered on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    /// Brush kart manufacturing.
    BrushKart,
    /// Hydraulic system solutions.
    Hydraulic,
    /// Industrial fabrication and welding.
    Fabrication,
    /// Machine servicing and maintenance.
    Maintenance,
    /// Technical consultation.
    Consultation,
    /// Anything else.
    Other,
}

impl ServiceCategory {
    /// Every category in display order.
    pub const ALL: [Self; 6] = [
        Self::BrushKart,
        Self::Hydraulic,
        Self::Fabrication,
        Self::Maintenance,
        Self::Consultation,
        Self::Other,
    ];

    /// Value submitted by the form.
    pub const fn key(self) -> &'static str {
        match self {
            Self::BrushKart => "brush-kart",
            Self::Hydraulic => "hydraulic",
            Self::Fabrication => "fabrication",
            Self::Maintenance => "maintenance",
            Self::Consultation => "consultation",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BrushKart => "Brush Kart Manufacturing",
            Self::Hydraulic => "Hydraulic System Solutions",
            Self::Fabrication => "Industrial Fabrication & Welding",
            Self::Maintenance => "Machine Servicing & Maintenance",
            Self::Consultation => "Technical Consultation",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string is not a known [`ServiceCategory`] key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0}")]
pub struct UnknownServiceCategory(pub String);

impl FromStr for ServiceCategory {
    type Err = UnknownServiceCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| UnknownServiceCategory(s.to_owned()))
    }
}

/// A fully validated contact form submission.
///
/// ## Invariants
/// - `name`, `email`, `phone` and `message` are trimmed and non-empty.
/// - `name` and `phone` respect their character caps.
/// - `email` passes [`is_valid_email`].
///
/// # Examples
/// ```
/// use contact_backend::domain::{ServiceCategory, Submission};
/// use serde_json::json;
///
/// let raw = json!({
///     "name": "A",
///     "email": "a@b.com",
///     "phone": "123",
///     "service": "fabrication",
///     "message": "hi",
/// });
/// let submission = Submission::validate(raw.as_object().unwrap()).unwrap();
/// assert_eq!(submission.email(), "a@b.com");
/// assert_eq!(submission.service(), Some(ServiceCategory::Fabrication));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: String,
    phone: String,
    service: Option<ServiceCategory>,
    message: String,
}

impl Submission {
    /// Validate a decoded JSON object.
    ///
    /// Every field is checked; the error map names each rejected field.
    /// Keys other than the five form fields are ignored.
    pub fn validate(raw: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = clean_field(raw, ContactField::Name, &mut errors);
        let email = clean_field(raw, ContactField::Email, &mut errors);
        let phone = clean_field(raw, ContactField::Phone, &mut errors);
        let service = clean_field(raw, ContactField::Service, &mut errors);
        let message = clean_field(raw, ContactField::Message, &mut errors);

        if let Some(value) = email.as_deref() {
            if !is_valid_email(value) {
                errors.push(ContactField::Email, FieldViolation::InvalidEmail);
            }
        }

        let service = match service {
            None => None,
            Some(value) => match value.parse::<ServiceCategory>() {
                Ok(category) => Some(category),
                Err(UnknownServiceCategory(value)) => {
                    errors.push(
                        ContactField::Service,
                        FieldViolation::InvalidChoice { value },
                    );
                    None
                }
            },
        };

        match (name, email, phone, message) {
            (Some(name), Some(email), Some(phone), Some(message)) if errors.is_empty() => {
                Ok(Self {
                    name,
                    email,
                    phone,
                    service,
                    message,
                })
            }
            _ => Err(errors),
        }
    }

    /// Submitter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Submitter's phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Requested service, if one was selected.
    pub fn service(&self) -> Option<ServiceCategory> {
        self.service
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Coerce, trim and check a single field.
///
/// Returns `None` when the field is empty or rejected; rejections are
/// recorded in `errors`.
fn clean_field(
    raw: &Map<String, Value>,
    field: ContactField,
    errors: &mut FieldErrors,
) -> Option<String> {
    let text = match raw.get(field.as_str()) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(_) | Value::Object(_)) => {
            errors.push(field, FieldViolation::InvalidValue);
            return None;
        }
    };

    if text.is_empty() {
        if field.is_required() {
            errors.push(field, FieldViolation::Required);
        }
        return None;
    }

    let mut valid = true;
    if let Some(max) = field.max_chars() {
        let actual = text.chars().count();
        if actual > max {
            errors.push(field, FieldViolation::TooLong { max, actual });
            valid = false;
        }
    }
    if text.contains('\0') {
        errors.push(field, FieldViolation::NullCharacters);
        valid = false;
    }

    valid.then_some(text)
}

const LOCAL_PART_MAX_LEN: usize = 64;
const DOMAIN_MAX_LEN: usize = 254;

static LOCAL_PART_DOT_ATOM: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9a-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*$")
});

static LOCAL_PART_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"^"(?:[\t !#-\[\]-~]|\\[!-~])+"$"#));

static DOMAIN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:[a-z][a-z-]{0,61}[a-z]|xn--[a-z0-9]{1,59})$",
    )
});

static DOMAIN_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^\[(?:IPv6:)?([a-f0-9:.]+)\]$"));

#[expect(clippy::expect_used, reason = "patterns are compile-time literals")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("email pattern compiles")
}

/// Check an address against the usual `local@domain` grammar.
///
/// Accepts dot-atom or quoted local parts of at most 64 characters, dotted
/// domains ending in an alphabetic or punycode top-level label, `localhost`
/// and bracketed IP literals. Quoted local parts hold printable ASCII only.
///
/// # Examples
/// ```
/// use contact_backend::domain::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// assert!(!is_valid_email("not an address"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() || value.chars().count() > EMAIL_MAX_CHARS {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.len() > LOCAL_PART_MAX_LEN || domain.len() > DOMAIN_MAX_LEN {
        return false;
    }
    if !(LOCAL_PART_DOT_ATOM.is_match(local) || LOCAL_PART_QUOTED.is_match(local)) {
        return false;
    }
    if domain.eq_ignore_ascii_case("localhost") || DOMAIN_NAME.is_match(domain) {
        return true;
    }
    DOMAIN_LITERAL
        .captures(domain)
        .and_then(|caps| caps.get(1))
        .is_some_and(|ip| ip.as_str().parse::<std::net::IpAddr>().is_ok())
}
