use serde::{Deserialize, Serialize};

/// A composed email as handed to the mailer adapter.
///
/// The body is HTML. Only the first `to` entry is addressed when the
/// message is rendered into its raw form; additional entries are silently
/// ignored.
///
/// # Examples
///
/// ```
/// use courier_core::OutboundEmail;
///
/// let email = OutboundEmail::new(
///     "noreply@example.com",
///     "user@example.com",
///     "Welcome",
///     "<p>Hello!</p>",
/// );
/// assert_eq!(email.first_recipient(), Some("user@example.com"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Sender email address.
    pub from: String,

    /// Recipient email addresses. Only the first is addressed.
    pub to: Vec<String>,

    /// Email subject line.
    pub subject: String,

    /// HTML email body.
    pub html_body: String,
}

impl OutboundEmail {
    /// Create a new email with a single recipient.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }

    /// Append a recipient to the `to` list.
    ///
    /// Note that the adapter only addresses the first recipient; extra
    /// entries are kept on the struct but ignored at send time.
    #[must_use]
    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        self.to.push(to.into());
        self
    }

    /// The first recipient, if any.
    pub fn first_recipient(&self) -> Option<&str> {
        self.to.first().map(String::as_str)
    }
}
