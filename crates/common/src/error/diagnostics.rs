use std::{borrow::Cow, fmt, panic::Location};

/// Error message that remembers where it was raised.
///
/// Build one with [`DiagnosticMessage::new`] from inside a `#[track_caller]`
/// constructor, or with the [`diag!`] macro when the message needs
/// formatting. The recorded location is the first caller that is not itself
/// marked `#[track_caller]`.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn into_message(self) -> String {
        self.message.into_owned()
    }
}

// Two diagnostics are the same diagnostic if they say the same thing; where
// they were raised is only there to help a human find the call-site.
impl PartialEq for DiagnosticMessage {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for DiagnosticMessage {}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (at {}:{})",
            self.message,
            self.location.file(),
            self.location.line()
        )
    }
}

/// `format!`-style constructor for [`DiagnosticMessage`].
#[macro_export]
macro_rules! diag {
    ($msg:literal $(,)?) => {
        $crate::error::diagnostics::DiagnosticMessage::new($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::diagnostics::DiagnosticMessage::new(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_call_site() {
        let diag = DiagnosticMessage::new("boom");
        assert_eq!(diag.message(), "boom");
        assert_eq!(diag.location().file(), file!());
        assert!(diag.to_string().starts_with("boom (at "));
    }

    #[test]
    fn macro_formats_arguments() {
        let diag = diag!("missing {} of {}", "x", 2);
        assert_eq!(diag.message(), "missing x of 2");
        assert_eq!(diag, DiagnosticMessage::new("missing x of 2"));
    }
}
