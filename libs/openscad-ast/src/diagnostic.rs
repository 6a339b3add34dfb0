//! # Diagnostics
//!
//! Structured, advisory error and warning reporting. Diagnostics carry
//! source spans for precise error location reporting but never by
//! themselves indicate failure of a `parse` call.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::diagnostic::{Diagnostic, Severity};
//! use openscad_ast::span::SourceLocation;
//!
//! let diagnostic = Diagnostic::error(
//!     "Unknown function 'foo'",
//!     SourceLocation::sentinel(),
//! ).with_hint("Did you mean 'for'?");
//! assert_eq!(diagnostic.severity(), Severity::Error);
//! ```

use crate::span::SourceLocation;

/// Severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Advisory information, not indicative of a problem.
    Info,
    /// A potential issue that doesn't prevent compilation.
    Warning,
    /// A problem that prevented producing an ordinary AST node.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A diagnostic message with source location and optional hint.
///
/// ## Example
///
/// ```rust
/// use openscad_ast::diagnostic::Diagnostic;
/// use openscad_ast::span::SourceLocation;
///
/// let diag = Diagnostic::error("Syntax error", SourceLocation::sentinel());
/// assert_eq!(diag.message(), "Syntax error");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    span: SourceLocation,
    hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: SourceLocation) -> Self {
        Self { severity, message: message.into(), span, hint: None }
    }

    pub fn info(message: impl Into<String>, span: SourceLocation) -> Self {
        Self::new(Severity::Info, message, span)
    }

    pub fn error(message: impl Into<String>, span: SourceLocation) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: SourceLocation) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn span(&self) -> SourceLocation {
        self.span
    }

    #[inline]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (at {}..{})",
            self.severity.as_str(),
            self.message,
            self.span.start.byte,
            self.span.end.byte
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Info.as_str(), "info");
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("Test error", SourceLocation::sentinel());
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.message(), "Test error");
        assert!(diag.hint().is_none());
        assert!(diag.is_error());
        assert!(!diag.is_warning());
    }

    #[test]
    fn test_diagnostic_warning() {
        let diag = Diagnostic::warning("Test warning", SourceLocation::sentinel());
        assert_eq!(diag.severity(), Severity::Warning);
        assert!(diag.is_warning());
        assert!(!diag.is_error());
    }

    #[test]
    fn test_diagnostic_with_hint() {
        let diag = Diagnostic::error("Error", SourceLocation::sentinel()).with_hint("Try this instead");
        assert_eq!(diag.hint(), Some("Try this instead"));
    }

    #[test]
    fn test_diagnostic_display_with_hint() {
        let diag = Diagnostic::error("Error", SourceLocation::sentinel()).with_hint("Fix it");
        let display = format!("{}", diag);
        assert!(display.contains("hint: Fix it"));
    }
}
