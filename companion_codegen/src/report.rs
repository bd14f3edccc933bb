use proc_macro2::Span;
use strum::Display;

use crate::Messager;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Note,
    Warning,
    Error,
}

/// A message routed to the host's diagnostic channel.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: Kind,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(kind: Kind, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn note(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::new(Kind::Note, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::new(Kind::Warning, message, span)
    }

    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::new(Kind::Error, message, span)
    }
}

/// Ordered diagnostics collected about a single subject.
///
/// Items without a location of their own are reported against the subject's location when the
/// report is flushed.
pub struct ValidationReport<T> {
    subject: T,
    location: Option<Span>,
    items: Vec<Diagnostic>,
}

impl<T> ValidationReport<T> {
    pub fn about(subject: T, location: Option<Span>) -> Self {
        Self {
            subject,
            location,
            items: Vec::new(),
        }
    }

    pub fn subject(&self) -> &T {
        &self.subject
    }

    pub fn add_note(&mut self, message: impl Into<String>, span: Option<Span>) {
        self.items.push(Diagnostic::note(message, span));
    }

    pub fn add_warning(&mut self, message: impl Into<String>, span: Option<Span>) {
        self.items.push(Diagnostic::warning(message, span));
    }

    pub fn add_error(&mut self, message: impl Into<String>, span: Option<Span>) {
        self.items.push(Diagnostic::error(message, span));
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    /// `true` when no item is an error.
    pub fn is_clean(&self) -> bool {
        self.items.iter().all(|item| item.kind != Kind::Error)
    }

    /// Flush every item to `messager` in insertion order, returning whether the report was clean.
    pub fn print_messages_to(self, messager: &mut dyn Messager) -> bool {
        let clean = self.is_clean();

        for mut item in self.items {
            item.span = item.span.or(self.location);
            messager.print_message(item);
        }

        clean
    }
}
