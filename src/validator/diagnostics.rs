//! Diagnostic values and the configurable message catalog.
//!
//! The engine never embeds diagnostic prose in logic: every emitted message
//! is drawn from a [`MessageCatalog`] keyed by [`DiagnosticCode`], so hosts
//! can localize or rephrase without touching the analysis itself.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::document::Span;

/// Severity of a diagnostic. Structural findings are always [`Error`];
/// the variant set is part of the stable output contract.
///
/// [`Error`]: Severity::Error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// The fixed, enumerated catalog of diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    InvalidNext,
    InvalidDefault,
    InvalidStartAt,
    UnreachableState,
    NoTerminalState,
    InvalidPropertyName,
    MutuallyExclusiveChoiceProperties,
    InvalidJsonPath,
    InvalidIntrinsic,
    StringOnlyIntrinsic,
}

impl DiagnosticCode {
    /// Stable wire identifier of the code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidNext => "INVALID_NEXT",
            Self::InvalidDefault => "INVALID_DEFAULT",
            Self::InvalidStartAt => "INVALID_START_AT",
            Self::UnreachableState => "UNREACHABLE_STATE",
            Self::NoTerminalState => "NO_TERMINAL_STATE",
            Self::InvalidPropertyName => "INVALID_PROPERTY_NAME",
            Self::MutuallyExclusiveChoiceProperties => "MUTUALLY_EXCLUSIVE_CHOICE_PROPERTIES",
            Self::InvalidJsonPath => "INVALID_JSON_PATH",
            Self::InvalidIntrinsic => "INVALID_INTRINSIC",
            Self::StringOnlyIntrinsic => "STRING_ONLY_INTRINSIC",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding, anchored to a span of the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub span: Span,
    pub code: DiagnosticCode,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    #[must_use]
    pub fn new(span: Span, code: DiagnosticCode, message: String) -> Self {
        Self {
            span,
            code,
            message,
            severity: Severity::Error,
        }
    }
}

/// Message text per diagnostic code, treated as configuration data.
///
/// Templates may contain a single `{name}` placeholder, replaced with the
/// offending identifier when the emitter has one.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: FxHashMap<DiagnosticCode, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut catalog = Self {
            messages: FxHashMap::default(),
        };
        let defaults: &[(DiagnosticCode, &str)] = &[
            (
                DiagnosticCode::InvalidNext,
                "`Next` must reference a state declared in the same `States` scope",
            ),
            (
                DiagnosticCode::InvalidDefault,
                "`Default` must reference a state declared in the same `States` scope",
            ),
            (
                DiagnosticCode::InvalidStartAt,
                "`StartAt` must reference a state declared in the same `States` scope",
            ),
            (
                DiagnosticCode::UnreachableState,
                "state `{name}` is unreachable",
            ),
            (
                DiagnosticCode::NoTerminalState,
                "no terminal state in this scope: at least one state needs `\"End\": true` or type `Succeed`/`Fail`",
            ),
            (
                DiagnosticCode::InvalidPropertyName,
                "property `{name}` is not allowed here",
            ),
            (
                DiagnosticCode::MutuallyExclusiveChoiceProperties,
                "property `{name}` is mutually exclusive with its sibling properties",
            ),
            (
                DiagnosticCode::InvalidJsonPath,
                "invalid JSONPath expression",
            ),
            (
                DiagnosticCode::InvalidIntrinsic,
                "invalid intrinsic function expression",
            ),
            (
                DiagnosticCode::StringOnlyIntrinsic,
                "intrinsic functions are only allowed in string values",
            ),
        ];
        for (code, text) in defaults {
            catalog.messages.insert(*code, (*text).to_string());
        }
        catalog
    }
}

impl MessageCatalog {
    /// Replaces the template for one code.
    #[must_use]
    pub fn with_message(mut self, code: DiagnosticCode, text: impl Into<String>) -> Self {
        self.messages.insert(code, text.into());
        self
    }

    /// Renders the message for `code`, substituting `{name}` when provided.
    /// Falls back to the bare code identifier for codes a custom catalog
    /// left out.
    #[must_use]
    pub fn render(&self, code: DiagnosticCode, name: Option<&str>) -> String {
        let template = self
            .messages
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| code.as_str());
        match name {
            Some(name) => template.replace("{name}", name),
            None => template.to_string(),
        }
    }
}
