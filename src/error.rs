use std::fmt;
use thiserror::Error;

/// Structured error context for diagnosing where a failure came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "area_size", "generation.temperature")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., accepted values, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_loader", "prompt_assembler")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the generation pipeline.
///
/// Caller-input problems (`InvalidParameter`) are kept apart from backend and
/// content problems so the HTTP layer can map them to 400 and 500 respectively.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported request type: {request_type}")]
    UnsupportedRequestType { request_type: String },

    #[error("Invalid parameter: {message}{}", format_context(.context))]
    InvalidParameter {
        message: String,
        context: ErrorContext,
    },

    #[error("Generation failed{}: {message}", format_status(.status))]
    GenerationFailure {
        message: String,
        status: Option<u16>,
    },

    #[error("Generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, raw: String },

    #[error("Schema violation: missing required field(s): {}", .missing.join(", "))]
    SchemaViolation { missing: Vec<String> },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl Error {
    pub fn unsupported_request_type(request_type: impl Into<String>) -> Self {
        Error::UnsupportedRequestType {
            request_type: request_type.into(),
        }
    }

    /// Create an invalid-parameter error naming the offending field.
    pub fn invalid_parameter(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::InvalidParameter {
            message: msg.into(),
            context: ErrorContext::new().with_field_path(field),
        }
    }

    pub fn invalid_parameter_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidParameter {
            message: msg.into(),
            context,
        }
    }

    pub fn generation_failure(msg: impl Into<String>, status: Option<u16>) -> Self {
        Error::GenerationFailure {
            message: msg.into(),
            status,
        }
    }

    pub fn malformed_response(msg: impl Into<String>, raw: impl Into<String>) -> Self {
        Error::MalformedResponse {
            message: msg.into(),
            raw: raw.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidParameter { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedRequestType { .. } => ErrorKind::UnsupportedRequestType,
            Error::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Error::GenerationFailure { .. } => ErrorKind::GenerationFailure,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// True when the failure was caused by caller-supplied input.
    pub fn is_caller_error(&self) -> bool {
        self.kind().is_caller_error()
    }

    /// HTTP status the route layer should answer with for this error.
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }
}

/// Error classification table.
///
/// | Code  | Kind                      | HTTP |
/// |-------|---------------------------|------|
/// | S1001 | invalid_parameter         | 400  |
/// | S1002 | unsupported_request_type  | 500  |
/// | S2001 | generation_failure        | 500  |
/// | S2002 | timeout                   | 500  |
/// | S3001 | malformed_response        | 500  |
/// | S3002 | schema_violation          | 500  |
/// | S9001 | configuration             | 500  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    UnsupportedRequestType,
    GenerationFailure,
    Timeout,
    MalformedResponse,
    SchemaViolation,
    Configuration,
}

impl ErrorKind {
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "S1001",
            Self::UnsupportedRequestType => "S1002",
            Self::GenerationFailure => "S2001",
            Self::Timeout => "S2002",
            Self::MalformedResponse => "S3001",
            Self::SchemaViolation => "S3002",
            Self::Configuration => "S9001",
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "invalid_parameter",
            Self::UnsupportedRequestType => "unsupported_request_type",
            Self::GenerationFailure => "generation_failure",
            Self::Timeout => "timeout",
            Self::MalformedResponse => "malformed_response",
            Self::SchemaViolation => "schema_violation",
            Self::Configuration => "configuration",
        }
    }

    /// Unsupported request types are programmer errors, not bad caller input.
    #[inline]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidParameter)
    }

    #[inline]
    pub fn http_status(&self) -> u16 {
        if self.is_caller_error() {
            400
        } else {
            500
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}
