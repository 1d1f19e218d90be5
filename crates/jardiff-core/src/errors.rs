use jardiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using JarDiffError
pub type Result<T> = std::result::Result<T, JarDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output. Differencing itself never fails;
/// these kinds cover the surfaces around it (snapshot validation, strategy
/// selection, configuration and I/O).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input contract
    /// A snapshot entry disagrees with the record stored under it
    InvalidSnapshot,
    /// Two fields with the same name, or two methods with the same signature, in one class
    DuplicateFeature,

    // Configuration
    UnknownStrategy,
    UnknownProfile,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::DuplicateFeature => "ERR_DUPLICATE_FEATURE",
            ExErrorKind::UnknownStrategy => "ERR_UNKNOWN_STRATEGY",
            ExErrorKind::UnknownProfile => "ERR_UNKNOWN_PROFILE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging (operation, offending entity, comparison request id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (package, class or feature name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised around the differencing engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JarDiffError {
    // ===== Snapshot contract =====
    /// A class record is stored under a key that is not its own name
    #[error("Class stored under key {key} is named {name}")]
    ClassKeyMismatch { key: String, name: String },

    /// A class record is stored in a package its name does not belong to
    #[error("Class {class_name} does not belong to package {package}")]
    MisplacedClass { class_name: String, package: String },

    /// A class record has an empty name
    #[error("Class record in package {package} has an empty name")]
    UnnamedClass { package: String },

    /// Two fields of one class share a name
    #[error("Class {class_name} declares field {field} more than once")]
    DuplicateField { class_name: String, field: String },

    /// Two methods of one class share a signature
    #[error("Class {class_name} declares method {signature} more than once")]
    DuplicateMethod {
        class_name: String,
        signature: String,
    },

    // ===== Configuration =====
    /// Strategy name not recognised
    #[error("Unknown difference strategy: {name}")]
    UnknownStrategy { name: String },

    /// Logging profile name not recognised
    #[error("Unknown logging profile: {name}")]
    UnknownProfile { name: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Integration =====
    /// File could not be read or written
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Snapshot or report (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<JarDiffError> for ExError {
    fn from(err: JarDiffError) -> Self {
        match err {
            JarDiffError::ClassKeyMismatch { key, name } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_entity_id(key)
                    .with_message(format!("class record is named {}", name))
            }

            JarDiffError::MisplacedClass {
                class_name,
                package,
            } => ExError::new(ExErrorKind::InvalidSnapshot)
                .with_entity_id(class_name)
                .with_message(format!("class stored in package {}", package)),

            JarDiffError::UnnamedClass { package } => ExError::new(ExErrorKind::InvalidSnapshot)
                .with_entity_id(package)
                .with_message("class record has an empty name"),

            JarDiffError::DuplicateField { class_name, field } => {
                ExError::new(ExErrorKind::DuplicateFeature)
                    .with_entity_id(class_name)
                    .with_message(format!("duplicate field {}", field))
            }

            JarDiffError::DuplicateMethod {
                class_name,
                signature,
            } => ExError::new(ExErrorKind::DuplicateFeature)
                .with_entity_id(class_name)
                .with_message(format!("duplicate method {}", signature)),

            JarDiffError::UnknownStrategy { name } => ExError::new(ExErrorKind::UnknownStrategy)
                .with_entity_id(name)
                .with_message("Unknown difference strategy"),

            JarDiffError::UnknownProfile { name } => ExError::new(ExErrorKind::UnknownProfile)
                .with_entity_id(name)
                .with_message("Unknown logging profile"),

            JarDiffError::InvalidConfig { message } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            JarDiffError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_entity_id(path)
                .with_message(message),

            JarDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            JarDiffError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for JarDiffError {
    fn from(err: serde_json::Error) -> Self {
        JarDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for JarDiffError {
    fn from(err: toml::de::Error) -> Self {
        JarDiffError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl JarDiffError {
    /// Wrap an I/O failure with the path it happened on
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        JarDiffError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}
