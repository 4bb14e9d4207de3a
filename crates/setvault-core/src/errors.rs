use thiserror::Error;

/// Result type alias using SetVaultError
pub type Result<T> = std::result::Result<T, SetVaultError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by export or import maps onto one of these kinds.
/// Each kind has a stable error code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// No matching set row, snapshot directory or artifact file
    NotFound,
    /// Caller supplied a value that cannot be used (bad stamp, empty name)
    InvalidInput,

    /// Filesystem create/read/write failure
    Io,
    /// Artifact content could not be encoded or decoded
    Serialization,
    /// Store query or insert failure
    Persistence,
    /// Import failed after rows were written and the rollback did not succeed
    PartialImport,

    /// Host package inventory could not be queried
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::PartialImport => "ERR_PARTIAL_IMPORT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation and entity context needed by an operator to inspect what
/// was left behind.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
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
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (set name, set id, path)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
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

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// True when the store may hold a partially imported aggregate
    pub fn is_partial_import(&self) -> bool {
        self.kind == ExErrorKind::PartialImport
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
            write!(f, " ({})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
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

/// Domain errors raised by the pure rules in this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetVaultError {
    /// No set row matches the natural key
    #[error("Set not found: {name} (rnbo version {version})")]
    SetNotFound { name: String, version: String },

    /// No snapshot directory exists for the requested name/stamp
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound { path: String },

    /// A mandatory artifact file is absent from the snapshot directory
    #[error("Artifact missing: {path}")]
    ArtifactMissing { path: String },

    /// A snapshot stamp did not match YYYYMMDD-HHMMSS
    #[error("Invalid snapshot timestamp: {value}")]
    InvalidStamp { value: String },

    /// A set name is unusable as a directory/file component
    #[error("Invalid set name: {reason}")]
    InvalidSetName { reason: String },

    /// The tool version could not be determined
    #[error("Could not determine version of {package}")]
    VersionUnresolved { package: String },

    /// JSON encoding/decoding error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SetVaultError> for ExError {
    fn from(err: SetVaultError) -> Self {
        match err {
            SetVaultError::SetNotFound { name, version } => ExError::new(ExErrorKind::NotFound)
                .with_op("find_set")
                .with_entity_id(name)
                .with_message(format!("No set with rnbo version {}", version)),

            SetVaultError::SnapshotNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("locate_snapshot")
                .with_entity_id(path)
                .with_message("Set and/or timestamp does not exist"),

            SetVaultError::ArtifactMissing { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("read_snapshot")
                .with_entity_id(path)
                .with_message("Mandatory artifact is missing"),

            SetVaultError::InvalidStamp { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(value)
                .with_message("Snapshot timestamp must be YYYYMMDD-HHMMSS"),

            SetVaultError::InvalidSetName { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            SetVaultError::VersionUnresolved { package } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("resolve_version")
                    .with_entity_id(package)
                    .with_message("Could not determine rnbo version, pass --rnbo-version")
            }

            SetVaultError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SetVaultError {
    fn from(err: serde_json::Error) -> Self {
        SetVaultError::Serialization {
            message: err.to_string(),
        }
    }
}
