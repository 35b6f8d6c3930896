use thiserror::Error;

/// Main error type for the Wordreel library
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Concatenation error: {0}")]
    Concat(#[from] ConcatError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Project loading and validation errors
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Project manifest not found: {path}")]
    ManifestNotFound { path: String },

    #[error("Item database not found: {path}")]
    DatabaseNotFound { path: String },

    #[error("Failed to parse project file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid color value: {value}")]
    InvalidColor { value: String },

    #[error("Invalid vocabulary item {id}: {reason}")]
    InvalidItem { id: String, reason: String },
}

/// Narration probing errors
///
/// These are handled inside the engine: a narration clip that cannot be
/// probed contributes a duration of zero instead of aborting the sequence.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Probe process failed for {path}: {reason}")]
    ProcessFailed { path: String, reason: String },

    #[error("Failed to parse probe output for {path}")]
    ParseFailed { path: String },

    #[error("No duration reported for {path}")]
    MissingDuration { path: String },
}

/// Segment rendering errors (fatal, abort the sequence)
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Segment {index} ({label}) failed to render: {reason}")]
    SegmentFailed { index: usize, label: String, reason: String },

    #[error("Invalid render request: {details}")]
    InvalidRequest { details: String },
}

/// Final concatenation errors (fatal)
#[derive(Error, Debug)]
pub enum ConcatError {
    #[error("No clips to concatenate")]
    NoClips,

    #[error("Failed to write concat manifest: {path}")]
    ManifestFailed { path: String },

    #[error("Concatenation failed: {reason}")]
    Failed { reason: String },
}

/// External media backend errors (process spawning and exit status)
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Media tool not found: {tool}")]
    NotFound { tool: String },

    #[error("Failed to spawn {tool}: {reason}")]
    SpawnFailed { tool: String, reason: String },

    #[error("{tool} exited with an error: {stderr}")]
    CommandFailed { tool: String, stderr: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using GeneratorError
pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // Probing might work once the file lands on disk
            Self::Probe(_) => true,
            // A missing tool will not appear between retries
            Self::Backend(BackendError::NotFound { .. }) => false,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Project(ProjectError::ManifestNotFound { path }) => {
                format!("'{}' does not look like a project directory (no manifest.json). Please check the path.", path)
            }
            Self::Project(ProjectError::DatabaseNotFound { path }) => {
                format!("No item database found at '{}'. The project has no vocabulary to render.", path)
            }
            Self::Backend(BackendError::NotFound { tool }) => {
                format!("'{}' was not found on this system. Please install FFmpeg and make sure it is on your PATH.", tool)
            }
            Self::Render(RenderError::SegmentFailed { index, label, .. }) => {
                format!("Rendering stopped at segment {} ({}). Run with --verbose for the backend output.", index, label)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
