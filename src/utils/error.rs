use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Record {record} is missing required field '{field}'")]
    MissingFieldError { record: usize, field: String },

    #[error("Record {record} field '{field}' must be {expected}")]
    FieldTypeError {
        record: usize,
        field: String,
        expected: String,
    },

    #[error("Table {operation} on '{table}' failed: {message}")]
    TableError {
        table: String,
        operation: String,
        message: String,
    },

    #[error("Object storage write to '{key}' failed: {message}")]
    StorageError { key: String, message: String },

    #[error("Batch {operation} stopped after {succeeded}/{attempted} records: {source}")]
    BatchError {
        operation: String,
        succeeded: usize,
        attempted: usize,
        #[source]
        source: Box<EtlError>,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed run.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::MissingFieldError { .. }
            | EtlError::FieldTypeError { .. }
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::TableError { .. } | EtlError::StorageError { .. } => ErrorCategory::Storage,
            EtlError::BatchError { source, .. } => source.category(),
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重跑即可
            EtlError::ApiError(_) => ErrorSeverity::Medium,
            // 半途中斷的批次會讓目標表處於不一致狀態
            EtlError::BatchError { .. } => ErrorSeverity::Critical,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(_) => {
                "Check network connectivity and that the target site is reachable, then rerun"
                    .to_string()
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide a value for '{}' via flag, config file or environment", field)
            }
            EtlError::InvalidConfigValueError { field, .. }
            | EtlError::ConfigValidationError { field, .. } => {
                format!("Correct the value of '{}' and try again", field)
            }
            EtlError::ConfigError { .. } => "Review the configuration and try again".to_string(),
            EtlError::MissingFieldError { field, .. } | EtlError::FieldTypeError { field, .. } => {
                format!(
                    "Fix the '{}' attribute in the source table; no records were written",
                    field
                )
            }
            EtlError::TableError { table, .. } => format!(
                "Verify AWS credentials, region and that table '{}' exists",
                table
            ),
            EtlError::StorageError { .. } => {
                "Verify AWS credentials and write access to the bucket".to_string()
            }
            EtlError::BatchError { .. } => {
                "The destination is partially written; rerun the full sync to restore it"
                    .to_string()
            }
            EtlError::IoError(_) => "Check file permissions and free disk space".to_string(),
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Inspect the input data for unexpected values".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch remote data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::Storage => format!("Storage operation failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
