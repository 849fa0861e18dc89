use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet write failed: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read failed: {0}")]
    XlsxReadError(#[from] calamine::XlsxError),

    #[error("PDF read failed: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Line {line}: age '{value}' is not an integer")]
    InvalidAge { line: usize, value: String },

    #[error("Money value '{value}' cannot be parsed")]
    InvalidMoney { value: String },

    #[error("Weight value '{value}' cannot be parsed")]
    InvalidWeight { value: String },

    #[error("Document contains no valid records")]
    EmptyDataset,

    #[error("Sheet '{sheet}' has no column named '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Dashboard server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::InvalidAge { .. }
            | EtlError::InvalidMoney { .. }
            | EtlError::InvalidWeight { .. }
            | EtlError::EmptyDataset
            | EtlError::MissingColumn { .. }
            | EtlError::XlsxReadError(_)
            | EtlError::PdfError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Input,
            EtlError::IoError(_)
            | EtlError::XlsxWriteError(_)
            | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::ServerError { .. } => ErrorCategory::Network,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InvalidAge { .. } => {
                "Check that the second field of every line is a whole number"
            }
            EtlError::InvalidMoney { .. } => "Money values must look like R$1.234,56",
            EtlError::InvalidWeight { .. } => "Weight values must look like 70kg",
            EtlError::EmptyDataset => {
                "The document needs at least one line with name,age,weight,money"
            }
            EtlError::MissingColumn { .. } => {
                "Regenerate the spreadsheet with the extractor before starting the dashboard"
            }
            EtlError::PdfError(_) => "Make sure the document is a text PDF, not a scanned image",
            EtlError::XlsxReadError(_) => "Make sure the spreadsheet path points to a valid .xlsx file",
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Review the command line flags or the TOML file",
            EtlError::IoError(_) | EtlError::XlsxWriteError(_) => {
                "Check that the output directory exists and is writable"
            }
            EtlError::ServerError { .. } => "Check that the port is free and the host is valid",
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Run again with --verbose for more details"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input data problem: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Network => format!("Server problem: {}", self),
        }
    }

    /// 依嚴重程度決定行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
