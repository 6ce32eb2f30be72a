use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinylinkError {
    InvalidUrl(String),
    InvalidCode(String),
    CodeInUse(String),
    DuplicateCode(String),
    NotFound(String),
    Expired(String),
    CodeSpaceExhausted(String),
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl TinylinkError {
    /// Stable error code, used in logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::InvalidUrl(_) => "E001",
            TinylinkError::InvalidCode(_) => "E002",
            TinylinkError::CodeInUse(_) => "E003",
            TinylinkError::DuplicateCode(_) => "E004",
            TinylinkError::NotFound(_) => "E005",
            TinylinkError::Expired(_) => "E006",
            TinylinkError::CodeSpaceExhausted(_) => "E007",
            TinylinkError::Config(_) => "E008",
            TinylinkError::DatabaseConfig(_) => "E009",
            TinylinkError::DatabaseConnection(_) => "E010",
            TinylinkError::DatabaseOperation(_) => "E011",
            TinylinkError::FileOperation(_) => "E012",
            TinylinkError::Serialization(_) => "E013",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::InvalidUrl(_) => "Invalid URL",
            TinylinkError::InvalidCode(_) => "Invalid Short Code",
            TinylinkError::CodeInUse(_) => "Short Code In Use",
            TinylinkError::DuplicateCode(_) => "Duplicate Short Code",
            TinylinkError::NotFound(_) => "Not Found",
            TinylinkError::Expired(_) => "Link Expired",
            TinylinkError::CodeSpaceExhausted(_) => "Code Generation Failed",
            TinylinkError::Config(_) => "Configuration Error",
            TinylinkError::DatabaseConfig(_) => "Database Configuration Error",
            TinylinkError::DatabaseConnection(_) => "Database Connection Error",
            TinylinkError::DatabaseOperation(_) => "Database Operation Error",
            TinylinkError::FileOperation(_) => "File Operation Error",
            TinylinkError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TinylinkError::InvalidUrl(msg)
            | TinylinkError::InvalidCode(msg)
            | TinylinkError::CodeInUse(msg)
            | TinylinkError::DuplicateCode(msg)
            | TinylinkError::NotFound(msg)
            | TinylinkError::Expired(msg)
            | TinylinkError::CodeSpaceExhausted(msg)
            | TinylinkError::Config(msg)
            | TinylinkError::DatabaseConfig(msg)
            | TinylinkError::DatabaseConnection(msg)
            | TinylinkError::DatabaseOperation(msg)
            | TinylinkError::FileOperation(msg)
            | TinylinkError::Serialization(msg) => msg,
        }
    }

    /// HTTP status the API boundary answers with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            TinylinkError::InvalidUrl(_)
            | TinylinkError::InvalidCode(_)
            | TinylinkError::CodeInUse(_) => StatusCode::BAD_REQUEST,
            TinylinkError::DuplicateCode(_) => StatusCode::CONFLICT,
            TinylinkError::NotFound(_) => StatusCode::NOT_FOUND,
            TinylinkError::Expired(_) => StatusCode::GONE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the message may be shown to API clients as-is
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

impl TinylinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        TinylinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        TinylinkError::InvalidCode(msg.into())
    }

    pub fn code_in_use<T: Into<String>>(msg: T) -> Self {
        TinylinkError::CodeInUse(msg.into())
    }

    pub fn duplicate_code<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DuplicateCode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Expired(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        TinylinkError::CodeSpaceExhausted(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for TinylinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        TinylinkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TinylinkError {
    fn from(err: std::io::Error) -> Self {
        TinylinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TinylinkError::invalid_url("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TinylinkError::invalid_code("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TinylinkError::code_in_use("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TinylinkError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(TinylinkError::expired("x").http_status(), StatusCode::GONE);
        assert_eq!(
            TinylinkError::code_space_exhausted("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TinylinkError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_are_not_client_errors() {
        assert!(TinylinkError::invalid_url("x").is_client_error());
        assert!(!TinylinkError::database_connection("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = TinylinkError::code_in_use("Custom code already in use");
        assert_eq!(err.code(), "E003");
        assert_eq!(
            err.to_string(),
            "Short Code In Use: Custom code already in use"
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: TinylinkError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, TinylinkError::DatabaseOperation(_)));
        assert!(err.message().contains("boom"));
    }
}
