use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlShrinkError {
    InvalidArgument(String),
    NotFound(String),
    StorageFailure(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    FileOperation(String),
    Serialization(String),
}

impl UrlShrinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UrlShrinkError::InvalidArgument(_) => "E001",
            UrlShrinkError::NotFound(_) => "E002",
            UrlShrinkError::StorageFailure(_) => "E003",
            UrlShrinkError::DatabaseConfig(_) => "E004",
            UrlShrinkError::DatabaseConnection(_) => "E005",
            UrlShrinkError::FileOperation(_) => "E006",
            UrlShrinkError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UrlShrinkError::InvalidArgument(_) => "Invalid Argument",
            UrlShrinkError::NotFound(_) => "Not Found",
            UrlShrinkError::StorageFailure(_) => "Storage Failure",
            UrlShrinkError::DatabaseConfig(_) => "Database Configuration Error",
            UrlShrinkError::DatabaseConnection(_) => "Database Connection Error",
            UrlShrinkError::FileOperation(_) => "File Operation Error",
            UrlShrinkError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UrlShrinkError::InvalidArgument(msg)
            | UrlShrinkError::NotFound(msg)
            | UrlShrinkError::StorageFailure(msg)
            | UrlShrinkError::DatabaseConfig(msg)
            | UrlShrinkError::DatabaseConnection(msg)
            | UrlShrinkError::FileOperation(msg)
            | UrlShrinkError::Serialization(msg) => msg,
        }
    }

    /// Whether the error means "no such record"; callers map this to a 404-style answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UrlShrinkError::NotFound(_))
    }

    /// 格式化为彩色输出
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UrlShrinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UrlShrinkError {}

// 便捷的构造函数
impl UrlShrinkError {
    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::InvalidArgument(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::NotFound(msg.into())
    }

    pub fn storage_failure<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::StorageFailure(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::DatabaseConnection(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UrlShrinkError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for UrlShrinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        UrlShrinkError::StorageFailure(err.to_string())
    }
}

impl From<std::io::Error> for UrlShrinkError {
    fn from(err: std::io::Error) -> Self {
        UrlShrinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UrlShrinkError {
    fn from(err: serde_json::Error) -> Self {
        UrlShrinkError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for UrlShrinkError {
    fn from(err: toml::ser::Error) -> Self {
        UrlShrinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UrlShrinkError>;
