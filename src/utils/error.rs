use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid argument `{field}`: {message}")]
    InvalidArgument { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input stream closed")]
    InputClosed,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl RosterError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        RosterError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 給互動介面顯示用的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::InvalidArgument { message, .. } => message.clone(),
            RosterError::IoError(e) => format!("读写失败: {}", e),
            RosterError::InputClosed => "输入已结束".to_string(),
            RosterError::ConfigError { message } => format!("配置错误: {}", message),
            RosterError::ConfigValidationError { field, message } => {
                format!("配置项 {} 无效: {}", field, message)
            }
            RosterError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置项 {} 无效: {}", field, reason)
            }
        }
    }
}

/// 名冊操作的軟性失敗：呼叫端必須檢查，但不屬於異常流程
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("student id `{0}` already exists")]
    DuplicateId(String),

    #[error("no student with id `{0}`")]
    NotFound(String),

    #[error("student id `{0}` is already used by another student")]
    IdTaken(String),

    #[error("no scores recorded for course `{0}`")]
    UnknownCourse(String),

    #[error("course name is empty")]
    EmptyCourseName,

    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),

    #[error("unknown search field `{0}`")]
    UnknownSearchField(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
