use serde::{Deserialize, Serialize};
use serde_json::Value;

mod help;

pub use help::{explain, list, parse_code, ErrorHelp, ErrorHelpSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidToml,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    DictionaryNotFound,
    DictionaryMalformed,

    EntryFileMalformed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidToml => "config.invalid_toml",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::DictionaryNotFound => "dictionary.not_found",
            ErrorCode::DictionaryMalformed => "dictionary.malformed",

            ErrorCode::EntryFileMalformed => "entry_file.malformed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }

    pub fn all() -> &'static [ErrorCode] {
        &[
            ErrorCode::ConfigInvalidJson,
            ErrorCode::ConfigInvalidToml,
            ErrorCode::ConfigInvalidValue,
            ErrorCode::ValidationInvalidArgument,
            ErrorCode::DictionaryNotFound,
            ErrorCode::DictionaryMalformed,
            ErrorCode::EntryFileMalformed,
            ErrorCode::InternalIoError,
            ErrorCode::InternalJsonError,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidFileDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryNotFoundDetails {
    pub path: String,
}

/// Location of a parse failure inside an entry file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(problem) = self.details.get("problem").and_then(Value::as_str) {
            write!(f, ": {}", problem)?;
        } else if let Some(error) = self.details.get("error").and_then(Value::as_str) {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidFileDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_toml(path: impl Into<String>, err: toml::de::Error) -> Self {
        let details = to_details(ConfigInvalidFileDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidToml,
            "Invalid TOML in configuration",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn dictionary_not_found(path: impl Into<String>) -> Self {
        let details = to_details(DictionaryNotFoundDetails { path: path.into() });

        Self::new(
            ErrorCode::DictionaryNotFound,
            "Dictionary file not found",
            details,
        )
        .with_hint("Pass --dictionary <path> or set 'dictionary' in propconv.json")
    }

    pub fn dictionary_malformed(
        path: impl Into<String>,
        line: Option<usize>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(MalformedDetails {
            path: path.into(),
            line,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::DictionaryMalformed,
            "Dictionary file is malformed",
            details,
        )
    }

    pub fn entry_file_malformed(
        path: impl Into<String>,
        line: Option<usize>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(MalformedDetails {
            path: path.into(),
            line,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::EntryFileMalformed,
            "Entry file is malformed",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    /// Re-tag an entry-file parse error as a dictionary error, keeping its location.
    pub fn into_dictionary_error(self) -> Self {
        if self.code != ErrorCode::EntryFileMalformed {
            return self;
        }

        Self {
            code: ErrorCode::DictionaryMalformed,
            message: "Dictionary file is malformed".to_string(),
            ..self
        }
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
