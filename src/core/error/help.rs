use super::{ErrorCode, Hint};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelpSummary {
    pub code: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelp {
    pub code: String,
    pub summary: String,
    pub details_schema: serde_json::Value,
    pub hints: Vec<Hint>,
}

pub fn parse_code(code: &str) -> Option<ErrorCode> {
    ErrorCode::all()
        .iter()
        .copied()
        .find(|candidate| candidate.as_str() == code)
}

pub fn list() -> Vec<ErrorHelpSummary> {
    ErrorCode::all()
        .iter()
        .copied()
        .map(|code| {
            let help = explain(code);
            ErrorHelpSummary {
                code: help.code,
                summary: help.summary,
            }
        })
        .collect()
}

fn help(code: ErrorCode, summary: &str, schema: serde_json::Value, hint: &str) -> ErrorHelp {
    ErrorHelp {
        code: code.as_str().to_string(),
        summary: summary.to_string(),
        details_schema: schema,
        hints: vec![Hint {
            message: hint.to_string(),
        }],
    }
}

pub fn explain(code: ErrorCode) -> ErrorHelp {
    match code {
        ErrorCode::ConfigInvalidJson => help(
            code,
            "Configuration JSON is invalid",
            serde_json::json!({"path":"string","error":"string"}),
            "Fix JSON syntax in the referenced config file",
        ),
        ErrorCode::ConfigInvalidToml => help(
            code,
            "Configuration TOML is invalid",
            serde_json::json!({"path":"string","error":"string"}),
            "Fix TOML syntax in the referenced config file",
        ),
        ErrorCode::ConfigInvalidValue => help(
            code,
            "Configuration value is invalid",
            serde_json::json!({"key":"string","value":"string?","problem":"string"}),
            "Correct the value in the config file or the matching CLI flag",
        ),
        ErrorCode::ValidationInvalidArgument => help(
            code,
            "Invalid CLI argument",
            serde_json::json!({"field":"string","problem":"string","id":"string?","tried":"string[]?"}),
            "Verify the argument value and try again",
        ),
        ErrorCode::DictionaryNotFound => help(
            code,
            "Replacement dictionary could not be found",
            serde_json::json!({"path":"string"}),
            "Check the dictionary path; no files are converted without it",
        ),
        ErrorCode::DictionaryMalformed => help(
            code,
            "Replacement dictionary could not be parsed",
            serde_json::json!({"path":"string","line":"number?","problem":"string"}),
            "Fix the reported line in the dictionary file",
        ),
        ErrorCode::EntryFileMalformed => help(
            code,
            "A properties file could not be parsed",
            serde_json::json!({"path":"string","line":"number?","problem":"string"}),
            "Fix the reported line; other files are still converted",
        ),
        ErrorCode::InternalIoError => help(
            code,
            "Internal IO error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Check file permissions and free disk space",
        ),
        ErrorCode::InternalJsonError => help(
            code,
            "Internal JSON error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Report as a propconv bug if persistent",
        ),
    }
}
