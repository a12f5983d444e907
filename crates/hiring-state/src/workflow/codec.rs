//! JSON is the agreed wire and storage format for workflow-state documents.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::domain::{CandidateInterview, InterviewRound, ScreeningResult, State};
use super::validation::{field_path, index_path, Conform, SchemaViolation};
use crate::error::AppError;

/// A record that travels on the wire on its own or nested inside a `State`.
pub trait Record: DeserializeOwned + Serialize + Conform {
    /// Re-decode `value` one nested record at a time so a missing field or unknown literal is
    /// reported at its full path. `None` when nothing path-bearing is wrong.
    fn locate(value: &Value, path: &str) -> Option<SchemaViolation> {
        scoped::<Self>(value, path)
    }
}

impl Record for ScreeningResult {}

impl Record for InterviewRound {}

impl Record for CandidateInterview {
    fn locate(value: &Value, path: &str) -> Option<SchemaViolation> {
        elements(value, "history")
            .find_map(|(index, round)| {
                InterviewRound::locate(round, &index_path(path, "history", index))
            })
            .or_else(|| scoped::<Self>(value, path))
    }
}

impl Record for State {
    fn locate(value: &Value, path: &str) -> Option<SchemaViolation> {
        elements(value, "screening_results")
            .find_map(|(index, result)| {
                ScreeningResult::locate(result, &index_path(path, "screening_results", index))
            })
            .or_else(|| {
                elements(value, "interviews").find_map(|(index, interview)| {
                    CandidateInterview::locate(interview, &index_path(path, "interviews", index))
                })
            })
            .or_else(|| scoped::<Self>(value, path))
    }
}

/// Decode any record, then run structural conformance. A failure rejects the whole document.
pub fn decode<T: Record>(raw: &str) -> Result<T, SchemaViolation> {
    let value: T = serde_json::from_str(raw).map_err(|err| reject::<T>(raw, err))?;
    value.conform()?;
    Ok(value)
}

/// Encoding refuses non-conforming values; serde_json would otherwise write a NaN score as `null`.
pub fn encode<T: Record>(value: &T) -> Result<String, SchemaViolation> {
    value.conform()?;
    serde_json::to_string(value).map_err(unencodable)
}

pub fn encode_pretty<T: Record>(value: &T) -> Result<String, SchemaViolation> {
    value.conform()?;
    serde_json::to_string_pretty(value).map_err(unencodable)
}

pub fn decode_state(raw: &str) -> Result<State, SchemaViolation> {
    decode(raw)
}

pub fn encode_state(state: &State) -> Result<String, SchemaViolation> {
    encode(state)
}

pub fn encode_state_pretty(state: &State) -> Result<String, SchemaViolation> {
    encode_pretty(state)
}

pub fn read_state(path: impl AsRef<Path>) -> Result<State, AppError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let state = decode_state(&raw)?;
    debug!(path = %path.display(), job_id = %state.job_id, "loaded workflow state");
    Ok(state)
}

pub fn write_state(path: impl AsRef<Path>, state: &State) -> Result<(), AppError> {
    let path = path.as_ref();
    let encoded = encode_state_pretty(state)?;
    fs::write(path, encoded)?;
    debug!(path = %path.display(), job_id = %state.job_id, "wrote workflow state");
    Ok(())
}

/// What went wrong inside serde, with its position suffix removed.
enum Fault {
    MissingField(String),
    UnknownVariant { value: String, expected: String },
    Other(String),
}

fn fault(err: &serde_json::Error) -> Fault {
    let rendered = err.to_string();
    let position = format!(" at line {} column {}", err.line(), err.column());
    let message = rendered
        .strip_suffix(position.as_str())
        .unwrap_or(&rendered)
        .to_string();

    if let Some(field) = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        return Fault::MissingField(field.to_string());
    }

    if let Some((value, tail)) = message
        .strip_prefix("unknown variant `")
        .and_then(|rest| rest.split_once('`'))
    {
        let expected = tail
            .split_once("expected ")
            .map(|(_, expected)| expected.trim_start_matches("one of "))
            .unwrap_or_default()
            .replace('`', "");
        return Fault::UnknownVariant {
            value: value.to_string(),
            expected,
        };
    }

    Fault::Other(message)
}

/// Missing fields and unknown literals get their full path; everything else keeps serde's
/// wording and position as `Malformed`.
fn reject<T: Record>(raw: &str, err: serde_json::Error) -> SchemaViolation {
    let (line, column) = (err.line(), err.column());
    let message = match fault(&err) {
        Fault::Other(message) => {
            return SchemaViolation::Malformed {
                line,
                column,
                message,
            }
        }
        Fault::MissingField(field) => format!("missing field `{field}`"),
        Fault::UnknownVariant { value, .. } => format!("unknown variant `{value}`"),
    };

    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|value| T::locate(&value, ""))
        .unwrap_or(SchemaViolation::Malformed {
            line,
            column,
            message,
        })
}

fn scoped<T: DeserializeOwned>(value: &Value, path: &str) -> Option<SchemaViolation> {
    let err = T::deserialize(value).err()?;
    match fault(&err) {
        Fault::MissingField(field) => Some(SchemaViolation::MissingField {
            path: field_path(path, &field),
        }),
        Fault::UnknownVariant {
            value: literal,
            expected,
        } => {
            let (key, _) = value
                .as_object()?
                .iter()
                .find(|(_, entry)| entry.as_str() == Some(literal.as_str()))?;
            Some(SchemaViolation::InvalidLiteral {
                path: field_path(path, key),
                value: literal,
                expected,
            })
        }
        Fault::Other(_) => None,
    }
}

fn elements<'a>(value: &'a Value, field: &str) -> impl Iterator<Item = (usize, &'a Value)> {
    value
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
}

fn unencodable(err: serde_json::Error) -> SchemaViolation {
    SchemaViolation::Malformed {
        line: 0,
        column: 0,
        message: err.to_string(),
    }
}
