//! Request validation from declarative field rules.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldShape {
    Text,
    TextList,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub shape: FieldShape,
}

impl FieldRule {
    const fn required(name: &'static str, shape: FieldShape) -> Self {
        Self { name, required: true, shape }
    }

    const fn optional(name: &'static str, shape: FieldShape) -> Self {
        Self { name, required: false, shape }
    }
}

pub const CREATE_POST_RULES: &[FieldRule] = &[
    FieldRule::required("title", FieldShape::Text),
    FieldRule::required("body", FieldShape::Text),
    FieldRule::required("tags", FieldShape::TextList),
];

pub const UPDATE_POST_RULES: &[FieldRule] = &[
    FieldRule::optional("title", FieldShape::Text),
    FieldRule::optional("body", FieldShape::Text),
    FieldRule::optional("tags", FieldShape::TextList),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check `body` against every rule, collecting all field errors. Keys without a rule are ignored.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = rules
            .iter()
            .filter_map(|rule| match body.get(rule.name) {
                None if rule.required => Some(FieldError::new(rule.name, format!("{} is required", rule.name))),
                None => None,
                Some(v) => check_shape(rule, v).err(),
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a raw JSON body and deserialize it into `T`.
    pub fn parse<T: DeserializeOwned>(body: Value, rules: &[FieldRule]) -> Result<T, AppError> {
        let map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        Self::validate(&map, rules).map_err(AppError::Validation)?;
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

fn check_shape(rule: &FieldRule, v: &Value) -> Result<(), FieldError> {
    let ok = match rule.shape {
        FieldShape::Text => v.is_string(),
        FieldShape::TextList => v
            .as_array()
            .map(|items| items.iter().all(Value::is_string))
            .unwrap_or(false),
    };
    if ok {
        return Ok(());
    }
    let expected = match rule.shape {
        FieldShape::Text => "a string",
        FieldShape::TextList => "an array of strings",
    };
    Err(FieldError::new(rule.name, format!("{} must be {}", rule.name, expected)))
}
