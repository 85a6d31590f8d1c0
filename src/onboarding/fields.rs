use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

static FIELD_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]{0,63}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Boolean,
    Select,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldType::Text),
            "textarea" => Ok(FieldType::Textarea),
            "email" => Ok(FieldType::Email),
            "phone" => Ok(FieldType::Phone),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            "boolean" => Ok(FieldType::Boolean),
            "select" => Ok(FieldType::Select),
            other => Err(format!("Unknown field type: {other}")),
        }
    }
}

pub fn validate_field_key(key: &str) -> Result<(), String> {
    if FIELD_KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(format!(
            "Invalid field key '{key}': must start with a letter and contain only letters, digits and underscores"
        ))
    }
}

/// Check a field definition before it is stored.
pub fn validate_definition(
    key: &str,
    field_type: &str,
    options: Option<&Value>,
) -> Result<FieldType, String> {
    validate_field_key(key)?;
    let field_type: FieldType = field_type.parse()?;

    if field_type == FieldType::Select {
        let labels = option_values(options);
        if labels.is_empty() {
            return Err(format!(
                "Select field '{key}' needs a non-empty array of string options"
            ));
        }
    }

    Ok(field_type)
}

/// String options of a `select` field. Non-string entries are ignored.
pub fn option_values(options: Option<&Value>) -> Vec<&str> {
    options
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Validate one submitted, non-null value against its field type.
pub fn validate_value(
    key: &str,
    field_type: FieldType,
    options: Option<&Value>,
    value: &Value,
) -> Result<(), String> {
    match (field_type, value) {
        (FieldType::Text | FieldType::Textarea, Value::String(_)) => Ok(()),
        (FieldType::Email, Value::String(s)) => {
            let valid = s
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if valid {
                Ok(())
            } else {
                Err(format!("Invalid email format: {key}"))
            }
        }
        (FieldType::Phone, Value::String(s)) => {
            let allowed = s
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
            let digits = s.chars().filter(char::is_ascii_digit).count();
            if allowed && digits >= 7 {
                Ok(())
            } else {
                Err(format!("Invalid phone number: {key}"))
            }
        }
        (FieldType::Number, Value::Number(_)) => Ok(()),
        (FieldType::Number, Value::String(s)) if s.trim().parse::<f64>().is_ok() => Ok(()),
        (FieldType::Number, _) => Err(format!("Invalid number format: {key}")),
        (FieldType::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| format!("Invalid date format (expected YYYY-MM-DD): {key}")),
        (FieldType::Boolean, Value::Bool(_)) => Ok(()),
        (FieldType::Boolean, Value::String(s))
            if matches!(s.as_str(), "true" | "false" | "1" | "0" | "yes" | "no") =>
        {
            Ok(())
        }
        (FieldType::Boolean, _) => Err(format!("Invalid boolean format: {key}")),
        (FieldType::Select, Value::String(s)) => {
            if option_values(options).contains(&s.as_str()) {
                Ok(())
            } else {
                Err(format!("Value for {key} is not one of the allowed options"))
            }
        }
        (_, _) => Err(format!("Expected a {field_type} value for {key}")),
    }
}

/// Whether a stored value counts towards profile completion.
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
