//! Submitted form data and the fixed input schema it is validated against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use sf_shared::id_card::ID_CARD_REGEX;
use sf_shared::phone::MOBILE_PHONE_REGEX;
use sf_shared::validation::ValidationErrors;

/// Accepted values for the `gender` field
pub const GENDER_OPTIONS: [&str; 3] = ["男", "女", "其他"];

/// Open key-value map kept in insertion order
pub type ExtraData = Map<String, Value>;

/// Validated submission payload. Every field is optional; fields that are
/// present must satisfy their rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    #[validate(length(min = 2, max = 20, message = "name must be 2-20 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 1, max = 150, message = "age must be between 1 and 150"))]
    pub age: Option<i64>,

    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,

    #[validate(regex(path = *MOBILE_PHONE_REGEX, message = "phone must be an 11-digit mobile number"))]
    pub phone: Option<String>,

    #[validate(regex(path = *ID_CARD_REGEX, message = "idCard must be an 18-character identity number"))]
    pub id_card: Option<String>,

    #[validate(length(max = 200, message = "address must be at most 200 characters"))]
    pub address: Option<String>,

    pub extra_data: Option<ExtraData>,
}

impl SubmissionInput {
    /// Builds an input from a raw JSON object and validates it.
    ///
    /// Unknown keys are ignored and `null` counts as absent. Type mismatches and
    /// rule violations are all collected; the first failure does not stop the
    /// check.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut input = Self {
            name: take_string(raw, "name", &mut errors),
            age: take_integer(raw, "age", &mut errors),
            gender: take_string(raw, "gender", &mut errors),
            phone: take_string(raw, "phone", &mut errors),
            id_card: take_string(raw, "idCard", &mut errors),
            address: take_string(raw, "address", &mut errors),
            extra_data: take_object(raw, "extraData", &mut errors),
        };

        if let Err(failures) = input.validate() {
            errors.merge(collect_validator_errors(&failures));
        }
        errors.into_result()?;

        // The store compares keys case-insensitively; keep the check digit canonical.
        if let Some(id_card) = input.id_card.as_mut() {
            id_card.make_ascii_uppercase();
        }

        Ok(input)
    }

    /// The natural key when present and non-empty
    pub fn natural_key(&self) -> Option<&str> {
        self.id_card.as_deref().filter(|key| !key.is_empty())
    }
}

/// A stored submission record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub id_card: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub extra_data: ExtraData,
    pub ip_address: String,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a new record; absent fields take their defaults
    pub fn from_input(input: SubmissionInput, ip_address: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            id_card: input.id_card,
            name: input.name,
            age: input.age,
            gender: input.gender,
            phone: input.phone,
            address: input.address,
            extra_data: input.extra_data.unwrap_or_default(),
            ip_address: ip_address.into(),
            submitted_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites only the fields present in `input`, plus origin address and
    /// timestamps. Fields absent from `input` keep their stored values.
    pub fn apply_update(&mut self, input: &SubmissionInput, ip_address: &str, now: DateTime<Utc>) {
        if let Some(name) = &input.name {
            self.name = Some(name.clone());
        }
        if let Some(age) = input.age {
            self.age = Some(age);
        }
        if let Some(gender) = &input.gender {
            self.gender = Some(gender.clone());
        }
        if let Some(phone) = &input.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &input.address {
            self.address = Some(address.clone());
        }
        if let Some(extra_data) = &input.extra_data {
            self.extra_data = extra_data.clone();
        }
        if input.id_card.is_some() {
            self.id_card = input.id_card.clone();
        }
        self.ip_address = ip_address.to_string();
        self.submitted_at = now;
        self.updated_at = now;
    }
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    if GENDER_OPTIONS.contains(&gender) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("gender");
        error.message = Some("gender must be one of 男, 女, 其他".into());
        Err(error)
    }
}

fn take_string(raw: &Map<String, Value>, key: &str, errors: &mut ValidationErrors) -> Option<String> {
    match raw.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.add_error(key, format!("{} must be a string", key), "type");
            None
        }
    }
}

fn take_integer(raw: &Map<String, Value>, key: &str, errors: &mut ValidationErrors) -> Option<i64> {
    match raw.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_i64().or_else(|| whole_number(value)) {
            Some(number) => Some(number),
            None => {
                errors.add_error(key, format!("{} must be an integer", key), "type");
                None
            }
        },
    }
}

/// `30.0` or `1e2` written as a float but holding a whole value
fn whole_number(value: &Value) -> Option<i64> {
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
        .map(|number| number as i64)
}

fn take_object(raw: &Map<String, Value>, key: &str, errors: &mut ValidationErrors) -> Option<ExtraData> {
    match raw.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            errors.add_error(key, format!("{} must be an object", key), "type");
            None
        }
    }
}

/// Converts derive-generated failures to field errors keyed by wire name
fn collect_validator_errors(failures: &validator::ValidationErrors) -> ValidationErrors {
    let mut collected = ValidationErrors::new();
    let mut fields: Vec<_> = failures.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, field_errors) in fields {
        let name = wire_name(&field);
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", name));
            collected.add_error(name.clone(), message, error.code.to_string());
        }
    }
    collected
}

/// `id_card` -> `idCard`
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}
