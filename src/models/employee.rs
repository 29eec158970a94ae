use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationError;

use crate::utils::validation::{
    validate_date_of_joining, validate_employee_email, validate_employee_id_format,
    validate_employee_id_length, validate_phone, validate_required,
};

/// A stored employee row.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date_of_joining: DateTime<Utc>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// An employee that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date_of_joining: DateTime<Utc>,
    pub role: String,
}

/// Create payload as received. Each field is kept as raw JSON so that a
/// missing or mistyped field becomes a violation instead of a body
/// rejection. Fields not listed here are ignored.
#[derive(Debug, Default)]
pub struct EmployeeInput {
    pub employee_id: Option<Value>,
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub department: Option<Value>,
    pub date_of_joining: Option<Value>,
    pub role: Option<Value>,
}

impl EmployeeInput {
    /// Splits a request body into its employee fields. Anything other than
    /// a JSON object is rejected with a single body-level violation.
    pub fn from_json(body: Value) -> Result<Self, Vec<Violation>> {
        let mut fields = match body {
            Value::Object(fields) => fields,
            other => {
                return Err(vec![Violation::new(
                    "body",
                    format!("Expected object, received {}", json_type(&other)),
                )])
            }
        };
        Ok(Self {
            employee_id: fields.remove("employeeId"),
            name: fields.remove("name"),
            email: fields.remove("email"),
            phone: fields.remove("phone"),
            department: fields.remove("department"),
            date_of_joining: fields.remove("dateOfJoining"),
            role: fields.remove("role"),
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn from_error(field: &str, err: ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.into_owned())
            .unwrap_or_else(|| err.code.into_owned());
        Self::new(field, message)
    }
}

/// Collects violations across all fields of one payload.
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    /// Extracts a string field, recording a violation when it is absent or
    /// not a string.
    fn string<'a>(&mut self, field: &str, value: &'a Option<Value>) -> Option<&'a str> {
        match value {
            None | Some(Value::Null) => {
                self.violations.push(Violation::new(field, "Required"));
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.violations.push(Violation::new(
                    field,
                    format!("Expected string, received {}", json_type(other)),
                ));
                None
            }
        }
    }

    fn check<T>(&mut self, field: &str, outcome: Result<T, ValidationError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                self.violations.push(Violation::from_error(field, err));
                None
            }
        }
    }

    fn text(
        &mut self,
        field: &str,
        value: &Option<Value>,
        rule: impl Fn(&str) -> Result<(), ValidationError>,
    ) -> Option<String> {
        let raw = self.string(field, value)?;
        self.check(field, rule(raw)).map(|_| raw.to_string())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl NewEmployee {
    /// Validates every field of `input` against the employee rules.
    ///
    /// All violations are reported together, in field order. `now` is the
    /// instant the joining date is compared against.
    pub fn parse(input: &EmployeeInput, now: DateTime<Utc>) -> Result<Self, Vec<Violation>> {
        let mut checker = Checker { violations: Vec::new() };

        let employee_id = checker
            .string("employeeId", &input.employee_id)
            .and_then(|raw| {
                // both rules run so each failure is reported
                let length = checker.check("employeeId", validate_employee_id_length(raw));
                let format = checker.check("employeeId", validate_employee_id_format(raw));
                length.and(format).map(|_| raw.to_string())
            });
        let name = checker.text("name", &input.name, |v| {
            validate_required(v, "Employee Name is required")
        });
        let email = checker.text("email", &input.email, validate_employee_email);
        let phone = checker.text("phone", &input.phone, validate_phone);
        let department = checker.text("department", &input.department, |v| {
            validate_required(v, "Department is required")
        });
        let date_of_joining = checker
            .string("dateOfJoining", &input.date_of_joining)
            .and_then(|raw| {
                checker.check("dateOfJoining", validate_date_of_joining(raw, now))
            });
        let role = checker.text("role", &input.role, |v| {
            validate_required(v, "Role is required")
        });

        match (employee_id, name, email, phone, department, date_of_joining, role) {
            (
                Some(employee_id),
                Some(name),
                Some(email),
                Some(phone),
                Some(department),
                Some(date_of_joining),
                Some(role),
            ) if checker.violations.is_empty() => Ok(Self {
                employee_id,
                name,
                email,
                phone,
                department,
                date_of_joining,
                role,
            }),
            _ => Err(checker.violations),
        }
    }
}
