//! The single shared form used both to create and to edit a user.

use std::fmt;

use shared::domain::User;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Age,
    Country,
}

impl FormField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            "country" => Some(Self::Country),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Country => "country",
        };
        f.write_str(label)
    }
}

/// Field values as typed by the operator.
///
/// `age` keeps its text form until submit; see [`parse_age`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub age: String,
    pub country: String,
}

impl FormValues {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            age: user.age.to_string(),
            country: user.country.clone(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Age => self.age = value,
            FormField::Country => self.country = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.age.is_empty() && self.country.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Converts the age field from its form representation to the wire integer.
pub fn parse_age(raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            input: raw.to_string(),
            reason: "age is required",
        });
    }

    let value = trimmed.parse::<i64>().map_err(|_| ValidationError {
        input: raw.to_string(),
        reason: "age must be a whole number",
    })?;

    i32::try_from(value).map_err(|_| ValidationError {
        input: raw.to_string(),
        reason: "age is out of range",
    })
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
