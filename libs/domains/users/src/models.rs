use chrono::{DateTime, SecondsFormat, Utc};
use resource::{Resource, ResourceError, ResourceResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::entity;
use crate::password::hash_password;

const NAME_EMPTY: &str = "name must not be empty";
const EMAIL_EMPTY: &str = "email must not be empty";
const EMAIL_INVALID: &str = "email must be a valid email address";
const PASSWORD_EMPTY: &str = "password must not be empty";

fn name_violation(name: &str) -> Option<&'static str> {
    name.trim().is_empty().then_some(NAME_EMPTY)
}

fn email_violation(email: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.is_empty() {
        Some(EMAIL_EMPTY)
    } else if !email.validate_email() {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

fn as_validation_error(field: &'static str, violation: Option<&'static str>) -> Result<(), ValidationError> {
    match violation {
        Some(message) => Err(ValidationError::new(field).with_message(Cow::Borrowed(message))),
        None => Ok(()),
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    as_validation_error("name", name_violation(name))
}

fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    as_validation_error("email", email_violation(email))
}

/// Validated user
///
/// Only the Argon2 hash of the password is held. `name` and `email` are
/// kept trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// `0` until persisted
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    fn check(self, password: Option<&str>) -> ResourceResult<Self> {
        let violations: Vec<String> = [
            name_violation(&self.name),
            email_violation(&self.email),
            password.filter(|p| p.is_empty()).map(|_| PASSWORD_EMPTY),
        ]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(ResourceError::Validation(violations))
        }
    }

    fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }

    fn with_password(mut self, password: Option<&str>) -> ResourceResult<Self> {
        if let Some(password) = password {
            self.password_hash = hash_password(password)?;
        }
        Ok(self)
    }
}

/// DTO for creating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Unique across users
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// DTO for replacing a user (PUT)
///
/// `password` is optional; it is only replaced when a non-empty value is
/// given.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// DTO for changing some fields of a user (PATCH)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchUser {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_email_address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: Option<String>,
}

/// User as returned by the API; never carries the password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// RFC 3339, millisecond precision, UTC
    #[schema(example = "2025-01-04T10:15:30.123Z")]
    pub created_at: String,
}

impl Resource for User {
    type Record = entity::Model;
    type Create = CreateUser;
    type Update = UpdateUser;
    type Patch = PatchUser;
    type View = UserView;

    const KIND: &'static str = "User";
    const UNIQUE_FIELD: &'static str = "email";

    fn unique_key_of(input: &CreateUser) -> String {
        input.email.trim().to_string()
    }

    fn from_creation_input(input: CreateUser) -> ResourceResult<Self> {
        User {
            id: 0,
            name: input.name,
            email: input.email,
            password_hash: String::new(),
            created_at: Utc::now(),
        }
        .check(Some(&input.password))?
        .normalized()
        .with_password(Some(&input.password))
    }

    fn from_stored_record(record: entity::Model) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            created_at: record.created_at.into(),
        }
    }

    fn to_stored_record(&self) -> entity::Model {
        entity::Model {
            id: self.id.max(0),
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            created_at: self.created_at.into(),
        }
    }

    fn to_public(&self) -> UserView {
        UserView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn apply_full_update(self, input: UpdateUser) -> ResourceResult<Self> {
        let password = input.password.as_deref().filter(|p| !p.is_empty());

        User {
            name: input.name,
            email: input.email,
            ..self
        }
        .check(None)?
        .normalized()
        .with_password(password)
    }

    fn apply_partial_update(self, input: PatchUser) -> ResourceResult<Self> {
        let password = input.password.as_deref();

        User {
            name: input.name.unwrap_or(self.name),
            email: input.email.unwrap_or(self.email),
            ..self
        }
        .check(password)?
        .normalized()
        .with_password(password)
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn unique_key(&self) -> &str {
        &self.email
    }
}
