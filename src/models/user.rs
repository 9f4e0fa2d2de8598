use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::auth::password::{hash_password, hash_with_cost, verify_password, PASSWORD_COST};
use crate::error::AppError;
use crate::models::UserId;

/// A registered account.
///
/// `User` is never serialized outward; it has no `Serialize` impl on purpose and the
/// credential field is private. Use [`PublicUser`] for API output and
/// [`UserDocument`] for the store. Profile fields change only through
/// [`User::apply_update`], which validates and refreshes `updated_at`.
#[derive(Clone)]
pub struct User {
    /// Assigned by the store on first insert.
    pub id: Option<UserId>,
    first_name: String,
    last_name: String,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Payload for a new user registration.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Uniqueness is the store's job.
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Partial update of a user's profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(length(min = 3))]
    pub username: Option<String>,
}

/// Payload for a login attempt.
#[derive(Deserialize, Validate)]
pub struct LoginUserDto {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// The only representation of a user handed to external callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

/// Storage shape of a `User`, field names as they appear in the `users` collection.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl User {
    /// Builds a new user from a registration payload.
    ///
    /// The payload is validated before the password is hashed, and nothing is
    /// constructed unless both steps succeed.
    pub fn register(input: RegisterUserDto) -> Result<Self, AppError> {
        input.validate()?;
        let password = hash_password(&input.password)?;

        let now = Utc::now();
        log::debug!("Registered credentials for username {}", input.username);
        Ok(Self {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            username: input.username,
            password,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the stored credential with a hash of `password`.
    ///
    /// On error the previous hash is left in place.
    pub fn hash_password(&mut self, password: &str) -> Result<(), AppError> {
        self.rehash(password, PASSWORD_COST)
    }

    fn rehash(&mut self, password: &str, cost: u32) -> Result<(), AppError> {
        self.password = hash_with_cost(password, cost)?;
        self.touch();
        Ok(())
    }

    /// Applies a partial profile update and refreshes `updated_at`.
    ///
    /// Nothing changes when the patch fails validation.
    pub fn apply_update(&mut self, patch: UpdateUserDto) -> Result<(), AppError> {
        patch.validate()?;

        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        self.touch();
        Ok(())
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Compares a plaintext candidate with the stored hash.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password)
    }

    /// The stored bcrypt hash. Only the persistence layer should need this.
    pub fn password_hash(&self) -> &str {
        &self.password
    }

    pub fn public(&self) -> PublicUser {
        PublicUser::from(self)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map(ObjectId::from),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            password: user.password.clone(),
            created_at: bson::DateTime::from_chrono(user.created_at),
            updated_at: bson::DateTime::from_chrono(user.updated_at),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.map(UserId::from),
            first_name: doc.first_name,
            last_name: doc.last_name,
            username: doc.username,
            password: doc.password,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}
