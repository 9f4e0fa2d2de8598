use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::{TodoId, UserId};

/// Input for creating a todo.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoDto {
    /// Must not be empty.
    #[validate(length(min = 1))]
    pub title: String,
    /// Empty when omitted.
    #[serde(default)]
    pub description: String,
}

/// Partial update of a todo.
///
/// Each field is applied only when present. `Some(false)` and `Some("")` are real
/// values and overwrite the current state.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// A single task, owned by exactly one user.
///
/// Content changes only through [`Todo::apply_update`], so a stored todo always
/// has a non-empty title and a current `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Assigned by the store on first insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    user_id: UserId,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Storage shape of a `Todo` in the `todos` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Todo {
    /// Creates a new, not yet completed todo for `owner`.
    ///
    /// `owner` must come from the authenticated caller, never from the request body.
    pub fn new(input: CreateTodoDto, owner: UserId) -> Result<Self, AppError> {
        input.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            user_id: owner,
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// Nothing changes when the patch fails validation.
    pub fn apply_update(&mut self, patch: UpdateTodoDto) -> Result<(), AppError> {
        patch.validate()?;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<&Todo> for TodoDocument {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.map(ObjectId::from),
            user_id: todo.user_id.as_object_id(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: bson::DateTime::from_chrono(todo.created_at),
            updated_at: bson::DateTime::from_chrono(todo.updated_at),
        }
    }
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id.map(TodoId::from),
            user_id: UserId::from(doc.user_id),
            title: doc.title,
            description: doc.description,
            completed: doc.completed,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}
