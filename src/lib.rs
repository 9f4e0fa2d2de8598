#![doc = "The `muchtodo` library crate."]
#![doc = ""]
#![doc = "Domain model of the MuchToDo service: users and the todos they own, the transfer"]
#![doc = "objects an API layer exchanges with callers, credential hashing, and caller identity."]
#![doc = "Routing and persistence live outside this crate; they call into the types defined here."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use error::AppError;
pub use models::{PublicUser, Todo, User};
