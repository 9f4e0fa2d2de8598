pub mod id;
pub mod todo;
pub mod user;

pub use id::{TodoId, UserId};
pub use todo::{CreateTodoDto, Todo, TodoDocument, UpdateTodoDto};
pub use user::{LoginUserDto, PublicUser, RegisterUserDto, UpdateUserDto, User, UserDocument};
