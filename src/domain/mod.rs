pub mod book;
pub mod commands;
pub mod errors;
pub mod events;
pub mod member;
pub mod transaction;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use value_objects::*;
