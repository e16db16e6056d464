pub mod book;
pub mod category;
pub mod commands;
pub mod errors;
pub mod person;
pub mod validation;
pub mod value_objects;

pub use book::{Book, LoanState, NewBook};
pub use category::Category;
pub use errors::*;
pub use person::{NewPerson, Person, PersonField, PersonPatch};
pub use value_objects::*;
