mod handlers;
mod types;

pub use handlers::{create_person, list_persons};
pub use types::{NewPerson, PersonResponse};

pub use handlers::{__path_create_person, __path_list_persons};
