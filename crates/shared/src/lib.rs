pub mod domain;
pub mod error;

pub use domain::{Author, AuthorId, Book, BookId, Genre, GenreId};
pub use error::ConfigurationError;
