//! The loading step that produces the in-memory library: a JSON document
//! with author/genre lookup tables and the book records themselves.

use std::collections::HashSet;
use std::{fs, io, path::Path};

use serde::Deserialize;
use shared::{Author, Book, Genre};
use thiserror::Error;
use tracing::info;

const BUNDLED_LIBRARY_JSON: &str = include_str!("../data/library.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read library file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse library JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid library: {0}")]
    Invalid(String),
}

/// A fully loaded, referentially consistent library. Table order is
/// preserved from the document and drives dropdown ordering downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub books: Vec<Book>,
}

impl Library {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let library: Library = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let library = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            books = library.books.len(),
            "loaded library"
        );
        Ok(library)
    }

    /// The sample library compiled into the binary, used when no library
    /// path is given.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json_str(BUNDLED_LIBRARY_JSON)
    }

    /// The loader is strict even though the store itself is permissive:
    /// a book referencing an unknown author or genre would render with a
    /// blank name and can never be reached from the generated dropdowns,
    /// so it is rejected here where the document can still be fixed.
    fn validate(&self) -> Result<(), LoadError> {
        let author_ids: HashSet<_> = self.authors.iter().map(|author| &author.id).collect();
        let genre_ids: HashSet<_> = self.genres.iter().map(|genre| &genre.id).collect();

        let mut seen_books = HashSet::new();
        for book in &self.books {
            if !seen_books.insert(&book.id) {
                return Err(LoadError::Invalid(format!(
                    "duplicate book id '{}'",
                    book.id
                )));
            }
            if !author_ids.contains(&book.author) {
                return Err(LoadError::Invalid(format!(
                    "book '{}' references unknown author '{}'",
                    book.id, book.author
                )));
            }
            for genre in &book.genres {
                if !genre_ids.contains(genre) {
                    return Err(LoadError::Invalid(format!(
                        "book '{}' references unknown genre '{}'",
                        book.id, genre
                    )));
                }
            }
        }

        Ok(())
    }
}
