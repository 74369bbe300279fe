use shared::{Author, AuthorId, Book, BookId, ConfigurationError, Genre, GenreId};
use tracing::debug;

pub mod dataset;

pub use dataset::{Library, LoadError};

/// One filter application's worth of criteria. `None` on `author`/`genre`
/// is the "any" selection; the title query is matched as a trimmed,
/// case-insensitive substring and an empty query matches every book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub title_query: String,
    pub author: Option<AuthorId>,
    pub genre: Option<GenreId>,
}

impl FilterCriteria {
    fn matches(&self, book: &Book) -> bool {
        let genre_match = match &self.genre {
            None => true,
            Some(genre) => book.genres.contains(genre),
        };

        let query = self.title_query.trim();
        let title_match =
            query.is_empty() || book.title.to_lowercase().contains(&query.to_lowercase());

        let author_match = match &self.author {
            None => true,
            Some(author) => book.author == *author,
        };

        genre_match && title_match && author_match
    }
}

/// Owns the immutable catalog, the author/genre lookup tables, the current
/// result set, and the pagination cursor. Every operation is synchronous;
/// the store is driven from the UI thread one event at a time.
///
/// The result set is a list of indices into the catalog, so it is always a
/// subset of the catalog in catalog order, and it is replaced wholesale on
/// every filter application rather than mutated in place.
#[derive(Debug)]
pub struct CatalogStore {
    books: Vec<Book>,
    authors: Vec<Author>,
    genres: Vec<Genre>,
    page_size: usize,
    matches: Vec<usize>,
    page: usize,
}

impl CatalogStore {
    pub fn new(
        books: Vec<Book>,
        authors: Vec<Author>,
        genres: Vec<Genre>,
        page_size: usize,
    ) -> Result<Self, ConfigurationError> {
        if page_size == 0 {
            return Err(ConfigurationError::NonPositivePageSize(page_size));
        }

        let matches = (0..books.len()).collect();
        debug!(
            books = books.len(),
            authors = authors.len(),
            genres = genres.len(),
            page_size,
            "catalog store initialized"
        );

        Ok(Self {
            books,
            authors,
            genres,
            page_size,
            matches,
            page: 1,
        })
    }

    pub fn from_library(library: Library, page_size: usize) -> Result<Self, ConfigurationError> {
        Self::new(library.books, library.authors, library.genres, page_size)
    }

    /// Recomputes the result set from the full catalog and resets the
    /// pagination cursor. An empty result is a valid outcome, not an error.
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) {
        self.matches = self
            .books
            .iter()
            .enumerate()
            .filter(|(_, book)| criteria.matches(book))
            .map(|(index, _)| index)
            .collect();
        self.page = 1;
        debug!(matches = self.matches.len(), "filter applied");
    }

    /// Everything revealed so far: result-set indices `[0, page_size * cursor)`,
    /// clipped to the result set length.
    pub fn current_page(&self) -> Vec<Book> {
        self.slice(0, self.page * self.page_size)
    }

    /// Advances the cursor and returns only the newly revealed slice, which
    /// is empty once the result set is exhausted. Callers are expected to
    /// disable further advancement via [`remaining_count`](Self::remaining_count).
    pub fn advance_page(&mut self) -> Vec<Book> {
        self.page += 1;
        self.slice((self.page - 1) * self.page_size, self.page * self.page_size)
    }

    /// Count of matches not yet revealed; floors at zero.
    pub fn remaining_count(&self) -> usize {
        self.matches.len().saturating_sub(self.page * self.page_size)
    }

    /// Looks a book up in the full catalog, not just the current result set.
    /// A miss is a defined outcome the caller treats as a no-op.
    pub fn lookup_by_id(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == *id)
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn catalog_len(&self) -> usize {
        self.books.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Authors in table order, which is also the dropdown order.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Genres in table order, which is also the dropdown order.
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn author_name(&self, id: &AuthorId) -> Option<&str> {
        self.authors
            .iter()
            .find(|author| author.id == *id)
            .map(|author| author.name.as_str())
    }

    pub fn genre_name(&self, id: &GenreId) -> Option<&str> {
        self.genres
            .iter()
            .find(|genre| genre.id == *id)
            .map(|genre| genre.name.as_str())
    }

    fn slice(&self, start: usize, end: usize) -> Vec<Book> {
        let end = end.min(self.matches.len());
        let start = start.min(end);
        self.matches[start..end]
            .iter()
            .map(|&index| self.books[index].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests;
