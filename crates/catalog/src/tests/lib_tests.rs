use chrono::{TimeZone, Utc};
use shared::{Author, AuthorId, Book, BookId, ConfigurationError, Genre, GenreId};

use crate::{CatalogStore, FilterCriteria};

fn book(id: &str, title: &str, author: &str, genres: &[&str]) -> Book {
    Book {
        id: BookId::new(id),
        title: title.to_string(),
        author: AuthorId::new(author),
        image: format!("https://covers.test/{id}.jpg"),
        description: format!("Description of {title}"),
        published: Utc.with_ymd_and_hms(1850, 1, 1, 0, 0, 0).unwrap(),
        genres: genres.iter().map(|genre| GenreId::new(*genre)).collect(),
    }
}

fn tables() -> (Vec<Author>, Vec<Genre>) {
    let authors = vec![
        Author {
            id: AuthorId::new("austen"),
            name: "Jane Austen".to_string(),
        },
        Author {
            id: AuthorId::new("dickens"),
            name: "Charles Dickens".to_string(),
        },
    ];
    let genres = vec![
        Genre {
            id: GenreId::new("romance"),
            name: "Romance".to_string(),
        },
        Genre {
            id: GenreId::new("historical"),
            name: "Historical Fiction".to_string(),
        },
    ];
    (authors, genres)
}

/// 25 numbered books alternating between the two authors, all historical.
fn numbered_store(page_size: usize) -> CatalogStore {
    let books = (1..=25)
        .map(|n| {
            let author = if n % 2 == 0 { "austen" } else { "dickens" };
            book(&format!("book-{n}"), &format!("Book {n}"), author, &["historical"])
        })
        .collect();
    let (authors, genres) = tables();
    CatalogStore::new(books, authors, genres, page_size).expect("valid page size")
}

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

#[test]
fn rejects_zero_page_size() {
    let (authors, genres) = tables();
    let err = CatalogStore::new(Vec::new(), authors, genres, 0).unwrap_err();
    assert_eq!(err, ConfigurationError::NonPositivePageSize(0));
}

#[test]
fn store_state_is_debug_formattable() {
    let store = numbered_store(10);
    let rendered = format!("{store:?}");
    assert!(rendered.contains("CatalogStore"));
    assert!(rendered.contains("page_size"));
}

#[test]
fn starts_with_full_catalog_and_first_page() {
    let store = numbered_store(10);
    assert_eq!(store.match_count(), 25);
    assert_eq!(store.catalog_len(), 25);

    let page = store.current_page();
    assert_eq!(page.len(), 10);
    assert_eq!(page[0].title, "Book 1");
    assert_eq!(page[9].title, "Book 10");
    assert_eq!(store.remaining_count(), 15);
}

#[test]
fn default_criteria_match_everything_in_catalog_order() {
    let mut store = numbered_store(10);
    store.apply_filter(&FilterCriteria::default());

    let page = store.current_page();
    assert_eq!(
        titles(&page),
        (1..=10).map(|n| format!("Book {n}")).collect::<Vec<_>>()
    );
}

#[test]
fn walks_25_books_in_pages_of_10() {
    let mut store = numbered_store(10);
    store.apply_filter(&FilterCriteria::default());

    assert_eq!(store.current_page().len(), 10);
    assert_eq!(store.remaining_count(), 15);

    let second = store.advance_page();
    assert_eq!(second.len(), 10);
    assert_eq!(second[0].title, "Book 11");
    assert_eq!(store.remaining_count(), 5);

    let third = store.advance_page();
    assert_eq!(third.len(), 5);
    assert_eq!(third[4].title, "Book 25");
    assert_eq!(store.remaining_count(), 0);

    // Over-advancing is harmless: empty slice, count stays at zero.
    assert!(store.advance_page().is_empty());
    assert_eq!(store.remaining_count(), 0);
}

#[test]
fn current_page_grows_with_each_advancement() {
    let mut store = numbered_store(10);
    assert_eq!(store.current_page().len(), 10);
    store.advance_page();
    assert_eq!(store.current_page().len(), 20);
    store.advance_page();
    assert_eq!(store.current_page().len(), 25);
}

#[test]
fn remaining_count_is_monotonically_non_increasing() {
    let mut store = numbered_store(7);
    let mut previous = store.remaining_count();
    for _ in 0..6 {
        store.advance_page();
        let current = store.remaining_count();
        assert!(current <= previous);
        previous = current;
    }
    assert_eq!(previous, 0);
}

#[test]
fn author_filter_includes_and_excludes() {
    let mut store = numbered_store(10);

    // book-2 belongs to austen; filtering by austen includes it.
    store.apply_filter(&FilterCriteria {
        author: Some(AuthorId::new("austen")),
        ..Default::default()
    });
    assert!(store
        .current_page()
        .iter()
        .any(|book| book.id == BookId::new("book-2")));
    assert_eq!(store.match_count(), 12);

    // Filtering by the other author excludes it.
    store.apply_filter(&FilterCriteria {
        author: Some(AuthorId::new("dickens")),
        ..Default::default()
    });
    assert!(store
        .lookup_by_id(&BookId::new("book-2"))
        .is_some());
    assert!(!store
        .current_page()
        .iter()
        .any(|book| book.id == BookId::new("book-2")));
    assert_eq!(store.match_count(), 13);
}

#[test]
fn apply_filter_is_idempotent_and_resets_the_cursor() {
    let mut store = numbered_store(10);
    let criteria = FilterCriteria {
        author: Some(AuthorId::new("austen")),
        ..Default::default()
    };

    store.apply_filter(&criteria);
    let first_run = store.current_page();
    store.advance_page();
    assert_ne!(store.remaining_count(), store.match_count());

    store.apply_filter(&criteria);
    assert_eq!(store.current_page(), first_run);
    assert_eq!(
        store.remaining_count(),
        store.match_count().saturating_sub(store.page_size())
    );
}

#[test]
fn title_query_is_a_case_insensitive_substring_match() {
    let (authors, genres) = tables();
    let books = vec![
        book("b1", "Pride and Prejudice", "austen", &["romance"]),
        book("b2", "Great Expectations", "dickens", &["historical"]),
        book("b3", "The Pride of the Valley", "dickens", &["historical"]),
        book("b4", "Emma", "austen", &["romance"]),
    ];
    let mut store = CatalogStore::new(books, authors, genres, 10).unwrap();

    store.apply_filter(&FilterCriteria {
        title_query: "pRiDe".to_string(),
        ..Default::default()
    });
    assert_eq!(
        titles(&store.current_page()),
        vec!["Pride and Prejudice", "The Pride of the Valley"]
    );
}

#[test]
fn title_query_trims_outer_whitespace_only() {
    let (authors, genres) = tables();
    let books = vec![
        book("b1", "Moby-Dick", "dickens", &["historical"]),
        book("b2", "Moby  Dick", "dickens", &["historical"]),
    ];
    let mut store = CatalogStore::new(books, authors, genres, 10).unwrap();

    store.apply_filter(&FilterCriteria {
        title_query: "  moby-dick  ".to_string(),
        ..Default::default()
    });
    assert_eq!(titles(&store.current_page()), vec!["Moby-Dick"]);

    // Internal whitespace in the query is significant.
    store.apply_filter(&FilterCriteria {
        title_query: "moby  dick".to_string(),
        ..Default::default()
    });
    assert_eq!(titles(&store.current_page()), vec!["Moby  Dick"]);

    // A whitespace-only query matches every book.
    store.apply_filter(&FilterCriteria {
        title_query: "   ".to_string(),
        ..Default::default()
    });
    assert_eq!(store.match_count(), 2);
}

#[test]
fn genre_filter_matches_any_element_of_the_book_genre_list() {
    let (authors, genres) = tables();
    let books = vec![
        book("b1", "Jane Eyre", "austen", &["romance", "historical"]),
        book("b2", "Emma", "austen", &["romance", "romance"]),
        book("b3", "A Tale of Two Cities", "dickens", &["historical"]),
    ];
    let mut store = CatalogStore::new(books, authors, genres, 10).unwrap();

    store.apply_filter(&FilterCriteria {
        genre: Some(GenreId::new("romance")),
        ..Default::default()
    });
    assert_eq!(titles(&store.current_page()), vec!["Jane Eyre", "Emma"]);

    store.apply_filter(&FilterCriteria {
        genre: Some(GenreId::new("historical")),
        ..Default::default()
    });
    assert_eq!(
        titles(&store.current_page()),
        vec!["Jane Eyre", "A Tale of Two Cities"]
    );
}

#[test]
fn unmatched_genre_yields_a_valid_empty_result() {
    let mut store = numbered_store(10);
    store.apply_filter(&FilterCriteria {
        genre: Some(GenreId::new("romance")),
        ..Default::default()
    });

    assert_eq!(store.match_count(), 0);
    assert!(store.current_page().is_empty());
    assert_eq!(store.remaining_count(), 0);
    assert!(store.advance_page().is_empty());
}

#[test]
fn unknown_author_id_matches_nothing() {
    let mut store = numbered_store(10);
    store.apply_filter(&FilterCriteria {
        author: Some(AuthorId::new("nobody")),
        ..Default::default()
    });
    assert_eq!(store.match_count(), 0);
}

#[test]
fn combined_criteria_are_and_composed() {
    let (authors, genres) = tables();
    let books = vec![
        book("b1", "Pride and Prejudice", "austen", &["romance"]),
        book("b2", "Pride of Place", "dickens", &["historical"]),
        book("b3", "Persuasion", "austen", &["romance"]),
    ];
    let mut store = CatalogStore::new(books, authors, genres, 10).unwrap();

    store.apply_filter(&FilterCriteria {
        title_query: "pride".to_string(),
        author: Some(AuthorId::new("austen")),
        genre: Some(GenreId::new("romance")),
    });
    assert_eq!(titles(&store.current_page()), vec!["Pride and Prejudice"]);
}

#[test]
fn lookup_by_id_searches_the_full_catalog() {
    let mut store = numbered_store(10);

    // Filter down to nothing; lookup still sees the whole catalog.
    store.apply_filter(&FilterCriteria {
        author: Some(AuthorId::new("nobody")),
        ..Default::default()
    });
    let found = store.lookup_by_id(&BookId::new("book-17")).unwrap();
    assert_eq!(found.title, "Book 17");

    assert!(store.lookup_by_id(&BookId::new("missing")).is_none());
}

#[test]
fn name_tables_resolve_known_ids_only() {
    let store = numbered_store(10);
    assert_eq!(store.author_name(&AuthorId::new("austen")), Some("Jane Austen"));
    assert_eq!(store.genre_name(&GenreId::new("historical")), Some("Historical Fiction"));
    assert_eq!(store.author_name(&AuthorId::new("nobody")), None);
    assert_eq!(store.genre_name(&GenreId::new("unknown")), None);
}
