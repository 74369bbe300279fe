use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use catalog::{CatalogStore, FilterCriteria, Library};
use chrono::{DateTime, Datelike, Utc};
use clap::Parser;
use eframe::egui;
use shared::{Author, AuthorId, Book, BookId, Genre, GenreId};
use tracing::info;

mod theme;

use theme::ThemePreset;

const DEFAULT_PAGE_SIZE: usize = 8;
const NO_RESULTS_MESSAGE: &str = "No results found. Your filters might be too narrow.";

#[derive(Debug, Parser)]
#[command(
    name = "shelfside",
    about = "Browse a book catalog: filter by title, author, and genre, page through matches, inspect details"
)]
struct Args {
    /// Library JSON file; the bundled sample library is used when omitted.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Books revealed initially and per "Show more" click.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

/// The overlays are mutually exclusive by construction: opening one replaces
/// whatever was open before.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    Search,
    Settings,
    Detail(BookId),
}

/// Form state for the search overlay. `None` selections are the
/// "All Authors" / "All Genres" options.
#[derive(Debug, Clone, Default)]
struct SearchDraft {
    title_query: String,
    author: Option<AuthorId>,
    genre: Option<GenreId>,
}

impl SearchDraft {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            title_query: self.title_query.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
        }
    }
}

fn detail_subtitle(author_name: Option<&str>, published: &DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        author_name.unwrap_or("Unknown author"),
        published.year()
    )
}

fn status_text(shown: usize, matched: usize) -> String {
    format!("Showing {shown} of {matched} matching books")
}

struct BookBrowserApp {
    store: CatalogStore,

    // Previews rendered so far; grows by one page per "Show more" and is
    // rebuilt from the first page whenever a filter is applied.
    visible: Vec<Book>,

    overlay: Option<Overlay>,
    search: SearchDraft,

    theme: ThemePreset,
    theme_draft: ThemePreset,
    applied_theme: Option<ThemePreset>,

    status: String,
}

impl BookBrowserApp {
    fn new(store: CatalogStore) -> Self {
        let visible = store.current_page();
        let status = status_text(visible.len(), store.match_count());
        Self {
            store,
            visible,
            overlay: None,
            search: SearchDraft::default(),
            theme: ThemePreset::Night,
            theme_draft: ThemePreset::Night,
            applied_theme: None,
            status,
        }
    }

    fn open_overlay(&mut self, overlay: Overlay) {
        if overlay == Overlay::Settings {
            self.theme_draft = self.theme;
        }
        self.overlay = Some(overlay);
    }

    fn submit_search(&mut self) {
        self.store.apply_filter(&self.search.criteria());
        self.visible = self.store.current_page();
        self.status = status_text(self.visible.len(), self.store.match_count());
        self.overlay = None;
    }

    fn show_more(&mut self) {
        let revealed = self.store.advance_page();
        self.visible.extend(revealed);
        self.status = status_text(self.visible.len(), self.store.match_count());
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        ctx.set_visuals(theme::visuals_for_theme(self.theme));
        self.applied_theme = Some(self.theme);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut open_search = false;
        let mut open_settings = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Shelfside");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        open_settings = true;
                    }
                    if ui.button("🔍 Search").clicked() {
                        open_search = true;
                    }
                });
            });
            ui.add_space(4.0);
        });

        if open_search {
            self.open_overlay(Overlay::Search);
        }
        if open_settings {
            self.open_overlay(Overlay::Settings);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.small(&self.status);
            ui.add_space(2.0);
        });
    }

    fn show_book_list(&mut self, ctx: &egui::Context) {
        let mut clicked_book: Option<BookId> = None;
        let mut show_more_clicked = false;
        let remaining = self.store.remaining_count();
        let no_results = self.store.match_count() == 0;

        egui::CentralPanel::default().show(ctx, |ui| {
            if no_results {
                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(NO_RESULTS_MESSAGE).strong());
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for book in &self.visible {
                        let author = self
                            .store
                            .author_name(&book.author)
                            .unwrap_or("Unknown author");

                        let response = egui::Frame::group(ui.style())
                            .fill(ui.visuals().faint_bg_color)
                            .inner_margin(egui::Margin::symmetric(10, 8))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new("📖").size(28.0));
                                    ui.vertical(|ui| {
                                        ui.label(egui::RichText::new(&book.title).strong());
                                        ui.weak(author);
                                    });
                                });
                            })
                            .response
                            .interact(egui::Sense::click());

                        if response.clicked() {
                            clicked_book = Some(book.id.clone());
                        }
                    }

                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        let label = format!("Show more ({remaining} remaining)");
                        if ui
                            .add_enabled(remaining > 0, egui::Button::new(label))
                            .clicked()
                        {
                            show_more_clicked = true;
                        }
                    });
                    ui.add_space(8.0);
                });
        });

        if show_more_clicked {
            self.show_more();
        }
        if let Some(id) = clicked_book {
            self.open_overlay(Overlay::Detail(id));
        }
    }

    fn show_search_window(&mut self, ctx: &egui::Context) {
        let authors: Vec<Author> = self.store.authors().to_vec();
        let genres: Vec<Genre> = self.store.genres().to_vec();
        let mut submitted = false;
        let mut cancelled = false;

        egui::Window::new("Search")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 64.0])
            .show(ctx, |ui| {
                ui.label("Title");
                let title_response = ui.add(
                    egui::TextEdit::singleline(&mut self.search.title_query)
                        .hint_text("Search by title")
                        .desired_width(280.0),
                );

                ui.add_space(6.0);
                ui.label("Author");
                let author_label = self
                    .search
                    .author
                    .as_ref()
                    .and_then(|id| authors.iter().find(|author| author.id == *id))
                    .map(|author| author.name.clone())
                    .unwrap_or_else(|| "All Authors".to_string());
                egui::ComboBox::from_id_salt("search_author")
                    .selected_text(author_label)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.search.author, None, "All Authors");
                        for author in &authors {
                            ui.selectable_value(
                                &mut self.search.author,
                                Some(author.id.clone()),
                                &author.name,
                            );
                        }
                    });

                ui.add_space(6.0);
                ui.label("Genre");
                let genre_label = self
                    .search
                    .genre
                    .as_ref()
                    .and_then(|id| genres.iter().find(|genre| genre.id == *id))
                    .map(|genre| genre.name.clone())
                    .unwrap_or_else(|| "All Genres".to_string());
                egui::ComboBox::from_id_salt("search_genre")
                    .selected_text(genre_label)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.search.genre, None, "All Genres");
                        for genre in &genres {
                            ui.selectable_value(
                                &mut self.search.genre,
                                Some(genre.id.clone()),
                                &genre.name,
                            );
                        }
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Search").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });

                let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                if enter_pressed && title_response.has_focus() {
                    submitted = true;
                }
            });

        if submitted {
            self.submit_search();
        }
        if cancelled {
            self.overlay = None;
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut saved = false;
        let mut cancelled = false;

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 64.0])
            .show(ctx, |ui| {
                ui.label("Theme");
                egui::ComboBox::from_id_salt("settings_theme")
                    .selected_text(self.theme_draft.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.theme_draft,
                            ThemePreset::Day,
                            ThemePreset::Day.label(),
                        );
                        ui.selectable_value(
                            &mut self.theme_draft,
                            ThemePreset::Night,
                            ThemePreset::Night.label(),
                        );
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        saved = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        // The theme changes on save only, mirroring the settings form.
        if saved {
            self.theme = self.theme_draft;
            self.overlay = None;
        }
        if cancelled {
            self.theme_draft = self.theme;
            self.overlay = None;
        }
    }

    fn show_detail_window(&mut self, ctx: &egui::Context, id: &BookId) {
        let Some(book) = self.store.lookup_by_id(id).cloned() else {
            // The identifier no longer resolves; drop the overlay silently.
            self.overlay = None;
            return;
        };
        let subtitle = detail_subtitle(self.store.author_name(&book.author), &book.published);
        let mut closed = false;

        egui::Window::new("Book")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_max_width(420.0);
                ui.heading(&book.title);
                ui.label(egui::RichText::new(subtitle).weak());
                ui.add_space(6.0);
                ui.label(&book.description);
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.small("Cover:");
                    ui.hyperlink(&book.image);
                });
                ui.add_space(10.0);
                if ui.button("Close").clicked() {
                    closed = true;
                }
            });

        if closed {
            self.overlay = None;
        }
    }
}

impl eframe::App for BookBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);
        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_book_list(ctx);

        match self.overlay.clone() {
            Some(Overlay::Search) => self.show_search_window(ctx),
            Some(Overlay::Settings) => self.show_settings_window(ctx),
            Some(Overlay::Detail(id)) => self.show_detail_window(ctx, &id),
            None => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let library = match &args.library {
        Some(path) => Library::from_path(path)
            .with_context(|| format!("loading library from {}", path.display()))?,
        None => Library::bundled().context("loading bundled library")?,
    };
    let store = CatalogStore::from_library(library, args.page_size)
        .context("initializing catalog store")?;
    info!(
        books = store.catalog_len(),
        page_size = store.page_size(),
        "starting book browser"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Shelfside")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shelfside",
        options,
        Box::new(|_cc| Ok(Box::new(BookBrowserApp::new(store)))),
    )
    .map_err(|err| anyhow!("gui event loop failed: {err}"))
}
