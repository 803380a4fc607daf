use std::path::PathBuf;
use std::sync::Arc;

use chrono::Datelike;
use iced::widget::image::Handle;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{column, container, opaque, scrollable, stack, text, text_input};
use iced::{keyboard, task, Element, Length, Subscription, Task, Theme};
use tracing::{error, info, warn};

mod config;
mod media;
mod search;
mod state;
mod ui;
mod unsplash;

use config::Config;
use media::download;
use media::thumbnail::{self, AVATAR_SIZE, PREVIEW_SIZE, THUMBNAIL_SIZE};
use search::debounce::{self, DebouncedInput, Ticket};
use state::gallery::{Gallery, SearchStart, SearchTicket};
use unsplash::{Photo, SharedSource, UnsplashClient};

/// Main application state
struct SearchShots {
    /// Resolved configuration
    config: Config,
    /// Where searches and image bytes come from
    source: SharedSource,
    /// The search box and its debounce timer
    input: DebouncedInput,
    /// Results and view state
    gallery: Gallery,
    /// Last download confirmation, shown under the header
    status: Option<String>,
    /// The one live debounce timer, aborted when superseded
    debounce_timer: Option<task::Handle>,
    /// Results page scroll position; frozen while the preview holds the lock
    page_offset: AbsoluteOffset,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed in the search box
    QueryChanged(String),
    /// Enter or the "Buscar" button
    Submit,
    /// The clear button next to the search box
    Clear,
    /// A debounce timer ran out
    DebounceElapsed(Ticket),
    /// The API answered (or failed) for a search
    SearchFinished(SearchTicket, Result<Vec<Photo>, String>),
    /// A grid thumbnail finished downloading and decoding
    ThumbnailLoaded(SearchTicket, String, Result<Handle, String>),
    /// The results page was scrolled
    Scrolled(AbsoluteOffset),
    /// User clicked a result
    Select(usize),
    /// Back button or Escape
    ClosePreview,
    /// The large rendition for the preview is ready
    PreviewLoaded(String, Result<Handle, String>),
    /// The photographer's avatar for the preview is ready
    AvatarLoaded(String, Result<Handle, String>),
    /// Download the photo in the preview
    Download,
    /// Download finished; `None` means the save dialog was cancelled
    DownloadFinished(Result<Option<PathBuf>, String>),
    /// Open the photographer's profile page
    OpenProfile(String),
}

impl SearchShots {
    /// Create a new instance of the application
    fn new(config: Config, source: SharedSource) -> (Self, Task<Message>) {
        info!("🎨 SearchShots initialized (debounce {:?})", config.debounce);

        let app = SearchShots {
            input: DebouncedInput::new(config.debounce),
            gallery: Gallery::new(),
            status: None,
            debounce_timer: None,
            page_offset: AbsoluteOffset::default(),
            config,
            source,
        };

        (app, text_input::focus(ui::gallery::search_input_id()))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                let ticket = self.input.on_input(value);
                self.on_change();
                let (timer, handle) = Task::perform(
                    debounce::settle(ticket, self.input.delay()),
                    Message::DebounceElapsed,
                )
                .abortable();
                self.replace_timer(Some(handle));
                timer
            }
            Message::DebounceElapsed(ticket) => {
                self.debounce_timer = None;
                match self.input.elapsed(ticket) {
                    Some(query) => self.commit(query),
                    None => Task::none(),
                }
            }
            Message::Submit => {
                self.replace_timer(None);
                match self.input.submit() {
                    Some(query) => self.commit(query),
                    None => Task::none(),
                }
            }
            Message::Clear => {
                self.replace_timer(None);
                // The cleared value goes through both channels
                let cleared = self.input.clear();
                self.on_change();
                self.commit(cleared)
            }
            Message::SearchFinished(ticket, outcome) => {
                if self.gallery.finish_search(ticket, outcome) {
                    self.load_thumbnails(ticket)
                } else {
                    Task::none()
                }
            }
            Message::ThumbnailLoaded(ticket, photo_id, outcome) => {
                // Failures were logged by the loader; the tile keeps its placeholder
                if let Ok(handle) = outcome {
                    self.gallery.set_thumbnail(ticket, &photo_id, handle);
                }
                Task::none()
            }
            Message::Scrolled(offset) => {
                if !self.gallery.scroll_locked() {
                    self.page_offset = offset;
                }
                Task::none()
            }
            Message::Select(index) => {
                if !self.gallery.select(index) {
                    return Task::none();
                }
                match self.gallery.selected() {
                    Some(photo) => {
                        let image_id = photo.id.clone();
                        let avatar_id = photo.id.clone();
                        Task::batch([
                            Task::perform(
                                thumbnail::load(self.source.clone(), photo.urls.regular.clone(), PREVIEW_SIZE),
                                move |outcome| Message::PreviewLoaded(image_id.clone(), outcome),
                            ),
                            Task::perform(
                                thumbnail::load(
                                    self.source.clone(),
                                    photo.user.profile_image.medium.clone(),
                                    AVATAR_SIZE,
                                ),
                                move |outcome| Message::AvatarLoaded(avatar_id.clone(), outcome),
                            ),
                        ])
                    }
                    None => Task::none(),
                }
            }
            Message::ClosePreview => {
                if self.gallery.selected().is_none() {
                    return Task::none();
                }
                self.gallery.close_preview();
                // Put the grid back where it was when the preview opened
                scrollable::scroll_to(ui::gallery::results_scroll_id(), self.page_offset)
            }
            Message::PreviewLoaded(photo_id, outcome) => {
                if let Ok(handle) = outcome {
                    self.gallery.set_preview_image(&photo_id, handle);
                }
                Task::none()
            }
            Message::AvatarLoaded(photo_id, outcome) => {
                if let Ok(handle) = outcome {
                    self.gallery.set_preview_avatar(&photo_id, handle);
                }
                Task::none()
            }
            Message::Download => match self.gallery.selected() {
                Some(photo) => Task::perform(
                    download::download(
                        self.source.clone(),
                        photo.urls.full.clone(),
                        photo.download_stem().to_string(),
                        self.config.download_dir.clone(),
                    ),
                    |outcome| Message::DownloadFinished(outcome.map_err(|e| e.to_string())),
                ),
                None => Task::none(),
            },
            Message::DownloadFinished(outcome) => {
                match outcome {
                    Ok(Some(path)) => {
                        self.status = Some(format!("Imagem salva em {}", path.display()));
                    }
                    Ok(None) => {}
                    // Non-fatal: the gallery is left exactly as it was
                    Err(e) => error!("Erro ao baixar: {}", e),
                }
                Task::none()
            }
            Message::OpenProfile(url) => {
                if let Err(e) = open::that_detached(&url) {
                    warn!("Failed to open {}: {}", url, e);
                }
                Task::none()
            }
        }
    }

    /// Abort the running debounce timer, if any, and track `next` instead
    fn replace_timer(&mut self, next: Option<task::Handle>) {
        if let Some(previous) = std::mem::replace(&mut self.debounce_timer, next) {
            previous.abort();
        }
    }

    /// Live feedback on every keystroke: blank text puts the gallery back to idle
    fn on_change(&mut self) {
        if self.input.value().trim().is_empty() {
            self.gallery.reset();
        }
    }

    /// A committed query reached the gallery
    fn commit(&mut self, query: String) -> Task<Message> {
        self.status = None;
        match self.gallery.search(&query) {
            SearchStart::Reset => Task::none(),
            SearchStart::Issued(ticket) => Task::perform(
                search::run(self.source.clone(), query),
                move |outcome| Message::SearchFinished(ticket, outcome),
            ),
        }
    }

    /// Fetch a thumbnail for every result of the current search
    fn load_thumbnails(&self, ticket: SearchTicket) -> Task<Message> {
        Task::batch(self.gallery.photos().iter().map(|photo| {
            let photo_id = photo.id.clone();
            Task::perform(
                thumbnail::load(self.source.clone(), photo.thumbnail_url().to_string(), THUMBNAIL_SIZE),
                move |outcome| Message::ThumbnailLoaded(ticket, photo_id.clone(), outcome),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut results = column![ui::gallery::content(&self.gallery)];
        if let Some(status) = &self.status {
            results = column![container(text(status).size(14)).padding([0, 32]), results];
        }
        let results = results.push(ui::gallery::footer(chrono::Local::now().year()));

        // Always a scrollable so its state survives the preview; the opaque
        // overlay keeps wheel events from reaching it while locked
        let body = scrollable(results)
            .id(ui::gallery::results_scroll_id())
            .on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset()))
            .height(Length::Fill);

        let page: Element<'_, Message> = column![ui::gallery::header(self.input.value()), body].into();

        // The page stays the first layer either way so its widget state is kept
        let mut layers = stack![page];
        if let Some(photo) = self.gallery.selected() {
            layers = layers.push(opaque(ui::preview::overlay(
                photo,
                self.gallery.preview_image(),
                self.gallery.preview_avatar(),
            )));
        }
        layers.into()
    }

    /// Escape closes the preview
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::ClosePreview),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn configure_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("search_shots=info")),
        )
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    configure_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let source: SharedSource = match UnsplashClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("❌ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    iced::application("SearchShots", SearchShots::update, SearchShots::view)
        .subscription(SearchShots::subscription)
        .theme(SearchShots::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || SearchShots::new(config, source))
}
