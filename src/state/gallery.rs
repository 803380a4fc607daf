use std::collections::HashMap;

use iced::widget::image::Handle;
use tracing::{debug, info, warn};

use super::scroll_lock::{ScrollGuard, ScrollLock};
use crate::unsplash::Photo;

/// Generation number of an issued search.
///
/// Responses carrying anything but the latest ticket are stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What the gallery is currently showing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Nothing searched yet (or the query was cleared)
    #[default]
    Idle,
    /// Waiting for the API
    Loading,
    /// The last search failed; message is user-facing
    Error(String),
    /// Results of the last search, in API order
    Populated(Vec<Photo>),
}

/// Outcome of [`Gallery::search`]
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStart {
    /// Blank query: back to idle, nothing to fetch
    Reset,
    /// Caller must run the request and report back with the ticket
    Issued(SearchTicket),
}

/// Full-screen view of one result
#[derive(Debug)]
struct Preview {
    index: usize,
    /// Larger rendition, once decoded
    image: Option<Handle>,
    /// Photographer's profile picture, once decoded
    avatar: Option<Handle>,
    _scroll: ScrollGuard,
}

/// Bridges committed queries to the API and owns every view-state transition
#[derive(Debug, Default)]
pub struct Gallery {
    view: ViewState,
    /// Query the current view belongs to
    query: String,
    latest: u64,
    preview: Option<Preview>,
    scroll_lock: ScrollLock,
    /// Decoded thumbnails for the current results, by photo id
    thumbnails: HashMap<String, Handle>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Query of the current (or in-flight) search
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.view {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Current results; empty unless populated
    pub fn photos(&self) -> &[Photo] {
        match &self.view {
            ViewState::Populated(photos) => photos,
            _ => &[],
        }
    }

    /// Results counter shown next to the query, e.g. "3 resultados"
    pub fn results_label(&self) -> String {
        format!("{} resultados", self.photos().len())
    }

    /// Start a search for a committed query.
    ///
    /// Blank queries reset to idle without a request. Anything else drops the
    /// previous results and selection and moves to loading.
    pub fn search(&mut self, query: &str) -> SearchStart {
        // Any response still in flight is now stale
        self.latest += 1;
        self.preview = None;
        self.thumbnails.clear();

        if query.trim().is_empty() {
            debug!("Blank query, resetting gallery");
            self.query.clear();
            self.view = ViewState::Idle;
            return SearchStart::Reset;
        }

        self.query = query.to_string();
        self.view = ViewState::Loading;
        SearchStart::Issued(SearchTicket(self.latest))
    }

    /// Back to the idle state (same as searching for "")
    pub fn reset(&mut self) {
        self.search("");
    }

    /// Ticket of the search being waited on, if loading
    #[cfg(test)]
    pub fn pending_search(&self) -> Option<SearchTicket> {
        self.is_loading().then_some(SearchTicket(self.latest))
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply the response of a search.
    ///
    /// Returns false when the response belongs to a superseded search and was
    /// discarded.
    pub fn finish_search(&mut self, ticket: SearchTicket, outcome: Result<Vec<Photo>, String>) -> bool {
        if !self.is_current(ticket) {
            debug!("Dropping stale search response (ticket {:?})", ticket);
            return false;
        }

        self.view = match outcome {
            Ok(photos) => {
                info!("📸 {} results for '{}'", photos.len(), self.query);
                ViewState::Populated(photos)
            }
            Err(message) => {
                warn!("Search for '{}' failed: {}", self.query, message);
                ViewState::Error(message)
            }
        };
        true
    }

    /// Open the full-screen preview for a result.
    ///
    /// No-op outside the populated state or for an index past the results.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.photos().len() {
            return false;
        }

        self.preview = Some(Preview {
            index,
            image: None,
            avatar: None,
            _scroll: self.scroll_lock.acquire(),
        });
        true
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn selected(&self) -> Option<&Photo> {
        self.preview
            .as_ref()
            .and_then(|preview| self.photos().get(preview.index))
    }

    pub fn preview_image(&self) -> Option<&Handle> {
        self.preview.as_ref().and_then(|preview| preview.image.as_ref())
    }

    pub fn preview_avatar(&self) -> Option<&Handle> {
        self.preview.as_ref().and_then(|preview| preview.avatar.as_ref())
    }

    /// Attach the decoded large image if `photo_id` is still the one on screen
    pub fn set_preview_image(&mut self, photo_id: &str, handle: Handle) -> bool {
        match self.preview_of(photo_id) {
            Some(preview) => {
                preview.image = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Attach the decoded avatar if `photo_id` is still the one on screen
    pub fn set_preview_avatar(&mut self, photo_id: &str, handle: Handle) -> bool {
        match self.preview_of(photo_id) {
            Some(preview) => {
                preview.avatar = Some(handle);
                true
            }
            None => false,
        }
    }

    fn preview_of(&mut self, photo_id: &str) -> Option<&mut Preview> {
        let matches = self.selected().is_some_and(|photo| photo.id == photo_id);
        self.preview.as_mut().filter(|_| matches)
    }

    pub fn thumbnail(&self, photo_id: &str) -> Option<&Handle> {
        self.thumbnails.get(photo_id)
    }

    /// Store a decoded thumbnail, unless it belongs to an older search
    pub fn set_thumbnail(&mut self, ticket: SearchTicket, photo_id: &str, handle: Handle) -> bool {
        if !self.is_current(ticket) || !self.photos().iter().any(|photo| photo.id == photo_id) {
            return false;
        }
        self.thumbnails.insert(photo_id.to_string(), handle);
        true
    }

    /// True while the preview overlay holds the page still
    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }
}
