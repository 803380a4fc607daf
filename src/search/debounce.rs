//! Debounced search input
//!
//! Turns raw keystrokes into committed queries. The input itself never owns a
//! timer: every keystroke hands back a [`Ticket`] that the caller sleeps on
//! (see [`settle`]) and reports back through [`DebouncedInput::elapsed`]. Only
//! the newest ticket can commit, so there is at most one live timer per input.

use std::time::Duration;

use crate::config::DEFAULT_DEBOUNCE;

/// Identifies one debounce timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Text field state plus the pending debounce timer
#[derive(Debug)]
pub struct DebouncedInput {
    value: String,
    delay: Duration,
    /// Last ticket handed out
    issued: u64,
    /// Ticket whose elapse may still commit
    pending: Option<Ticket>,
}

impl DebouncedInput {
    pub fn new(delay: Duration) -> Self {
        Self {
            value: String::new(),
            delay,
            issued: 0,
            pending: None,
        }
    }

    /// Current raw text, exactly as typed
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The live timer, if any
    #[cfg(test)]
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Record a keystroke.
    ///
    /// The raw value is always stored, even whitespace-only text. Any pending
    /// timer is superseded by the returned ticket.
    pub fn on_input(&mut self, value: String) -> Ticket {
        self.value = value;
        let ticket = self.next_ticket();
        self.pending = Some(ticket);
        ticket
    }

    /// A timer finished. Returns the committed query if `ticket` is still the
    /// live timer and the text is not blank.
    pub fn elapsed(&mut self, ticket: Ticket) -> Option<String> {
        if self.pending != Some(ticket) {
            return None;
        }
        self.pending = None;
        committable(&self.value)
    }

    /// Explicit submit (Enter or the search button).
    ///
    /// Commits immediately and cancels the pending timer so the same text is
    /// not searched a second time when it would have elapsed.
    pub fn submit(&mut self) -> Option<String> {
        self.pending = None;
        committable(&self.value)
    }

    /// Reset to empty and cancel the pending timer.
    ///
    /// Returns the cleared value; callers route it through both the change
    /// and the committed channels.
    pub fn clear(&mut self) -> String {
        self.value.clear();
        self.pending = None;
        // Burn a ticket so a timer from before the clear can never match
        self.next_ticket();
        self.value.clone()
    }

    fn next_ticket(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }
}

impl Default for DebouncedInput {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Text is searchable when it has something besides whitespace.
/// The text itself is passed on untrimmed.
fn committable(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Sleep for the debounce delay, then hand the ticket back
pub async fn settle(ticket: Ticket, delay: Duration) -> Ticket {
    tokio::time::sleep(delay).await;
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_input_commits_once() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("mountains".to_string());

        assert_eq!(input.elapsed(ticket), Some("mountains".to_string()));
        // A duplicate elapse of the same timer is ignored
        assert_eq!(input.elapsed(ticket), None);
        assert!(input.pending().is_none());
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let mut input = DebouncedInput::default();
        let first = input.on_input("b".to_string());
        let second = input.on_input("be".to_string());
        let third = input.on_input("beach".to_string());

        assert_eq!(input.elapsed(first), None);
        assert_eq!(input.elapsed(second), None);
        assert_eq!(input.elapsed(third), Some("beach".to_string()));
    }

    #[test]
    fn test_whitespace_never_commits() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("   ".to_string());

        assert_eq!(input.value(), "   ");
        assert_eq!(input.elapsed(ticket), None);
        assert_eq!(input.submit(), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("  red car ".to_string());

        assert_eq!(input.elapsed(ticket), Some("  red car ".to_string()));
    }

    #[test]
    fn test_submit_bypasses_timer() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("forest".to_string());

        assert_eq!(input.submit(), Some("forest".to_string()));
        // The timer that was running no longer commits
        assert_eq!(input.elapsed(ticket), None);
    }

    #[test]
    fn test_submit_without_pending_timer() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("city".to_string());
        assert_eq!(input.elapsed(ticket), Some("city".to_string()));

        assert_eq!(input.submit(), Some("city".to_string()));
    }

    #[test]
    fn test_clear_cancels_pending_timer() {
        let mut input = DebouncedInput::default();
        let ticket = input.on_input("ocean".to_string());

        assert_eq!(input.clear(), "");
        assert_eq!(input.value(), "");
        assert!(input.pending().is_none());
        assert_eq!(input.elapsed(ticket), None);
    }

    #[test]
    fn test_tickets_after_clear_are_fresh() {
        let mut input = DebouncedInput::default();
        let before = input.on_input("a".to_string());
        input.clear();
        let after = input.on_input("b".to_string());

        assert_ne!(before, after);
        assert_eq!(input.elapsed(after), Some("b".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_delay() {
        let delay = Duration::from_millis(500);
        let start = tokio::time::Instant::now();

        let mut input = DebouncedInput::new(delay);
        let ticket = input.on_input("sunset".to_string());
        let returned = settle(ticket, input.delay()).await;

        assert_eq!(returned, ticket);
        assert!(start.elapsed() >= delay);
        assert_eq!(input.elapsed(returned), Some("sunset".to_string()));
    }
}
