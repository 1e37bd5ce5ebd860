//! Cursor-driven walk over message history, newest page first.
//!
//! The first request asks for the `page_size` newest messages, including
//! the anchor. Every following request is anchored at the oldest message of
//! the previous page with the anchor excluded, so a boundary message is never
//! returned twice. The walk ends when the server reports `found_oldest`.

use tracing::{debug, warn};

use crate::api::{Anchor, ChatApi, Message, MessageQuery};
use crate::error::ExportResult;
use crate::narrow::Narrow;

/// Position of the next history fetch.
///
/// Cursors are values: advancing returns a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    anchor: Anchor,
    include_anchor: bool,
}

impl PageCursor {
    /// Cursor for the first fetch.
    pub fn newest() -> Self {
        Self {
            anchor: Anchor::Newest,
            include_anchor: true,
        }
    }

    /// Cursor for the page strictly older than `message_id`.
    pub fn older_than(message_id: u64) -> Self {
        Self {
            anchor: Anchor::Message(message_id),
            include_anchor: false,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn include_anchor(&self) -> bool {
        self.include_anchor
    }

    /// Cursor following a page, or `None` when the page cannot move the
    /// walk strictly further back (empty, or nothing older than the anchor).
    pub fn advance(&self, page: &[Message]) -> Option<Self> {
        let oldest = page.iter().map(|m| m.id).min()?;
        match self.anchor {
            Anchor::Message(current) if oldest >= current => None,
            _ => Some(Self::older_than(oldest)),
        }
    }

    /// Request for this cursor. History is always walked towards older
    /// messages, so nothing is asked for after the anchor.
    pub fn query<'n>(&self, page_size: u32, narrow: &'n Narrow) -> MessageQuery<'n> {
        MessageQuery {
            anchor: self.anchor,
            include_anchor: self.include_anchor,
            num_before: page_size,
            num_after: 0,
            narrow,
        }
    }
}

/// A fetched page, ready for flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based position in the walk.
    pub number: usize,
    /// Cursor the page was fetched with.
    pub cursor: PageCursor,
    /// Oldest-first.
    pub messages: Vec<Message>,
    /// Whether this is the last page.
    pub found_oldest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fetching(PageCursor),
    Exhausted,
}

/// Lazy iterator over history pages.
///
/// Each call to `next` performs exactly one fetch. Empty pages are not
/// yielded; an error ends the iteration after it is returned.
pub struct HistoryPaginator<'a, A: ChatApi + ?Sized> {
    api: &'a A,
    narrow: &'a Narrow,
    page_size: u32,
    state: State,
    pages: usize,
    fetches: usize,
}

impl<'a, A: ChatApi + ?Sized> HistoryPaginator<'a, A> {
    pub fn new(api: &'a A, narrow: &'a Narrow, page_size: u32) -> Self {
        Self {
            api,
            narrow,
            page_size,
            state: State::Fetching(PageCursor::newest()),
            pages: 0,
            fetches: 0,
        }
    }

    /// Number of requests sent so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }
}

impl<A: ChatApi + ?Sized> Iterator for HistoryPaginator<'_, A> {
    type Item = ExportResult<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let State::Fetching(cursor) = self.state else {
            return None;
        };

        self.fetches += 1;
        let fetched = self
            .api
            .fetch_messages(&cursor.query(self.page_size, self.narrow));
        let mut page = match fetched {
            Ok(page) => page,
            Err(e) => {
                self.state = State::Exhausted;
                return Some(Err(e));
            }
        };
        debug!(
            anchor = %cursor.anchor(),
            include_anchor = cursor.include_anchor(),
            messages = page.messages.len(),
            found_oldest = page.found_oldest,
            "fetched history page"
        );

        self.state = if page.found_oldest {
            State::Exhausted
        } else {
            match cursor.advance(&page.messages) {
                Some(next) => State::Fetching(next),
                None if page.messages.is_empty() => {
                    warn!(
                        anchor = %cursor.anchor(),
                        "server returned an empty page without found_oldest; stopping"
                    );
                    State::Exhausted
                }
                None => {
                    warn!(
                        anchor = %cursor.anchor(),
                        "history page does not reach past its anchor; stopping"
                    );
                    State::Exhausted
                }
            }
        };

        if page.messages.is_empty() {
            return None;
        }

        page.messages.reverse();
        self.pages += 1;
        Some(Ok(Page {
            number: self.pages,
            cursor,
            messages: page.messages,
            found_oldest: page.found_oldest,
        }))
    }
}
