//! reaction-export library
//!
//! Walks a Zulip server's message history and flattens every emoji reaction
//! into a `(channel, sender, reactor, emoji, timestamp)` record.

pub mod api;
pub mod channels;
pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod flatten;
pub mod identity;
pub mod narrow;
pub mod paginator;
pub mod sink;

pub use api::{ChatApi, ZulipClient};
pub use channels::ChannelDirectory;
pub use config::Config;
pub use credentials::Credentials;
pub use error::{ErrorKind, ExportError, ExportResult};
pub use export::{ExportOptions, ExportSummary, Exporter, RecordOrder};
pub use flatten::{flatten, FlatRecord};
pub use identity::IdentityResolver;
pub use narrow::Narrow;
pub use paginator::{HistoryPaginator, Page, PageCursor};
pub use sink::{CsvSink, RecordSink, CSV_HEADER};
