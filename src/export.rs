//! End-to-end export run: directory, pagination, flattening, output.
//!
//! History is fetched newest page first, while each page is flattened
//! oldest message first. How pages reach the sink depends on
//! [`RecordOrder`]:
//!
//! - `Chronological` holds flattened pages back and writes them oldest page
//!   first once the walk is complete, so the whole output is ascending.
//! - `PageStream` writes and flushes each page as soon as it is flattened.
//!   Output is ascending within a page; pages appear newest first.
//!
//! In both modes a page is fully flattened (and its reactors resolved)
//! before the next page is requested. When a run fails, held pages are
//! still written, oldest first, before the error is returned.

use std::io::Write;
use tracing::info;

use crate::api::ChatApi;
use crate::channels::ChannelDirectory;
use crate::config::validate_chunk_size;
use crate::error::{ExportError, ExportResult};
use crate::flatten::{flatten, FlatRecord};
use crate::identity::IdentityResolver;
use crate::narrow::Narrow;
use crate::paginator::HistoryPaginator;
use crate::sink::RecordSink;

/// Order in which flattened pages are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordOrder {
    /// Oldest record first across the whole run.
    #[default]
    Chronological,
    /// Each page as soon as it is fetched.
    PageStream,
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub narrow: Narrow,
    /// Messages per history fetch.
    pub page_size: u32,
    /// Write the header line before any record.
    pub header: bool,
    /// Load subscribed channels into the directory as well as public ones.
    pub include_subscribed: bool,
    pub order: RecordOrder,
    /// Dump every fetched page to the diagnostics stream.
    pub verbose: bool,
}

impl ExportOptions {
    pub fn validate(&self) -> ExportResult<()> {
        validate_chunk_size(self.page_size).map_err(ExportError::Config)
    }
}

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// History requests sent, including a final empty one.
    pub fetches: usize,
    /// Non-empty pages processed.
    pub pages: usize,
    pub messages: usize,
    pub records: usize,
    /// Distinct reactors looked up.
    pub users: usize,
}

/// Runs the export against a chat server.
pub struct Exporter<'a, A: ChatApi + ?Sized> {
    api: &'a A,
    options: ExportOptions,
}

impl<'a, A: ChatApi + ?Sized> Exporter<'a, A> {
    pub fn new(api: &'a A, options: ExportOptions) -> Self {
        Self { api, options }
    }

    /// Write every reaction matching the narrow into `sink`.
    ///
    /// Progress lines go to `diagnostics`, one per history fetch. On failure,
    /// every fully flattened page ends up in `sink` before the error is
    /// returned; nothing is rolled back.
    pub fn run<S, D>(&self, sink: &mut S, diagnostics: &mut D) -> ExportResult<ExportSummary>
    where
        S: RecordSink + ?Sized,
        D: Write + ?Sized,
    {
        self.options.validate()?;

        let channels = ChannelDirectory::load(self.api, self.options.include_subscribed)?;
        let mut identities = IdentityResolver::new(self.api);

        if self.options.header {
            sink.write_header()?;
            sink.flush()?;
        }

        let mut summary = ExportSummary::default();
        let mut held: Vec<Vec<FlatRecord>> = Vec::new();
        let mut paginator =
            HistoryPaginator::new(self.api, &self.options.narrow, self.options.page_size);

        let walked = self.walk(
            &mut paginator,
            &channels,
            &mut identities,
            sink,
            diagnostics,
            &mut held,
            &mut summary,
        );
        let drained = held
            .iter()
            .rev()
            .try_for_each(|records| write_page(sink, records));
        walked?;
        drained?;

        summary.fetches = paginator.fetches();
        summary.users = identities.resolved_count();
        info!(
            fetches = summary.fetches,
            pages = summary.pages,
            messages = summary.messages,
            records = summary.records,
            users = summary.users,
            "export finished"
        );
        Ok(summary)
    }

    /// Consume the paginator, flattening every page. Pages are written to
    /// `sink` or pushed onto `held` depending on the record order.
    #[allow(clippy::too_many_arguments)]
    fn walk<S, D>(
        &self,
        paginator: &mut HistoryPaginator<'_, A>,
        channels: &ChannelDirectory,
        identities: &mut IdentityResolver<'_, A>,
        sink: &mut S,
        diagnostics: &mut D,
        held: &mut Vec<Vec<FlatRecord>>,
        summary: &mut ExportSummary,
    ) -> ExportResult<()>
    where
        S: RecordSink + ?Sized,
        D: Write + ?Sized,
    {
        for page in paginator.by_ref() {
            let page = page?;
            if self.options.verbose {
                writeln!(diagnostics, "{:#?}", page)?;
                writeln!(diagnostics, "{}", page.messages.len())?;
            }

            let mut records = Vec::new();
            for message in &page.messages {
                records.extend(flatten(message, channels, identities)?);
            }
            summary.records += records.len();

            match self.options.order {
                RecordOrder::PageStream => write_page(sink, &records)?,
                RecordOrder::Chronological => held.push(records),
            }

            summary.pages += 1;
            summary.messages += page.messages.len();
            report_progress(diagnostics, summary.messages)?;
        }

        // The closing fetch came back empty and was not yielded as a page
        if paginator.fetches() > summary.pages {
            report_progress(diagnostics, summary.messages)?;
        }
        Ok(())
    }
}

fn report_progress<D: Write + ?Sized>(diagnostics: &mut D, messages: usize) -> ExportResult<()> {
    writeln!(diagnostics, "Processed {} messages so far", messages)?;
    Ok(())
}

fn write_page<S: RecordSink + ?Sized>(sink: &mut S, records: &[FlatRecord]) -> ExportResult<()> {
    for record in records {
        sink.write_record(record)?;
    }
    sink.flush()
}
