//! Export command handler

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use reaction_export::{
    Config, Credentials, CsvSink, ExportOptions, Exporter, Narrow, RecordOrder, ZulipClient,
};

use crate::cli::ExportArgs;

/// Run an export with the given arguments.
///
/// Everything that can be checked locally (config file, narrow, chunk size,
/// credentials, output path) is checked before the first request.
pub fn handle(args: ExportArgs) -> Result<()> {
    let config = Config::load()?;
    let options = resolve_options(&args, &config)?;

    let zuliprc = args
        .zuliprc
        .clone()
        .context("A zuliprc file is required")?;
    let credentials = Credentials::load(&zuliprc)?;
    let client = ZulipClient::new(credentials, &config.http)?;

    let out = open_output(args.output.as_deref())?;
    let mut sink = CsvSink::new(out);
    let mut stderr = io::stderr().lock();

    Exporter::new(&client, options)
        .run(&mut sink, &mut stderr)
        .context("Export failed")?;
    Ok(())
}

/// Merge command-line flags over config file defaults.
fn resolve_options(args: &ExportArgs, config: &Config) -> Result<ExportOptions> {
    let expr = args.narrow.as_deref().unwrap_or(&config.export.narrow);
    let narrow = Narrow::parse(expr)?;

    let options = ExportOptions {
        narrow,
        page_size: args.chunk_size.unwrap_or(config.export.chunk_size),
        header: config.export.header && !args.no_header,
        include_subscribed: args.include_subscribed || config.channels.include_subscribed,
        order: if args.stream || config.export.stream {
            RecordOrder::PageStream
        } else {
            RecordOrder::Chronological
        },
        verbose: args.verbose,
    };
    options.validate()?;
    Ok(options)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
