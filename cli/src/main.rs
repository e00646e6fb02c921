use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use contact_core::{FilterCategory, ViewConfig};
use contact_json::load_contact_str;
use contact_view::ContactView;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contact-cli",
    about = "Render a contact's communication history and action items to HTML."
)]
struct Args {
    /// Path to the contact JSON payload.
    #[arg(short, long)]
    input: PathBuf,

    /// Category to preselect: all, email, text, call or note.
    #[arg(short, long, default_value = "all")]
    filter: FilterCategory,

    /// Characters kept from email bodies.
    #[arg(long)]
    excerpt_chars: Option<usize>,

    /// strftime pattern for dates.
    #[arg(long)]
    date_format: Option<String>,

    /// Print counts instead of markup.
    #[arg(long)]
    summary: bool,

    /// Log filter directive, e.g. `debug` or `contact_view=debug`.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Parses `--log-level`, falling back to `warn` and handing back the parse error.
fn log_filter(directive: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("warn"), Some(err)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (filter, filter_error) = log_filter(&args.log_level);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    if let Some(err) = filter_error {
        tracing::warn!(level = %args.log_level, error = %err, "invalid log level, using `warn`");
    }

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read file {:?}", args.input))?;

    let mut config = ViewConfig::default();
    if let Some(chars) = args.excerpt_chars {
        config.excerpt_chars = chars;
    }
    if let Some(format) = args.date_format {
        config.date_format = format;
    }

    let snapshot = load_contact_str(&data)
        .with_context(|| format!("Could not load contact data from {:?}", args.input))?;
    tracing::info!(
        records = snapshot.records.len(),
        todos = snapshot.todos.len(),
        "loaded contact data"
    );
    let mut view = ContactView::load(&snapshot, config);
    view.select_filter_category(args.filter);

    if args.summary {
        let open = view
            .todos()
            .rows()
            .iter()
            .filter(|row| !row.is_complete())
            .count();
        println!(
            "Filter: {}\nCommunications: {} ({} visible)\nAction items: {} ({} open)",
            view.selected_filter(),
            view.timeline().len(),
            view.timeline().visible_count(),
            view.todos().rows().len(),
            open
        );
    } else {
        println!("{}", view.to_html().await);
    }

    Ok(())
}
