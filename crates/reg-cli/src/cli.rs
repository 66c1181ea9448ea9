//! CLI argument definitions for the registration admin desk.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use reg_model::SourceCollection;
use reg_output::Delimiter;
use reg_view::{Facet, FacetFilter, ViewQuery};

#[derive(Parser)]
#[command(
    name = "regdesk",
    version,
    about = "Registration admin desk - review, annotate and export forum submissions",
    long_about = "Review, annotate and export forum registration submissions.\n\n\
                  Works against a directory of exported collections \
                  (<collection>.json) and a local photo directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the collection files (overrides settings).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow personal data such as national ids to appear unmasked in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List submissions, filtered and paginated.
    List(ListArgs),

    /// Show the distinct values of each filter facet.
    Facets(SourceArgs),

    /// Show one submission with normalized fields.
    Show(RecordArgs),

    /// Export submissions to a spreadsheet or delimited text.
    Export(ExportArgs),

    /// Write an admin note on a submission.
    Note(NoteArgs),

    /// Delete a submission and its photos.
    Delete(DeleteArgs),

    /// Validate a Turkish national identity number.
    CheckId(CheckIdArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Source collection(s) to load. Repeat for more than one.
    #[arg(
        long = "source",
        short = 's',
        value_name = "SOURCE",
        default_value = "participant"
    )]
    pub sources: Vec<SourceCollection>,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Case-insensitive search over name, days, ids, email and organization.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact organization type ("Tümü" for any).
    #[arg(long = "org-type", value_name = "VALUE")]
    pub organization_type: Option<String>,

    /// Exact country ("Tümü" for any).
    #[arg(long = "country", value_name = "VALUE")]
    pub country: Option<String>,

    /// Exact participant type ("Tümü" for any).
    #[arg(long = "participant-type", value_name = "VALUE")]
    pub participant_type: Option<String>,

    /// Special firm to narrow a special-firm listing to ("Tümü" for any).
    #[arg(long = "firm", value_name = "FIRM")]
    pub firm: Option<String>,
}

impl FilterArgs {
    pub fn query(&self) -> ViewQuery {
        let mut query = ViewQuery::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_firm(self.firm.as_deref().map_or(FacetFilter::All, FacetFilter::parse));
        let choices = [
            (Facet::OrganizationType, &self.organization_type),
            (Facet::OrganizationCountry, &self.country),
            (Facet::ParticipantType, &self.participant_type),
        ];
        for (facet, choice) in choices {
            if let Some(choice) = choice {
                query = query.with_facet(facet, FacetFilter::parse(choice));
            }
        }
        query
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page to show, starting at 1. Pages past the end list nothing.
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides settings).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write delimited text to stdout instead of a spreadsheet file.
    #[arg(long = "text")]
    pub text: bool,

    /// Column delimiter for text output (overrides settings).
    #[arg(long = "delimiter", value_name = "tab|pipe")]
    pub delimiter: Option<Delimiter>,

    /// Directory for spreadsheet files (overrides settings).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Spreadsheet file name (default: derived from the sources).
    #[arg(long = "file-name", value_name = "NAME")]
    pub file_name: Option<String>,
}

#[derive(Args)]
pub struct RecordArgs {
    /// Source collection of the submission.
    #[arg(value_name = "SOURCE")]
    pub source: SourceCollection,

    /// Submission id.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args)]
pub struct NoteArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Note text. An empty string clears the note.
    #[arg(value_name = "NOTE")]
    pub note: String,

    /// Name recorded as the note author.
    #[arg(long = "author", value_name = "NAME")]
    pub author: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Confirm the deletion. Without it nothing is deleted.
    #[arg(long = "yes")]
    pub yes: bool,
}

#[derive(Args)]
pub struct CheckIdArgs {
    /// The 11-digit identity number.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
