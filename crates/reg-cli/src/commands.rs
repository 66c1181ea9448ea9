use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use reg_cli::config::Settings;
use reg_cli::logging::redact_national_id;
use reg_model::{RecordKey, SourceCollection, SubmissionRecord, fields};
use reg_normalization::{DisplayFormat, validate_national_id};
use reg_output::{ExportName, LocalSink, export_name, export_spreadsheet, export_text};
use reg_view::{AdminView, DocumentStore, JsonDirStore, LocalObjectStore, Notice, NoticeLevel};

use crate::cli::{
    CheckIdArgs, DeleteArgs, ExportArgs, FilterArgs, ListArgs, NoteArgs, RecordArgs, SourceArgs,
};
use crate::render::{facets_table, firm_counts_table, record_detail_table, records_table};

/// Notices collected while running a command.
#[derive(Debug, Default)]
pub struct Outcome {
    pub notices: Vec<Notice>,
}

impl Outcome {
    fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        self.notices.extend(notices);
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Stores and display settings shared by every command.
pub struct Desk {
    settings: Settings,
    format: DisplayFormat,
    documents: JsonDirStore,
    objects: LocalObjectStore,
}

impl Desk {
    pub fn new(mut settings: Settings, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            settings.data.dir = dir;
        }
        let format = settings.display_format();
        let documents = JsonDirStore::new(settings.data.dir.clone()).with_format(format);
        let objects = LocalObjectStore::new(settings.objects_dir());
        debug!(
            data_dir = %settings.data.dir.display(),
            objects_dir = %settings.objects_dir().display(),
            "Opened stores"
        );
        Self {
            settings,
            format,
            documents,
            objects,
        }
    }

    async fn load(&self, sources: &[SourceCollection], outcome: &mut Outcome) -> AdminView {
        let mut view = AdminView::new(sources.to_vec(), self.format)
            .with_page_size(self.settings.view.page_size);
        outcome.extend(view.refresh(&self.documents).await);
        view
    }

    async fn load_filtered(&self, filter: &FilterArgs, outcome: &mut Outcome) -> AdminView {
        let mut view = self.load(&filter.source.sources, outcome).await;
        view.set_query(filter.query());
        view
    }
}

pub async fn run_list(desk: &Desk, args: &ListArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let mut view = desk.load_filtered(&args.filter, &mut outcome).await;
    if let Some(size) = args.page_size {
        view = view.with_page_size(size);
    }
    view.set_page(args.page);

    let first_index = (view.page() - 1) * view.page_size() + 1;
    let page = view.current_page();
    println!("{}", records_table(&page, first_index, view.format()));
    println!(
        "Page {}/{} ({} of {} submissions)",
        view.page(),
        view.total_pages(),
        view.filtered().len(),
        view.records().len()
    );
    if view.sources().contains(&SourceCollection::SpecialFirm) {
        println!("{}", firm_counts_table(&view.firm_counts()));
    }
    Ok(outcome)
}

pub async fn run_facets(desk: &Desk, args: &SourceArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let view = desk.load(&args.sources, &mut outcome).await;
    println!("{}", facets_table(view.facets()));
    Ok(outcome)
}

pub async fn run_show(desk: &Desk, args: &RecordArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let collection = args.source.storage_name();
    let document = desk
        .documents
        .get(collection, &args.id)
        .await
        .with_context(|| format!("read {collection}/{}", args.id))?;

    let record = document
        .map(|doc| SubmissionRecord::new(doc.id, args.source, doc.data))
        .filter(|record| belongs_to_source(record, args.source));
    match record {
        Some(record) => println!("{}", record_detail_table(&record, &desk.format)),
        None => outcome.push(Notice::error(format!(
            "No {} submission with id {}.",
            args.source.label(),
            args.id
        ))),
    }
    Ok(outcome)
}

#[tracing::instrument(skip_all, fields(text = args.text))]
pub async fn run_export(desk: &Desk, args: &ExportArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let view = desk.load_filtered(&args.filter, &mut outcome).await;
    let records = view.filtered();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| desk.settings.export.output_dir.clone());
    let mut sink = LocalSink::new(output_dir, io::stdout().lock());

    let result = if args.text {
        let delimiter = args.delimiter.unwrap_or(desk.settings.export.delimiter);
        export_text(records.iter().copied(), delimiter, &desk.format, &mut sink).map(|lines| {
            Notice::success(format!("Exported {lines} submissions as text."))
        })
    } else {
        let name = match &args.file_name {
            Some(file_name) => {
                ExportName::new(file_name.clone(), export_name(view.sources()).sheet_name)
            }
            None => export_name(view.sources()),
        };
        export_spreadsheet(records.iter().copied(), &name, &desk.format, &mut sink).map(|path| {
            Notice::success(format!(
                "Exported {} submissions to {}.",
                records.len(),
                path.display()
            ))
        })
    };

    match result {
        Ok(notice) => outcome.push(notice),
        Err(error) if error.is_empty_input() => {
            warn!("Nothing to export");
            outcome.push(Notice::warning(error.user_message()));
        }
        Err(error) => {
            tracing::error!(%error, "Export failed");
            outcome.push(Notice::error(error.user_message()));
        }
    }
    Ok(outcome)
}

pub async fn run_note(desk: &Desk, args: &NoteArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let key = record_key(&args.record);
    let mut view = desk.load(&[key.source], &mut outcome).await;

    match view
        .annotate(&desk.documents, &key, &args.note, args.author.as_deref())
        .await
    {
        Ok(annotation) => {
            info!(record = %key, author = %annotation.author, "Saved admin note");
            let message = if annotation.note.is_empty() {
                "Note cleared."
            } else {
                "Note saved."
            };
            outcome.push(Notice::success(message));
        }
        Err(error) => outcome.push(error.notice()),
    }
    Ok(outcome)
}

pub async fn run_delete(desk: &Desk, args: &DeleteArgs) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let key = record_key(&args.record);
    if !args.yes {
        outcome.push(Notice::warning(format!(
            "Not deleting {key}. Pass --yes to confirm."
        )));
        return Ok(outcome);
    }

    let mut view = desk.load(&[key.source], &mut outcome).await;
    if let Some(record) = view.find(&key) {
        let tc_no = record.text(fields::TC_NO).unwrap_or_default();
        info!(record = %key, tc_no = %redact_national_id(&tc_no), "Deleting submission");
    }
    match view.delete(&desk.documents, &desk.objects, &key).await {
        Ok(result) => outcome.push(result.notice()),
        Err(error) => outcome.push(error.notice()),
    }
    Ok(outcome)
}

pub fn run_check_id(args: &CheckIdArgs) -> Outcome {
    let mut outcome = Outcome::default();
    let valid = validate_national_id(args.id.trim());
    debug!(id = %redact_national_id(args.id.trim()), valid, "Checked national id");
    if valid {
        println!("valid");
    } else {
        println!("invalid");
        outcome.push(Notice::error("Not a valid national identity number."));
    }
    outcome
}

fn record_key(args: &RecordArgs) -> RecordKey {
    RecordKey::new(args.source, args.id.clone())
}

fn belongs_to_source(record: &SubmissionRecord, source: SourceCollection) -> bool {
    source.admits(record.str_field(fields::ORGANIZATION))
}
