//! Settings-driven round trip over a data directory: load, annotate, delete, export.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::tempdir;

use reg_cli::config::Settings;
use reg_model::{RecordKey, SourceCollection, fields};
use reg_output::{LocalSink, export_name, export_spreadsheet, export_text};
use reg_view::{AdminView, JsonDirStore, LocalObjectStore, NoticeLevel};

fn write_settings(dir: &Path) -> Settings {
    let path = dir.join("settings.toml");
    let data_dir = dir.join("data");
    let toml = format!(
        "[data]\ndir = {:?}\n\n[view]\npage_size = 1\n\n[export]\ndelimiter = \"pipe\"\n",
        data_dir.display().to_string()
    );
    fs::write(&path, toml).unwrap();
    Settings::load_from(&path)
}

fn seed(settings: &Settings) {
    fs::create_dir_all(settings.objects_dir().join("photos")).unwrap();
    fs::write(settings.objects_dir().join("photos/p1.jpg"), b"jpeg").unwrap();
    let participants = json!([
        {
            "id": "p1",
            "firstName": "Ayşe", "lastName": "Yılmaz",
            "email": "ayse@example.org",
            "participationDays": ["21 Ekim", "22 Ekim"],
            "photoUrl": "photos/p1.jpg",
            "createdAt": "2025-10-01T09:00:00Z"
        },
        {
            "id": "p2",
            "firstName": "John", "lastName": "Smith",
            "createdAt": "2025-10-02T09:00:00Z"
        }
    ]);
    fs::write(
        settings.data.dir.join("participant.json"),
        serde_json::to_vec_pretty(&participants).unwrap(),
    )
    .unwrap();
}

fn stored_participants(settings: &Settings) -> Vec<Value> {
    let text = fs::read_to_string(settings.data.dir.join("participant.json")).unwrap();
    serde_json::from_str::<Value>(&text)
        .unwrap()
        .as_array()
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_note_and_delete_persist_to_data_dir() {
    let dir = tempdir().unwrap();
    let settings = write_settings(dir.path());
    fs::create_dir_all(&settings.data.dir).unwrap();
    seed(&settings);

    let documents = JsonDirStore::new(settings.data.dir.clone());
    let objects = LocalObjectStore::new(settings.objects_dir());
    let mut view = AdminView::new(vec![SourceCollection::Participant], settings.display_format())
        .with_page_size(settings.view.page_size);

    assert!(view.refresh(&documents).await.is_empty());
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.current_page()[0].id(), "p2");

    let p2 = RecordKey::new(SourceCollection::Participant, "p2");
    view.annotate(&documents, &p2, "Called back", Some("Selin"))
        .await
        .unwrap();

    let p1 = RecordKey::new(SourceCollection::Participant, "p1");
    let outcome = view.delete(&documents, &objects, &p1).await.unwrap();
    assert_eq!(outcome.notice().level, NoticeLevel::Success);
    assert!(!settings.objects_dir().join("photos/p1.jpg").exists());

    let stored = stored_participants(&settings);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], "p2");
    assert_eq!(stored[0][fields::ADMIN_NOTE], "Called back");
    assert_eq!(stored[0][fields::NOTE_BY], "Selin");
}

#[tokio::test]
async fn test_export_uses_settings() {
    let dir = tempdir().unwrap();
    let settings = write_settings(dir.path());
    fs::create_dir_all(&settings.data.dir).unwrap();
    seed(&settings);

    let documents = JsonDirStore::new(settings.data.dir.clone());
    let mut view = AdminView::new(vec![SourceCollection::Participant], settings.display_format());
    view.refresh(&documents).await;
    view.set_search("ayşe");
    let records = view.filtered();
    assert_eq!(records.len(), 1);

    let out_dir = dir.path().join("exports");
    let mut sink = LocalSink::new(&out_dir, Vec::new());
    let name = export_name(view.sources());
    let path = export_spreadsheet(
        records.iter().copied(),
        &name,
        &settings.display_format(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(path, out_dir.join("Katilimcilar_FULL.xlsx"));

    let lines = export_text(
        records.iter().copied(),
        settings.export.delimiter,
        &settings.display_format(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(lines, 1);
    let text = String::from_utf8(sink.into_text_out()).unwrap();
    assert!(text.starts_with("Ayşe|Yılmaz|"));
    assert!(text.contains("21 Ekim, 22 Ekim"));
}
