//! Save Flow
//!
//! One create/update call with the full payload, then one upload per pending
//! file, strictly in order. Only the create/update call can fail the save;
//! failed uploads are collected and reported as a warning.

use async_trait::async_trait;

use crate::api::ApiError;
use crate::models::Item;

use super::attachments::Attachable;
use super::draft::Draft;
use super::payload::ItemPayload;
use super::validation::FieldErrors;

/// Backend operations the save flow needs
#[async_trait(?Send)]
pub trait ItemBackend {
    type File: Attachable;

    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ApiError>;
    async fn update_item(&self, id: u32, payload: &ItemPayload) -> Result<Item, ApiError>;
    async fn upload_attachment(&self, item_id: u32, file: &Self::File) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Edit(u32),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("Bitte die markierten Felder prüfen.")]
    Invalid(FieldErrors),
    #[error("Der Gegenstand konnte nicht gespeichert werden. Bitte später erneut versuchen.")]
    Request(#[source] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub item: Item,
    pub uploaded: usize,
    pub failed_uploads: Vec<String>,
}

impl SaveOutcome {
    /// Warning naming every file that could not be uploaded
    pub fn upload_warning(&self) -> Option<String> {
        match self.failed_uploads.len() {
            0 => None,
            1 => Some(format!(
                "1 Datei konnte nicht hochgeladen werden: {}",
                self.failed_uploads[0]
            )),
            n => Some(format!(
                "{} Dateien konnten nicht hochgeladen werden: {}",
                n,
                self.failed_uploads.join(", ")
            )),
        }
    }
}

/// What the dialog shows once a save went through
#[derive(Debug, Clone, PartialEq)]
pub enum AfterSave {
    /// Create mode: confirmation with "add another" / "close"
    Completion { item_name: String, warning: Option<String> },
    /// Edit mode: close and hand the warning to the caller
    Close { warning: Option<String> },
}

impl AfterSave {
    pub fn for_outcome(mode: SaveMode, outcome: &SaveOutcome) -> Self {
        let warning = outcome.upload_warning();
        match mode {
            SaveMode::Create => AfterSave::Completion {
                item_name: outcome.item.name.clone(),
                warning,
            },
            SaveMode::Edit(_) => AfterSave::Close { warning },
        }
    }
}

pub async fn save_draft<B: ItemBackend>(
    backend: &B,
    mode: SaveMode,
    draft: &Draft<B::File>,
) -> Result<SaveOutcome, SaveError> {
    let payload = draft.to_payload().map_err(SaveError::Invalid)?;

    let item = match mode {
        SaveMode::Create => backend.create_item(&payload).await,
        SaveMode::Edit(id) => backend.update_item(id, &payload).await,
    }
    .map_err(|e| {
        log::error!("saving item failed: {}", e);
        SaveError::Request(e)
    })?;
    log::info!("saved item {} ({:?})", item.id, mode);

    let mut uploaded = 0;
    let mut failed_uploads = Vec::new();
    for file in draft.attachments.iter() {
        match backend.upload_attachment(item.id, file).await {
            Ok(()) => uploaded += 1,
            Err(e) => {
                log::warn!("upload of {} for item {} failed: {}", file.file_name(), item.id, e);
                failed_uploads.push(file.file_name());
            }
        }
    }

    Ok(SaveOutcome {
        item,
        uploaded,
        failed_uploads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::editor::attachments::tests::FakeFile;
    use crate::editor::validation::Field;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(ItemPayload),
        Update(u32, ItemPayload),
        Upload(u32, String),
    }

    #[derive(Default)]
    struct FakeBackend {
        calls: RefCell<Vec<Call>>,
        fail_save: bool,
        failing_uploads: Vec<String>,
    }

    impl FakeBackend {
        fn item_from(id: u32, payload: &ItemPayload) -> Item {
            Item {
                id,
                name: payload.name.clone(),
                description: payload.description.clone(),
                inventory_number: payload.inventory_number.clone(),
                quantity: payload.quantity,
                purchase_date: payload.purchase_date.clone(),
                value: payload.value.clone(),
                location_id: payload.location_id,
                tag_ids: payload.tag_ids.clone(),
                attachments: Vec::new(),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl ItemBackend for FakeBackend {
        type File = FakeFile;

        async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ApiError> {
            self.calls.borrow_mut().push(Call::Create(payload.clone()));
            if self.fail_save {
                return Err(ApiError::Status { status: 500, body: String::new() });
            }
            Ok(Self::item_from(42, payload))
        }

        async fn update_item(&self, id: u32, payload: &ItemPayload) -> Result<Item, ApiError> {
            self.calls.borrow_mut().push(Call::Update(id, payload.clone()));
            if self.fail_save {
                return Err(ApiError::Network("offline".to_string()));
            }
            Ok(Self::item_from(id, payload))
        }

        async fn upload_attachment(&self, item_id: u32, file: &FakeFile) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::Upload(item_id, file.name.clone()));
            if self.failing_uploads.contains(&file.name) {
                return Err(ApiError::Status { status: 413, body: String::new() });
            }
            Ok(())
        }
    }

    fn draft_named(name: &str) -> Draft<FakeFile> {
        let mut draft = Draft::new();
        draft.set_text(Field::Name, name.to_string());
        draft
    }

    #[tokio::test]
    async fn test_empty_name_rejected_before_any_call() {
        let backend = FakeBackend::default();
        let draft = draft_named("   ");

        let result = save_draft(&backend, SaveMode::Create, &draft).await;
        assert!(matches!(result, Err(SaveError::Invalid(ref e)) if e.contains_key(&Field::Name)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_quantity_rejected_before_any_call() {
        let backend = FakeBackend::default();
        for quantity in ["0", "-2", "1,5", ""] {
            let mut draft = draft_named("Hammer");
            draft.set_text(Field::Quantity, quantity.to_string());
            let result = save_draft(&backend, SaveMode::Edit(3), &draft).await;
            assert!(matches!(result, Err(SaveError::Invalid(_))), "quantity {:?}", quantity);
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_partial_upload_failure() {
        let backend = FakeBackend {
            failing_uploads: vec!["werkstatt.jpg".to_string()],
            ..Default::default()
        };
        let mut draft = draft_named("Bohrmaschine");
        draft.attach(vec![FakeFile::image("front.jpg"), FakeFile::image("werkstatt.jpg")]);

        let outcome = save_draft(&backend, SaveMode::Create, &draft).await.unwrap();

        assert_eq!(outcome.item.id, 42);
        assert_eq!(outcome.uploaded, 1);
        assert_eq!(outcome.failed_uploads, vec!["werkstatt.jpg"]);
        assert_eq!(
            outcome.upload_warning().as_deref(),
            Some("1 Datei konnte nicht hochgeladen werden: werkstatt.jpg")
        );
        assert_eq!(
            AfterSave::for_outcome(SaveMode::Create, &outcome),
            AfterSave::Completion {
                item_name: "Bohrmaschine".to_string(),
                warning: outcome.upload_warning(),
            }
        );

        // One create, then uploads in attachment order against the new id
        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0], Call::Create(p) if p.name == "Bohrmaschine" && p.quantity == 1));
        assert_eq!(calls[1], Call::Upload(42, "front.jpg".to_string()));
        assert_eq!(calls[2], Call::Upload(42, "werkstatt.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_failed_save_uploads_nothing() {
        let backend = FakeBackend {
            fail_save: true,
            ..Default::default()
        };
        let mut draft = draft_named("Kamera");
        draft.attach(vec![FakeFile::image("kamera.jpg")]);

        let result = save_draft(&backend, SaveMode::Create, &draft).await;
        assert!(matches!(result, Err(SaveError::Request(_))));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_closes_and_forwards_warning() {
        let backend = FakeBackend {
            failing_uploads: vec!["a.pdf".to_string(), "b.png".to_string()],
            ..Default::default()
        };
        let mut draft = draft_named("Drucker");
        draft.attach(vec![
            FakeFile::with("a.pdf", "application/pdf", 100),
            FakeFile::with("b.png", "image/png", 100),
        ]);

        let outcome = save_draft(&backend, SaveMode::Edit(5), &draft).await.unwrap();
        assert_eq!(outcome.item.id, 5);
        assert_eq!(outcome.uploaded, 0);
        assert_eq!(
            AfterSave::for_outcome(SaveMode::Edit(5), &outcome),
            AfterSave::Close {
                warning: Some("2 Dateien konnten nicht hochgeladen werden: a.pdf, b.png".to_string())
            }
        );
        assert!(matches!(backend.calls()[0], Call::Update(5, _)));
    }

    #[test]
    fn test_no_warning_when_everything_uploaded() {
        let outcome = SaveOutcome {
            item: FakeBackend::item_from(1, &ItemPayload::from_values(&draft_named("Tisch").values).unwrap()),
            uploaded: 2,
            failed_uploads: Vec::new(),
        };
        assert_eq!(outcome.upload_warning(), None);
    }
}
