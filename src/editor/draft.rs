//! Draft State
//!
//! The editor's working copy of an item: raw field values, the snapshot they
//! started from, pending attachments and the UI-only state of the wizard.


use crate::models::Item;

use super::attachments::{Attachable, AttachmentList, AttachmentWarning};
use super::payload::ItemPayload;
use super::step::{Step, StepController};
use super::validation::{validate_field, validate_fields, Field, FieldErrors};

/// Field values as typed into the form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftValues {
    pub name: String,
    pub description: String,
    pub inventory_number: String,
    pub quantity: String,
    pub purchase_date: String,
    pub value: String,
    pub location_id: Option<u32>,
    pub tag_ids: Vec<u32>,
}

impl DraftValues {
    /// Defaults for a new item
    pub fn blank() -> Self {
        Self {
            quantity: "1".to_string(),
            ..Default::default()
        }
    }

    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            inventory_number: item.inventory_number.clone().unwrap_or_default(),
            quantity: item.quantity.to_string(),
            purchase_date: item.purchase_date.clone().unwrap_or_default(),
            value: item.value.clone().unwrap_or_default(),
            location_id: item.location_id,
            tag_ids: item.tag_ids.clone(),
        }
    }

    /// Text content of a free-text field, `None` for location and tags
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Description => Some(&self.description),
            Field::InventoryNumber => Some(&self.inventory_number),
            Field::Quantity => Some(&self.quantity),
            Field::PurchaseDate => Some(&self.purchase_date),
            Field::Value => Some(&self.value),
            Field::Location | Field::Tags => None,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Description => Some(&mut self.description),
            Field::InventoryNumber => Some(&mut self.inventory_number),
            Field::Quantity => Some(&mut self.quantity),
            Field::PurchaseDate => Some(&mut self.purchase_date),
            Field::Value => Some(&mut self.value),
            Field::Location | Field::Tags => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Draft<F> {
    pub values: DraftValues,
    initial: DraftValues,
    pub attachments: AttachmentList<F>,
    steps: StepController,
    errors: FieldErrors,
}

impl<F: Attachable> Draft<F> {
    /// Empty draft for create mode
    pub fn new() -> Self {
        Self::with_values(DraftValues::blank())
    }

    /// Draft copied from an existing item for edit mode
    pub fn from_item(item: &Item) -> Self {
        Self::with_values(DraftValues::from_item(item))
    }

    fn with_values(values: DraftValues) -> Self {
        Self {
            initial: values.clone(),
            values,
            attachments: AttachmentList::new(),
            steps: StepController::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.steps.current()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<String> {
        self.errors.get(&field).map(|e| e.to_string())
    }

    /// Any value differs from the snapshot taken when the dialog opened
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Something would be lost by closing the dialog
    pub fn has_unsaved_changes(&self, new_location_input: &str) -> bool {
        self.is_dirty() || !self.attachments.is_empty() || !new_location_input.trim().is_empty()
    }

    /// Update a text field. A field already showing an error is re-checked.
    pub fn set_text(&mut self, field: Field, value: String) {
        let Some(slot) = self.values.text_mut(field) else {
            return;
        };
        *slot = value;
        if self.errors.contains_key(&field) {
            self.recheck(field);
        }
    }

    pub fn set_location(&mut self, location_id: Option<u32>) {
        self.values.location_id = location_id;
    }

    pub fn add_tag(&mut self, tag_id: u32) {
        if !self.values.tag_ids.contains(&tag_id) {
            self.values.tag_ids.push(tag_id);
        }
    }

    pub fn remove_tag(&mut self, tag_id: u32) {
        self.values.tag_ids.retain(|id| *id != tag_id);
    }

    /// Most recently selected tag, removed by Backspace in the tag selector
    pub fn last_tag(&self) -> Option<u32> {
        self.values.tag_ids.last().copied()
    }

    pub fn attach(&mut self, files: impl IntoIterator<Item = F>) -> Option<AttachmentWarning> {
        self.attachments.merge(files)
    }

    pub fn detach(&mut self, name: &str) {
        self.attachments.remove(name);
    }

    fn recheck(&mut self, field: Field) {
        match validate_field(field, &self.values) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
    }

    /// Try to move to the next step. On failure the step's errors are shown.
    pub fn advance(&mut self) -> bool {
        let fields = self.step().fields();
        for field in fields {
            self.errors.remove(field);
        }
        match self.steps.advance(&self.values) {
            Ok(_) => true,
            Err(errors) => {
                self.errors.extend(errors);
                false
            }
        }
    }

    pub fn back(&mut self) {
        self.steps.back();
    }

    /// Validate every step. Used right before a save; on failure the wizard
    /// returns to the first step so the errors are visible.
    pub fn validate_all(&mut self) -> bool {
        let all: Vec<Field> = Step::ALL.iter().flat_map(|s| s.fields().iter().copied()).collect();
        self.errors = validate_fields(&all, &self.values);
        if !self.errors.is_empty() {
            self.steps.reset();
        }
        self.errors.is_empty()
    }

    /// Build the request payload; fails with every field error
    pub fn to_payload(&self) -> Result<ItemPayload, FieldErrors> {
        ItemPayload::from_values(&self.values)
    }

    /// Fresh create-mode draft ("add another")
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<F: Attachable> Default for Draft<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::attachments::tests::FakeFile;
    use crate::editor::validation::ValidationError;

    fn existing_item() -> Item {
        Item {
            id: 7,
            name: "Leiter".to_string(),
            description: Some("Aluminium, 3-teilig".to_string()),
            inventory_number: None,
            quantity: 3,
            purchase_date: Some("2021-05-14".to_string()),
            value: Some("89.00".to_string()),
            location_id: Some(2),
            tag_ids: vec![1, 4],
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft: Draft<FakeFile> = Draft::new();
        assert_eq!(draft.values.quantity, "1");
        assert_eq!(draft.step(), Step::Basic);
        assert!(!draft.is_dirty());
        assert!(!draft.has_unsaved_changes(""));
    }

    #[test]
    fn test_edit_without_changes_is_clean() {
        let draft: Draft<FakeFile> = Draft::from_item(&existing_item());
        assert_eq!(draft.values.quantity, "3");
        assert_eq!(draft.values.inventory_number, "");
        assert!(!draft.is_dirty());
        assert!(!draft.has_unsaved_changes("  "));
    }

    #[test]
    fn test_editing_back_to_initial_value_is_clean() {
        let mut draft: Draft<FakeFile> = Draft::from_item(&existing_item());
        draft.set_text(Field::Name, "Stehleiter".to_string());
        assert!(draft.is_dirty());
        draft.set_text(Field::Name, "Leiter".to_string());
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_errors_appear_only_after_advance() {
        let mut draft: Draft<FakeFile> = Draft::new();
        draft.set_text(Field::Name, "Bohrmaschine".to_string());
        draft.set_text(Field::Value, "abc".to_string());
        assert_eq!(draft.error(Field::Value), None);

        assert!(!draft.advance());
        assert!(draft.error(Field::Value).is_some());

        // Fixing the input clears the shown error right away
        draft.set_text(Field::Value, "12,50".to_string());
        assert_eq!(draft.error(Field::Value), None);
    }

    #[test]
    fn test_unsaved_changes_sources() {
        let mut draft: Draft<FakeFile> = Draft::new();
        assert!(draft.has_unsaved_changes("Keller"));

        draft.attach(vec![FakeFile::image("a.jpg")]);
        assert!(!draft.is_dirty());
        assert!(draft.has_unsaved_changes(""));
    }

    #[test]
    fn test_quantity_zero_blocks_first_step() {
        let mut draft: Draft<FakeFile> = Draft::from_item(&existing_item());
        draft.set_text(Field::Quantity, "0".to_string());

        assert!(!draft.advance());
        assert_eq!(draft.step(), Step::Basic);
        assert_eq!(draft.errors().get(&Field::Quantity), Some(&ValidationError::QuantityTooSmall));
        assert_eq!(draft.error(Field::Quantity).as_deref(), Some("Menge muss mindestens 1 sein."));
    }

    #[test]
    fn test_fixing_a_field_clears_its_error() {
        let mut draft: Draft<FakeFile> = Draft::new();
        assert!(!draft.advance());
        assert!(draft.error(Field::Name).is_some());

        draft.set_text(Field::Name, "Werkbank".to_string());
        assert!(draft.error(Field::Name).is_none());
        assert!(draft.advance());
        assert_eq!(draft.step(), Step::Assignment);
    }

    #[test]
    fn test_tags_added_once_and_last_removed() {
        let mut draft: Draft<FakeFile> = Draft::new();
        draft.add_tag(3);
        draft.add_tag(5);
        draft.add_tag(3);
        assert_eq!(draft.values.tag_ids, vec![3, 5]);
        assert_eq!(draft.last_tag(), Some(5));
        draft.remove_tag(5);
        assert_eq!(draft.last_tag(), Some(3));
    }

    #[test]
    fn test_validate_all_marks_every_failing_field() {
        let mut draft: Draft<FakeFile> = Draft::new();
        draft.set_text(Field::Name, "Regal".to_string());
        assert!(draft.advance());
        draft.set_text(Field::Name, String::new());
        draft.set_text(Field::PurchaseDate, "gestern".to_string());
        assert!(!draft.validate_all());
        assert_eq!(draft.step(), Step::Basic);
        assert!(draft.errors().contains_key(&Field::Name));
        assert!(draft.errors().contains_key(&Field::PurchaseDate));
    }

    #[test]
    fn test_reset_returns_to_fresh_create_draft() {
        let mut draft: Draft<FakeFile> = Draft::from_item(&existing_item());
        draft.attach(vec![FakeFile::image("a.jpg")]);
        draft.advance();
        draft.reset();
        assert_eq!(draft.values, DraftValues::blank());
        assert!(draft.attachments.is_empty());
        assert_eq!(draft.step(), Step::Basic);
    }
}
