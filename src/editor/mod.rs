//! Item Editor
//!
//! DOM-free state of the create/edit dialog: validation, steps, draft,
//! attachments and the save flow. Components in `crate::components` bind it
//! to signals.

pub mod attachments;
pub mod draft;
pub mod payload;
pub mod step;
pub mod submit;
pub mod validation;

pub use attachments::{Attachable, AttachmentWarning, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES};
pub use draft::{Draft, DraftValues};
pub use payload::ItemPayload;
pub use step::{Step, FOCUS_DELAY_MS};
pub use submit::{save_draft, AfterSave, ItemBackend, SaveError, SaveMode, SaveOutcome};
pub use validation::Field;
