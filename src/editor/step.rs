//! Step Controller
//!
//! The three steps of the item editor and the rules for moving between them.

use super::draft::DraftValues;
use super::validation::{validate_fields, Field, FieldErrors};

/// Delay before focusing the first input of a new step
pub const FOCUS_DELAY_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Basic,
    Assignment,
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Basic, Step::Assignment, Step::Review];

    pub fn index(&self) -> usize {
        match self {
            Step::Basic => 0,
            Step::Assignment => 1,
            Step::Review => 2,
        }
    }

    pub fn from_index(index: usize) -> Step {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Basic => "Grunddaten",
            Step::Assignment => "Zuordnung",
            Step::Review => "Anhänge & Prüfen",
        }
    }

    /// Fields validated before leaving this step
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Step::Basic => &[
                Field::Name,
                Field::Quantity,
                Field::Description,
                Field::InventoryNumber,
                Field::Value,
                Field::PurchaseDate,
            ],
            Step::Assignment => &[Field::Location, Field::Tags],
            Step::Review => &[],
        }
    }

    /// Element focused after switching to this step
    pub fn focus_anchor(&self) -> &'static str {
        match self {
            Step::Basic => Field::Name.input_id(),
            Step::Assignment => Field::Location.input_id(),
            Step::Review => "item-attachments",
        }
    }

    pub fn is_last(&self) -> bool {
        self.index() == Self::ALL.len() - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepController {
    current: Step,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Validate the current step's fields, then move forward (capped at the last step)
    pub fn advance(&mut self, values: &DraftValues) -> Result<Step, FieldErrors> {
        let errors = validate_fields(self.current.fields(), values);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.current = Step::from_index(self.current.index() + 1);
        Ok(self.current)
    }

    /// Move back without validating (capped at the first step)
    pub fn back(&mut self) -> Step {
        self.current = Step::from_index(self.current.index().saturating_sub(1));
        self.current
    }

    pub fn reset(&mut self) {
        self.current = Step::Basic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::validation::ValidationError;

    fn valid_values() -> DraftValues {
        DraftValues {
            name: "Akkuschrauber".to_string(),
            quantity: "2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_advance_through_all_steps() {
        let mut steps = StepController::new();
        let values = valid_values();
        assert_eq!(steps.advance(&values), Ok(Step::Assignment));
        assert_eq!(steps.advance(&values), Ok(Step::Review));
        // Capped at the last step
        assert_eq!(steps.advance(&values), Ok(Step::Review));
    }

    #[test]
    fn test_advance_blocked_by_current_step_only() {
        let mut steps = StepController::new();
        let mut values = valid_values();
        values.quantity = "0".to_string();

        let errors = steps.advance(&values).unwrap_err();
        assert_eq!(steps.current(), Step::Basic);
        assert_eq!(errors.get(&Field::Quantity), Some(&ValidationError::QuantityTooSmall));
    }

    #[test]
    fn test_later_step_ignores_basic_fields() {
        let mut steps = StepController::new();
        let mut values = valid_values();
        steps.advance(&values).unwrap();
        // Broken basic data does not block the assignment step
        values.name.clear();
        assert_eq!(steps.advance(&values), Ok(Step::Review));
    }

    #[test]
    fn test_back_is_capped_and_never_validates() {
        let mut steps = StepController::new();
        assert_eq!(steps.back(), Step::Basic);
        steps.advance(&valid_values()).unwrap();
        assert_eq!(steps.back(), Step::Basic);
    }

    #[test]
    fn test_reset() {
        let mut steps = StepController::new();
        steps.advance(&valid_values()).unwrap();
        steps.reset();
        assert_eq!(steps.current(), Step::Basic);
    }
}
