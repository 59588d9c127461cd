//! Field Validation
//!
//! Per-field constraints of the item editor. Evaluated on step transition and
//! again before a save.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::draft::DraftValues;

pub const NAME_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const INVENTORY_NUMBER_MAX_LEN: usize = 100;

static VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:[.,][0-9]{1,2})?$").expect("valid value pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Editable fields of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Quantity,
    Description,
    InventoryNumber,
    Value,
    PurchaseDate,
    Location,
    Tags,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Quantity => "Menge",
            Field::Description => "Beschreibung",
            Field::InventoryNumber => "Inventarnummer",
            Field::Value => "Wert (€)",
            Field::PurchaseDate => "Kaufdatum",
            Field::Location => "Standort",
            Field::Tags => "Tags",
        }
    }

    /// DOM id of the input bound to this field
    pub fn input_id(&self) -> &'static str {
        match self {
            Field::Name => "item-name",
            Field::Quantity => "item-quantity",
            Field::Description => "item-description",
            Field::InventoryNumber => "item-inventory-number",
            Field::Value => "item-value",
            Field::PurchaseDate => "item-purchase-date",
            Field::Location => "item-location",
            Field::Tags => "item-tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Dieses Feld ist erforderlich.")]
    Required,
    #[error("Höchstens {0} Zeichen erlaubt.")]
    TooLong(usize),
    #[error("Menge muss eine ganze Zahl sein.")]
    NotAnInteger,
    #[error("Menge muss mindestens 1 sein.")]
    QuantityTooSmall,
    #[error("Menge ist zu groß.")]
    QuantityTooLarge,
    #[error("Wert muss eine nicht-negative Zahl sein, z. B. 19,99.")]
    InvalidValue,
    #[error("Datum im Format JJJJ-MM-TT angeben.")]
    InvalidDate,
}

pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// Parse a quantity as typed by the user
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required);
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger);
    }
    let quantity: u32 = raw.parse().map_err(|_| ValidationError::QuantityTooLarge)?;
    if quantity < 1 {
        return Err(ValidationError::QuantityTooSmall);
    }
    Ok(quantity)
}

/// Decimal string with a point, or `None` when the input is not a valid amount
pub fn normalize_value(raw: &str) -> Option<String> {
    let raw = raw.trim();
    VALUE_PATTERN.is_match(raw).then(|| raw.replace(',', "."))
}

pub fn is_valid_date(raw: &str) -> bool {
    DATE_PATTERN.is_match(raw.trim())
}

fn check_len(raw: &str, max: usize) -> Result<(), ValidationError> {
    if raw.trim().chars().count() > max {
        Err(ValidationError::TooLong(max))
    } else {
        Ok(())
    }
}

pub fn validate_field(field: Field, values: &DraftValues) -> Result<(), ValidationError> {
    match field {
        Field::Name => {
            if values.name.trim().is_empty() {
                return Err(ValidationError::Required);
            }
            check_len(&values.name, NAME_MAX_LEN)
        }
        Field::Quantity => parse_quantity(&values.quantity).map(|_| ()),
        Field::Description => check_len(&values.description, DESCRIPTION_MAX_LEN),
        Field::InventoryNumber => check_len(&values.inventory_number, INVENTORY_NUMBER_MAX_LEN),
        Field::Value => {
            if values.value.trim().is_empty() || normalize_value(&values.value).is_some() {
                Ok(())
            } else {
                Err(ValidationError::InvalidValue)
            }
        }
        Field::PurchaseDate => {
            if values.purchase_date.trim().is_empty() || is_valid_date(&values.purchase_date) {
                Ok(())
            } else {
                Err(ValidationError::InvalidDate)
            }
        }
        // Chosen from existing options, nothing to check
        Field::Location | Field::Tags => Ok(()),
    }
}

pub fn validate_fields(fields: &[Field], values: &DraftValues) -> FieldErrors {
    fields
        .iter()
        .filter_map(|&field| validate_field(field, values).err().map(|e| (field, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> DraftValues {
        DraftValues {
            name: "Bohrmaschine".to_string(),
            quantity: "1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_required() {
        let mut v = values();
        v.name = "   ".to_string();
        assert_eq!(validate_field(Field::Name, &v), Err(ValidationError::Required));
    }

    #[test]
    fn test_name_too_long() {
        let mut v = values();
        v.name = "x".repeat(NAME_MAX_LEN + 1);
        assert_eq!(validate_field(Field::Name, &v), Err(ValidationError::TooLong(NAME_MAX_LEN)));
    }

    #[test]
    fn test_quantity_rules() {
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert_eq!(parse_quantity(""), Err(ValidationError::Required));
        assert_eq!(parse_quantity("0"), Err(ValidationError::QuantityTooSmall));
        assert_eq!(parse_quantity("-1"), Err(ValidationError::NotAnInteger));
        assert_eq!(parse_quantity("1.5"), Err(ValidationError::NotAnInteger));
        assert_eq!(parse_quantity("zwei"), Err(ValidationError::NotAnInteger));
        assert_eq!(parse_quantity("99999999999"), Err(ValidationError::QuantityTooLarge));
    }

    #[test]
    fn test_quantity_error_message() {
        assert_eq!(ValidationError::QuantityTooSmall.to_string(), "Menge muss mindestens 1 sein.");
    }

    #[test]
    fn test_value_accepts_comma_and_point() {
        assert_eq!(normalize_value("19,99"), Some("19.99".to_string()));
        assert_eq!(normalize_value(" 20 "), Some("20".to_string()));
        assert_eq!(normalize_value("-5"), None);
        assert_eq!(normalize_value("1.999"), None);
        assert_eq!(normalize_value("abc"), None);
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert_eq!(normalize_value("١٢"), None);
        assert_eq!(normalize_value("１２,５０"), None);
        let mut v = values();
        v.purchase_date = "２０２４-０１-０１".to_string();
        assert_eq!(validate_field(Field::PurchaseDate, &v), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let v = values();
        let errors = validate_fields(
            &[Field::Description, Field::InventoryNumber, Field::Value, Field::PurchaseDate],
            &v,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_date_format() {
        let mut v = values();
        v.purchase_date = "2024-03-01".to_string();
        assert!(validate_field(Field::PurchaseDate, &v).is_ok());
        v.purchase_date = "01.03.2024".to_string();
        assert_eq!(validate_field(Field::PurchaseDate, &v), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_validate_fields_collects_every_failure() {
        let mut v = values();
        v.name = String::new();
        v.quantity = "0".to_string();
        v.value = "viel".to_string();
        let errors = validate_fields(&[Field::Name, Field::Quantity, Field::Value], &v);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(&Field::Quantity), Some(&ValidationError::QuantityTooSmall));
    }
}
