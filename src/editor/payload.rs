//! Request Payload
//!
//! Normalized form of the draft values as sent to create/update.

use serde::Serialize;

use super::draft::DraftValues;
use super::step::Step;
use super::validation::{normalize_value, parse_quantity, validate_fields, Field, FieldErrors};

/// Body of the create and update item requests.
/// Absent optional values are sent as `null`, never as `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: Option<String>,
    pub inventory_number: Option<String>,
    pub quantity: u32,
    pub purchase_date: Option<String>,
    pub value: Option<String>,
    pub location_id: Option<u32>,
    pub tag_ids: Vec<u32>,
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ItemPayload {
    pub fn from_values(values: &DraftValues) -> Result<Self, FieldErrors> {
        let fields: Vec<Field> = Step::ALL.iter().flat_map(|s| s.fields().iter().copied()).collect();
        let errors = validate_fields(&fields, values);
        if !errors.is_empty() {
            return Err(errors);
        }

        let quantity = parse_quantity(&values.quantity).map_err(|e| FieldErrors::from([(Field::Quantity, e)]))?;

        Ok(Self {
            name: values.name.trim().to_string(),
            description: optional(&values.description),
            inventory_number: optional(&values.inventory_number),
            quantity,
            purchase_date: optional(&values.purchase_date),
            value: optional(&values.value).and_then(|v| normalize_value(&v)),
            location_id: values.location_id,
            tag_ids: values.tag_ids.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> DraftValues {
        DraftValues {
            name: "  Bohrmaschine ".to_string(),
            quantity: "1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_optionals_become_absent() {
        let mut v = values();
        v.description = "   ".to_string();
        v.inventory_number = "\t".to_string();
        v.value = " ".to_string();
        v.purchase_date = String::new();

        let payload = ItemPayload::from_values(&v).unwrap();
        assert_eq!(payload.name, "Bohrmaschine");
        assert_eq!(payload.description, None);
        assert_eq!(payload.inventory_number, None);
        assert_eq!(payload.value, None);
        assert_eq!(payload.purchase_date, None);

        // Normalizing again changes nothing
        assert_eq!(ItemPayload::from_values(&v).unwrap(), payload);
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let payload = ItemPayload::from_values(&values()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["description"].is_null());
        assert!(json["value"].is_null());
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["tag_ids"], serde_json::json!([]));
    }

    #[test]
    fn test_values_trimmed_and_passed_through() {
        let mut v = values();
        v.description = " Schlagbohrer ".to_string();
        v.value = " 129,90 ".to_string();
        v.purchase_date = "2023-11-02".to_string();
        v.quantity = " 2 ".to_string();
        v.location_id = Some(9);
        v.tag_ids = vec![4, 1];

        let payload = ItemPayload::from_values(&v).unwrap();
        assert_eq!(payload.description.as_deref(), Some("Schlagbohrer"));
        assert_eq!(payload.value.as_deref(), Some("129.90"));
        assert_eq!(payload.quantity, 2);
        assert_eq!(payload.location_id, Some(9));
        assert_eq!(payload.tag_ids, vec![4, 1]);
    }

    #[test]
    fn test_invalid_values_produce_no_payload() {
        let mut v = values();
        v.name = " ".to_string();
        v.quantity = "abc".to_string();
        let errors = ItemPayload::from_values(&v).unwrap_err();
        assert!(errors.contains_key(&Field::Name));
        assert!(errors.contains_key(&Field::Quantity));
    }
}
