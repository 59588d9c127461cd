//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Entities shown in sorted option lists (tags, locations, item lists)
pub trait Named {
    fn id(&self) -> u32;
    fn name(&self) -> &str;
}

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub inventory_number: Option<String>,
    pub quantity: u32,
    /// ISO date, `YYYY-MM-DD`
    pub purchase_date: Option<String>,
    /// Decimal string, e.g. "19.99"
    pub value: Option<String>,
    pub location_id: Option<u32>,
    #[serde(default)]
    pub tag_ids: Vec<u32>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Uploaded image or document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u32,
    pub file_name: String,
    pub content_type: String,
    pub url: String,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Tag data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
}

/// Named group of items ("Liste")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_ids: Vec<u32>,
}

impl Named for Tag {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Location {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ItemList {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// One page of the item table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
}

impl ItemPage {
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
        }
    }

    /// At least one page, even when empty
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    Newest,
    ValueDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::NameAsc, SortKey::NameDesc, SortKey::Newest, SortKey::ValueDesc];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name",
            SortKey::NameDesc => "-name",
            SortKey::Newest => "-created",
            SortKey::ValueDesc => "-value",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_param() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A–Z)",
            SortKey::NameDesc => "Name (Z–A)",
            SortKey::Newest => "Neueste zuerst",
            SortKey::ValueDesc => "Wert (absteigend)",
        }
    }
}

/// Filter, sort and paging state of the item table
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    pub text: String,
    pub tag_ids: Vec<u32>,
    pub location_ids: Vec<u32>,
    pub sort: SortKey,
    pub page: u32,
    pub page_size: u32,
}

impl ItemQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            text: String::new(),
            tag_ids: Vec::new(),
            location_ids: Vec::new(),
            sort: SortKey::default(),
            page: 1,
            page_size,
        }
    }

    /// Any filter change starts over at page one
    pub fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.page = 1;
        }
    }

    pub fn set_tags(&mut self, tag_ids: Vec<u32>) {
        self.tag_ids = tag_ids;
        self.page = 1;
    }

    pub fn set_locations(&mut self, location_ids: Vec<u32>) {
        self.location_ids = location_ids;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Filter parameters only (shared by listing and export)
    pub fn filter_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let text = self.text.trim();
        if !text.is_empty() {
            params.push(("q", text.to_string()));
        }
        if !self.tag_ids.is_empty() {
            params.push(("tags", join_ids(&self.tag_ids)));
        }
        if !self.location_ids.is_empty() {
            params.push(("locations", join_ids(&self.location_ids)));
        }
        params.push(("sort", self.sort.as_param().to_string()));
        params
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.filter_params();
        params.push(("page", self.page.to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params
    }
}

pub fn join_ids(ids: &[u32]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

/// How aggressively the backend matches duplicate candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    pub const ALL: [Strictness; 3] = [Strictness::Low, Strictness::Medium, Strictness::High];

    pub fn as_param(&self) -> &'static str {
        match self {
            Strictness::Low => "low",
            Strictness::Medium => "medium",
            Strictness::High => "high",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_param() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strictness::Low => "Locker",
            Strictness::Medium => "Normal",
            Strictness::High => "Streng",
        }
    }
}

/// Items the backend considers probable duplicates of each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub key: String,
    #[serde(default)]
    pub score: Option<f32>,
    pub items: Vec<Item>,
}

impl DuplicateGroup {
    pub fn item_ids(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// A group dismissed as false positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarantineEntry {
    pub id: u32,
    pub item_ids: Vec<u32>,
    #[serde(default)]
    pub item_names: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_param(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn file_name(&self) -> String {
        format!("inventar-export.{}", self.as_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = ItemQuery::new(25);
        query.go_to(4);
        query.set_tags(vec![2]);
        assert_eq!(query.page, 1);

        query.go_to(3);
        query.set_text(String::new());
        assert_eq!(query.page, 3, "unchanged text keeps the page");
        query.set_text("bohr".to_string());
        assert_eq!(query.page, 1);

        query.go_to(0);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_total_pages() {
        let mut page = ItemPage::empty(25);
        assert_eq!(page.total_pages(), 1);
        page.total = 25;
        assert_eq!(page.total_pages(), 1);
        page.total = 26;
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_query_params_skip_empty_filters() {
        let mut query = ItemQuery::new(25);
        query.text = "   ".to_string();
        let params = query.to_params();
        assert!(params.iter().all(|(k, _)| *k != "q" && *k != "tags" && *k != "locations"));
        assert!(params.contains(&("sort", "name".to_string())));
        assert!(params.contains(&("page", "1".to_string())));
    }

    #[test]
    fn test_query_params_join_ids() {
        let mut query = ItemQuery::new(10);
        query.text = " Akku ".to_string();
        query.tag_ids = vec![3, 7];
        query.location_ids = vec![2];
        let params = query.filter_params();
        assert_eq!(params[0], ("q", "Akku".to_string()));
        assert_eq!(params[1], ("tags", "3,7".to_string()));
        assert_eq!(params[2], ("locations", "2".to_string()));
    }

    #[test]
    fn test_strictness_param_round_trip() {
        for s in Strictness::ALL {
            assert_eq!(Strictness::from_param(s.as_param()), Some(s));
        }
        assert_eq!(Strictness::from_param("extreme"), None);
    }

    #[test]
    fn test_item_deserializes_without_optional_lists() {
        let json = r#"{"id":4,"name":"Leiter","description":null,"inventory_number":null,
            "quantity":1,"purchase_date":null,"value":"49.90","location_id":2}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.value.as_deref(), Some("49.90"));
        assert!(item.tag_ids.is_empty());
        assert!(item.attachments.is_empty());
    }
}
