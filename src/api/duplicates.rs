//! Duplicate Review Requests
//!
//! Candidate groups are computed by the backend; the frontend only reads
//! them, asks for a recompute and manages the quarantine.

use reqwest::Method;
use serde::Serialize;

use super::client::{client, ApiResult};
use super::ItemIdsArgs;
use crate::models::{DuplicateGroup, QuarantineEntry, Strictness};

#[derive(Serialize)]
struct StrictnessArgs {
    strictness: Strictness,
}

pub async fn list_duplicate_groups(strictness: Strictness) -> ApiResult<Vec<DuplicateGroup>> {
    client()
        .get_json("duplicates", &[("strictness", strictness.as_param().to_string())])
        .await
}

pub async fn recompute_duplicates(strictness: Strictness) -> ApiResult<()> {
    client()
        .send_no_content(Method::POST, "duplicates/recompute", &StrictnessArgs { strictness })
        .await
}

/// Mark a group as false positive
pub async fn quarantine_group(item_ids: &[u32]) -> ApiResult<QuarantineEntry> {
    client()
        .send_json(Method::POST, "duplicates/quarantine", &ItemIdsArgs { item_ids })
        .await
}

pub async fn list_quarantine() -> ApiResult<Vec<QuarantineEntry>> {
    client().get_json("duplicates/quarantine", &[]).await
}

pub async fn release_quarantine(id: u32) -> ApiResult<()> {
    client().delete(&format!("duplicates/quarantine/{}", id)).await
}
