//! REST Bindings
//!
//! Frontend bindings to backend endpoints, organized by domain.

mod client;
mod duplicates;
mod items;
mod lists;
mod tags;

use serde::Serialize;

#[derive(Serialize)]
struct ItemIdsArgs<'a> {
    item_ids: &'a [u32],
}

// Re-export all public items
pub use client::*;
pub use duplicates::*;
pub use items::*;
pub use lists::*;
pub use tags::*;
