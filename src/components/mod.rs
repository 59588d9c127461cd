//! UI Components
//!
//! Reusable Leptos components.

mod completion_view;
mod delete_confirm_button;
mod dialog_steps;
mod duplicates_page;
mod export_buttons;
mod item_detail;
mod item_dialog;
mod item_filters;
mod item_table;
mod items_page;
mod list_assign_panel;
mod lists_page;
mod log_panel;
mod notice;
mod page_tab_bar;
mod selection_toolbar;
mod tag_selector;

pub use completion_view::CompletionView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use dialog_steps::{AssignmentStep, BasicStep, ReviewStep};
pub use duplicates_page::DuplicatesPage;
pub use export_buttons::ExportButtons;
pub use item_detail::ItemDetail;
pub use item_dialog::{DraftSignal, ItemDialog};
pub use item_filters::ItemFilters;
pub use item_table::ItemTable;
pub use items_page::ItemsPage;
pub use list_assign_panel::ListAssignPanel;
pub use lists_page::ListsPage;
pub use log_panel::LogPanel;
pub use notice::{NoticeBanner, PageNotice};
pub use page_tab_bar::{Page, PageTabBar};
pub use selection_toolbar::SelectionToolbar;
pub use tag_selector::TagSelector;
