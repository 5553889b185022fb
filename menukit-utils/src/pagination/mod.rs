//! Stable facade for pagination helpers used by the menus and command handlers.

mod chunk;
mod page;

pub use chunk::{Page, PageSet, PaginateError, joined_length, paginate};
pub use page::{clamp_head, page_window, parse_one_based_page, total_pages};
