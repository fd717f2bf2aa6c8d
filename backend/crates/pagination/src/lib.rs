//! Pagination primitives shared by Project Jam listing endpoints.
//!
//! The crate covers the two pagination styles the service exposes:
//!
//! - **Cursor pagination** for open-ended feeds. [`Cursor`] wraps a typed key
//!   and renders it as an opaque URL-safe token; [`PageParams`] carries the
//!   request side and [`Page`] the response envelope. [`CursorStack`] keeps
//!   the next/previous bookkeeping a client needs to walk a cursor feed in
//!   both directions.
//! - **Numbered pagination** for short, fully materialised lists (liked or
//!   applied projects). [`page_slice`] and [`total_pages`] compute bounds
//!   without ever indexing out of range.

mod cursor;
mod page;
mod slice;
mod stack;

pub use cursor::{Cursor, CursorError};
pub use page::{DEFAULT_LIMIT, MAX_LIMIT, Page, PageParams, PaginationLinks};
pub use slice::{page_slice, total_pages};
pub use stack::CursorStack;
