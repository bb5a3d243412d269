//! Request-side helpers: content negotiation, body fields, paging.

pub mod accept;
pub mod fields;
pub mod page;
pub use accept::AcceptsJson;
pub use fields::RequestFields;
pub use page::PageParams;
