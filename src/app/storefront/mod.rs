//! 店面查询引擎

pub mod query;
pub mod session;
pub mod view;

pub use query::{compute_view, PriceRange, QueryError, QueryState, SortKey};
pub use session::{FetchTicket, Storefront};
pub use view::{top_deals, ViewSummary};
