pub mod filter;
pub mod flow;
pub mod paginate;

pub use filter::{filter_trips, TripFilter};
pub use flow::{SearchFlow, SearchQuery};
pub use paginate::Paginator;
