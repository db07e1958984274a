pub mod overrides;
pub mod page_cache;

pub use overrides::OverrideStore;
pub use page_cache::{FetchRequest, PageStatus, RemotePageCache, RemoteResult, Ticket};
