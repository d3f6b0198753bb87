pub mod paginated_list;
pub mod list_page;
pub mod scroll;
pub mod profile;

pub use paginated_list::{FetchOutcome, PaginatedList};
pub use list_page::ListPage;
pub use profile::ProfileLoader;
pub use scroll::{near_end, DEFAULT_SCROLL_MARGIN};
