pub mod filter_handlers;

pub use filter_handlers::{apply_filter_actions, FilterActions};
