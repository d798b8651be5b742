//! Service traits.

mod api;

pub use api::MetagenomeApi;
