pub mod keys;
pub mod store;

pub use keys::{CreatedKey, JobItem, PriorityKey};
pub use store::{Directory, SortKey, LOCATION_NOT_FOUND};

#[cfg(test)]
mod tests;
