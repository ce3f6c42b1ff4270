pub mod lineage;
pub mod record;
pub mod seed;

pub use lineage::*;
pub use record::*;
