pub mod fzf;
pub mod matcher;

pub use fzf::*;
pub use matcher::*;
