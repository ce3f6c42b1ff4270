pub mod location;
pub mod topology;
pub mod union_find;

pub use location::{Bfs, Dfs, Edge, LocationGraph, SpanningForest};
pub use topology::{EdgeSpec, Topology};
pub use union_find::UnionFind;
