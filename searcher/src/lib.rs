//! Generalized search algorithms, especially useful for graph traversal.
//!
//! Breadth first, depth first, Dijkstra's algorithm and A* share one
//! engine, which differs only in its frontier and its preference between
//! paths. States need not implement anything beyond [Clone]: by default
//! they are identified by their [StructuralHash], and every algorithm module
//! also offers a `build_by_key` constructor taking an explicit key function.
//!
//! ```
//! use searcher::bfs;
//!
//! let path = bfs::run(1u32, |n: &u32| vec![n * 2, n + 1], |n| *n == 10);
//! assert_eq!(path, Some(vec![2, 4, 5, 10]));
//! ```

pub mod algorithm;
mod errors;
pub mod hashing;
mod traits;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use hashing::{Opaque, StateKey, StructuralHash, StructuralHasher};
pub use traits::{Cost, SearchKey};

pub use algorithm::astar;
pub use algorithm::basic::bfs;
pub use algorithm::basic::dfs;
pub use algorithm::dijkstra;
pub use algorithm::{with_cost, SearchOptions, SearchQueue, Searcher, Solution, Traversal, Visit};
