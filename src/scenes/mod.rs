mod bench;
mod common;
mod garden;
mod pond;
mod tree;

pub use bench::{build_bench, BenchParams};
pub use common::random_uniform;
pub use garden::{
    GardenBuilder, BENCH_POSITION, FOG_FAR, FOG_NEAR, GROUND_SIZE, MOON_POSITION, POND_POSITION,
    ROOT_CHILDREN, TREE_POSITION,
};
pub use pond::{build_pond, PondParams};
pub use tree::{build_tree, TreeParams, DEFAULT_LEAF_COUNT};
