pub mod aggregate;
pub mod products;

pub use aggregate::{aggregate_block, aggregate_year, blocks, Block, SceneLayers};
pub use products::{AnnualProduct, AnnualSummary};
