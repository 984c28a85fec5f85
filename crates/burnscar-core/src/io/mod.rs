pub mod envi;
pub mod envi_writer;
pub mod extent;
pub mod quicklook;
pub mod region_table;
pub mod stack_file;

pub use envi::{header_path, EnviDataType, EnviReader};
pub use envi_writer::{write_raster, EnviWriter};
pub use stack_file::{StackEntry, TemporalStack};
