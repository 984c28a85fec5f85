pub mod consts;
pub mod error;
pub mod raster;
pub mod io;
pub mod threshold;
pub mod annual;
pub mod composite;
pub mod pipeline;
