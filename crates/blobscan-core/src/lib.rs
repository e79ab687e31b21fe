pub mod cluster;
pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod scene;
pub mod tiling;
