pub mod blur;
pub mod config;
pub mod convolution;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod mesh;
pub mod plot;
pub mod sph;

pub use blur::{BlurMode, blur_file, blur_image};
pub use config::{BlurSettings, HeightmapSettings, ToolSettings};
pub use convolution::{
    GAUSSIAN_5X5, Kernel, convolve, convolve_fill_zeros, fill_gaps, gaussian_blur,
};
pub use error::{Error, Result};
pub use grid::Grid;
pub use heightmap::{Heightmap, mesh_to_heightmap, rasterize};
pub use mesh::{Point, parse_vertices, read_vertices};
pub use plot::PlotSettings;
pub use sph::SmoothingKernel;
