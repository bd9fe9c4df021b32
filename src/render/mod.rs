//! Caption rasterization and compositing onto frames.

pub mod blur;
pub mod caption;
pub mod composite;
pub mod mask;
