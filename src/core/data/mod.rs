pub mod bitmap;
pub mod colour;
pub mod complex;
pub mod dimensions;
pub mod parameter_map;
pub mod pixel_buffer;
pub mod point;
