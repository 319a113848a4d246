pub mod deg;
pub mod frame;
pub mod polygon;
pub mod r2;
