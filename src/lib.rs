pub mod math;
pub mod spread;
pub mod types;
pub mod window;
