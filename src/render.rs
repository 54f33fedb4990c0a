pub mod colorway;
pub mod compositor;
pub mod surface;
