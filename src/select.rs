pub mod flavors;
pub mod local;
pub mod manifest;
