pub mod decode;
pub mod resolve;
pub mod store;
