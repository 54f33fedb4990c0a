pub mod helpers;
pub mod pipeline;
