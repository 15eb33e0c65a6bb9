pub mod entities;
pub mod id;
pub mod status;

pub use entities::*;
pub use id::*;
pub use status::*;
