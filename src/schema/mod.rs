pub mod catalog;
pub mod types;
pub mod validator;

pub use catalog::*;
pub use types::*;
pub use validator::*;
