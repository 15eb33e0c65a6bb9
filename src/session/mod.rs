pub mod form;
pub mod list;
pub mod pager;
pub mod transform;
pub mod validate;

pub use form::*;
pub use list::*;
pub use pager::*;
pub use transform::*;
pub use validate::*;
