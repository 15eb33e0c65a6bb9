pub mod records;
pub mod reference;

pub use records::*;
pub use reference::*;
