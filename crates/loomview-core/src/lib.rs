pub mod error;
pub mod table;
pub mod values;

pub use error::*;
pub use table::*;
pub use values::*;
