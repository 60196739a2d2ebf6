pub mod error;
pub mod source;
pub mod traits;
pub mod types;

pub use error::*;
pub use source::*;
pub use traits::*;
pub use types::*;
