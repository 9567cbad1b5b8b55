//! API protocol definitions.

mod request;
mod response;
mod traits;
mod validation;

pub use request::*;
pub use response::*;
pub use traits::*;
pub use validation::*;
