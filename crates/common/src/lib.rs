pub mod dto;
pub mod error;


pub use dto::*;
pub use error::{Error, ErrorDetail, ErrorResponse, Result};
