//! Request and response types for the Web API.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
