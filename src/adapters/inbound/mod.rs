pub mod http;
pub mod request;

pub use http::*;
pub use request::*;
