// Request validation, payload translation and error mapping for the gateway

pub mod error;
pub mod health;
pub mod predict;
pub mod request;
pub mod response;

pub use error::*;
pub use health::*;
pub use predict::*;
pub use request::*;
pub use response::*;
