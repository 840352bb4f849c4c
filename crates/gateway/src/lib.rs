pub mod backend;
pub mod logic;
pub mod router;

pub use logic::*;
pub use router::*;
