pub mod error;
pub mod filter;
pub mod models;
pub mod profile;

pub use error::Error;
pub use filter::MemeFilter;
pub use profile::{Chain, ChainProfile};
pub type Result<T> = std::result::Result<T, Error>;
