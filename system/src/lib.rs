pub extern crate euclid;
pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;

mod client_agent;
pub mod geometry;
mod history;
mod message;
mod traits;
mod types;

pub use client_agent::*;
pub use history::*;
pub use message::*;
pub use traits::*;
pub use types::*;
