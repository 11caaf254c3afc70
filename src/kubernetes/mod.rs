mod client;
mod error;
mod node;

pub use client::{ConnectOptions, NodeSource};
pub use node::NodeRecord;
