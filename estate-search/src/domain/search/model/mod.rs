//! Language model implementations.

mod chat;
#[cfg(test)]
mod mock;

pub use chat::ChatModel;
#[cfg(test)]
pub use mock::MockModel;
