mod client;
mod gemini;
mod openai;

pub use client::*;
pub use gemini::*;
pub use openai::*;
