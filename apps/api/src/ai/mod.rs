//! Writing-assist endpoints backed by the text generator.

pub mod handlers;
pub mod prompts;
