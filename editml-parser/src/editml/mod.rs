//! Main module for EditML library functionality

pub mod api;
pub mod ast;
pub mod comments;
pub mod escapes;
pub mod formats;
pub mod matching;
pub mod overlap;
pub mod rendering;
pub mod structure;
pub mod testing;
