//! Terminal front end for the results panel

pub mod clipboard;
pub mod commands;
pub mod display;
pub mod session;
pub mod terminal;
