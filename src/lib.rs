//! Career taxonomy explorer.
//!
//! A static career tree, a set of expanded node ids toggled by the user, and a
//! deterministic layout generator that positions every visible node and edge
//! for a diagram renderer.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
