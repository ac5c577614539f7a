//! Space War: a one- or two-player vertical shooter for the terminal.
//!
//! The simulation core (`geometry`, `controls`, `entities`, `compute`,
//! `state`) is pure and single-threaded. The remaining modules are the
//! adapters the terminal host wires around it.

pub mod assets;
pub mod audio;
pub mod compute;
pub mod config;
pub mod controls;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod state;
pub mod storage;
