//! Input adapters: window and pointer events translated into engine calls.

pub mod gui;
