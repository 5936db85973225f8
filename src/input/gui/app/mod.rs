pub mod gui_app;
pub mod overlay;
pub mod pointer_input;
pub mod ports;
