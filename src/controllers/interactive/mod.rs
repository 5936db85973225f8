//! Render scheduling for a live view.
//!
//! A [`RenderScheduler`] owns one worker thread. Requests go in through
//! [`RenderScheduler::submit_request`], results come out through the
//! [`RenderPresenterPort`] as [`RenderEvent`]s. The worker delegates pixel
//! production to a [`FrameRenderer`], normally a [`StrategyRenderer`].

pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod renderer;
pub mod scheduler;

pub use data::frame_data::FrameData;
pub use data::render_request::RenderRequest;
pub use errors::render::RenderError;
pub use events::render::RenderEvent;
pub use ports::presenter::RenderPresenterPort;
pub use renderer::{FrameRenderer, RenderOutcome, StrategyRenderer};
pub use scheduler::RenderScheduler;
