use crate::controllers::interactive::events::render::RenderEvent;

/// Receives render lifecycle events on the render worker thread.
///
/// Events arrive after the scheduler has released its request lock, so an
/// implementation may query or resubmit to the scheduler. A long-running
/// `present` still delays the next render.
pub trait RenderPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
