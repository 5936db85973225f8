/// User events for the GUI event loop.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// A render worker delivered an event; drain the presenter's queue.
    Wake,
}
