use std::sync::mpsc::{self, Receiver, Sender};

use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::RenderPresenterPort;

/// Forwards render events to a receiver on another thread.
pub struct ChannelPresenterPort {
    sender: Sender<RenderEvent>,
}

impl ChannelPresenterPort {
    #[must_use]
    pub fn new() -> (Self, Receiver<RenderEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl RenderPresenterPort for ChannelPresenterPort {
    fn present(&self, event: RenderEvent) {
        // A dropped receiver means nobody is watching any more.
        let _ = self.sender.send(event);
    }
}
