use std::sync::Arc;

use egui::Context as EguiContext;

use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::RenderPresenterPort;
use crate::core::data::bitmap::Bitmap;

pub trait GuiPresenterPort {
    /// The port render workers deliver events to.
    fn share_port(&self) -> Arc<dyn RenderPresenterPort>;
    /// Events delivered since the last call, oldest first.
    fn take_events(&self) -> Vec<RenderEvent>;
    /// Copies `bitmap` into the frame. Returns false when its size no longer
    /// matches the window.
    fn show_bitmap(&mut self, bitmap: &Bitmap) -> bool;
    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;
}
