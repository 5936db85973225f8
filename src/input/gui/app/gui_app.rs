use std::error::Error;

use egui::Context;
use egui_winit::State as EguiWinitState;
use log::{error, warn};
use winit::{
    event::{ElementState, Event, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    event_loop::EventLoop,
    window::Window,
};

use crate::controllers::engine::fractal_engine::FractalEngine;
use crate::core::data::dimensions::Dimensions;
use crate::input::gui::app::overlay::{OverlayState, UiAction};
use crate::input::gui::app::pointer_input::{PointerAction, PointerInput};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::events::GuiEvent;

/// Pixels per wheel "line" when the platform reports pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

pub struct GuiApp<T: GuiPresenterPort> {
    window: &'static Window,
    width: u32,
    height: u32,
    presenter: T,
    engine: FractalEngine,
    pointer_input: PointerInput,
    overlay: OverlayState,
    redraw_pending: bool,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: T,
        engine: FractalEngine,
    ) -> Self {
        let size = window.inner_size();
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None,
        );

        Self {
            window,
            width: size.width,
            height: size.height,
            presenter,
            engine,
            pointer_input: PointerInput::default(),
            overlay: OverlayState::default(),
            redraw_pending: true,
            egui_ctx,
            egui_state,
        }
    }

    /// Does not return until the window is closed.
    pub fn run(mut self, event_loop: EventLoop<GuiEvent>) -> Result<(), Box<dyn Error>> {
        self.resize(self.width, self.height);

        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { ref event, window_id } if window_id == self.window.id() => {
                let response = self.egui_state.on_window_event(self.window, event);
                if response.repaint {
                    self.redraw_pending = true;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        self.engine.shutdown();
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = self.redraw() {
                            error!("render error: {e}");
                            self.engine.shutdown();
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(size) => self.resize(size.width, size.height),
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                        let size = self.window.inner_size();
                        self.resize(size.width, size.height);
                    }
                    WindowEvent::Occluded(occluded) => self.engine.set_visible(!occluded),
                    _ if response.consumed => {}
                    other => self.handle_pointer_event(other),
                }
            }
            Event::UserEvent(GuiEvent::Wake) => self.process_render_events(),
            Event::AboutToWait => {
                if self.redraw_pending {
                    self.window.request_redraw();
                }
            }
            _ => {}
        })?;

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.redraw_pending = true;

        let Ok(dimensions) = Dimensions::new(width, height) else {
            return;
        };

        if let Err(e) = self.presenter.resize(width, height) {
            warn!("could not resize frame to {width}x{height}: {e}");
            return;
        }

        // Keep something on screen while the new size renders.
        if let Some(bitmap) = self.engine.current_bitmap() {
            self.presenter.show_bitmap(&bitmap);
        }
        self.engine.resize(dimensions);
    }

    fn handle_pointer_event(&mut self, event: &WindowEvent) {
        let action = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_input
                    .cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.pointer_input.mouse_pressed(),
                ElementState::Released => self.pointer_input.mouse_released(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
                };
                self.pointer_input.wheel(lines)
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => Some(self.pointer_input.touch_started(touch.id, x, y)),
                    TouchPhase::Moved => self.pointer_input.touch_moved(touch.id, x, y),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.pointer_input.touch_ended(touch.id)
                    }
                }
            }
            _ => None,
        };

        if let Some(action) = action {
            self.apply_pointer_action(action);
        }
    }

    fn apply_pointer_action(&mut self, action: PointerAction) {
        match action {
            PointerAction::Down { x, y } => self.engine.on_pointer_down(x, y),
            PointerAction::Sample(pointers) => {
                if self.engine.on_pointer_sample(&pointers).is_some() {
                    self.redraw_pending = true;
                }
            }
            PointerAction::Up => {
                self.engine.on_pointer_up();
            }
            PointerAction::Zoom {
                old_distance,
                new_distance,
            } => {
                self.engine.on_pinch(old_distance, new_distance);
                self.engine.on_gesture_end();
                self.redraw_pending = true;
            }
        }
    }

    fn process_render_events(&mut self) {
        for event in self.presenter.take_events() {
            if let Some(bitmap) = self.overlay.apply(event) {
                if bitmap.fractal() == self.engine.current().name() {
                    self.presenter.show_bitmap(&bitmap);
                }
            }
            self.redraw_pending = true;
        }
    }

    fn redraw(&mut self) -> Result<(), pixels::Error> {
        self.redraw_pending = false;

        let (egui_output, actions) = self.update_ui();
        self.egui_state
            .handle_platform_output(self.window, egui_output.platform_output.clone());
        if egui_output
            .viewport_output
            .values()
            .any(|v| v.repaint_delay.is_zero())
        {
            self.redraw_pending = true;
        }

        for action in actions {
            self.apply_ui_action(action);
        }

        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        self.presenter.render(egui_output, &self.egui_ctx)
    }

    fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::CycleFractal(offset) => {
                let fractal = self.engine.select_relative(offset);
                if let Some(bitmap) = self.engine.bitmap_for(fractal.name()) {
                    self.presenter.show_bitmap(&bitmap);
                }
            }
            UiAction::SetParameter(name, value) => {
                self.engine.update_parameters([(name, value)]);
            }
        }
        self.redraw_pending = true;
    }

    fn update_ui(&mut self) -> (egui::FullOutput, Vec<UiAction>) {
        let raw_input = self.egui_state.take_egui_input(self.window);
        let fractal = std::sync::Arc::clone(self.engine.current());
        let parameters = fractal.parameters().snapshot();
        let overlay = &self.overlay;
        let (width, height) = (self.width, self.height);
        let mut actions = Vec::new();

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Fractal")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 240.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("<").clicked() {
                            actions.push(UiAction::CycleFractal(-1));
                        }
                        ui.heading(fractal.name());
                        if ui.button(">").clicked() {
                            actions.push(UiAction::CycleFractal(1));
                        }
                    });
                    ui.label(format!(
                        "{} / {} palette",
                        fractal.strategy_kind().display_name(),
                        fractal.palette().kind().display_name()
                    ));
                    ui.separator();

                    egui::Grid::new("parameters").num_columns(2).show(ui, |ui| {
                        for (name, value) in parameters.iter() {
                            let mut edited = value;
                            ui.label(name);
                            let response = ui.add(egui::DragValue::new(&mut edited).speed(0.01));
                            if response.changed() {
                                actions.push(UiAction::SetParameter(name.to_owned(), edited));
                            }
                            ui.end_row();
                        }
                    });

                    ui.separator();
                    ui.label(format!("Window size: {}x{}", width, height));
                    if let Some(generation) = overlay.rendering {
                        ui.label(format!("Rendering #{generation}..."));
                    }
                    if let Some(duration) = overlay.last_render_duration {
                        ui.label(format!("Last render: {} ms", duration.as_millis()));
                    }
                    if let Some(message) = &overlay.last_error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        });

        (output, actions)
    }
}
