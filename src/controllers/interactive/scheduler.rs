use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, info, warn};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::RenderPresenterPort;
use crate::controllers::interactive::renderer::{FrameRenderer, RenderOutcome};
use crate::core::actions::cancellation::{CancelToken, CancellationToken};
use crate::core::cache::render_cache::RenderCache;
use crate::core::data::bitmap::Bitmap;
use crate::core::data::dimensions::Dimensions;
use crate::core::fractals::fractal::Fractal;

/// Request bookkeeping guarded by a single lock. Cancelling the running task
/// and committing a finished one both happen under it.
struct Slot {
    pending: Option<RenderRequest>,
    running: Option<CancellationToken>,
    visible: bool,
}

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    slot: Mutex<Slot>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn RenderPresenterPort>,
    cache: Arc<RenderCache>,
}

impl SharedState {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs renders for one view on a dedicated worker thread.
///
/// At most one render is active: a new request cancels the running task and
/// replaces any request still waiting. Only the newest task can write to the
/// cache or deliver a frame.
pub struct RenderScheduler {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl RenderScheduler {
    pub fn new(
        presenter_port: Arc<dyn RenderPresenterPort>,
        cache: Arc<RenderCache>,
        renderer: Box<dyn FrameRenderer>,
    ) -> io::Result<Self> {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            slot: Mutex::new(Slot {
                pending: None,
                running: None,
                visible: true,
            }),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
            cache,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("render-worker".to_owned())
            .spawn(move || {
                Self::worker_loop(&worker_shared, renderer);
            })?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Supersedes whatever is running or waiting and queues a fresh task.
    pub fn submit_request(&self, fractal: Arc<Fractal>, dimensions: Dimensions) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = RenderRequest::new(generation, fractal, dimensions);

        {
            let mut slot = self.shared.lock_slot();

            if let Some(running) = slot.running.take() {
                running.cancel();
                debug!("render superseded by {}", generation);
            }
            if let Some(stale) = slot.pending.replace(request) {
                stale.token().cancel();
            }
            if !slot.visible {
                debug!("view hidden, deferring render {}", generation);
            }
        }

        self.shared.wake.notify_one();

        generation
    }

    /// Cancels the running task and drops any waiting request.
    pub fn cancel(&self) {
        let mut slot = self.shared.lock_slot();

        if let Some(running) = slot.running.take() {
            running.cancel();
        }
        if let Some(pending) = slot.pending.take() {
            pending.token().cancel();
        }
    }

    /// Hidden views keep their latest request and render it once shown again.
    pub fn set_visible(&self, visible: bool) {
        {
            let mut slot = self.shared.lock_slot();
            slot.visible = visible;
        }

        if visible {
            self.shared.wake.notify_one();
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared.lock_slot().visible
    }

    #[must_use]
    pub fn has_pending_request(&self) -> bool {
        self.shared.lock_slot().pending.is_some()
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.cancel();
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn worker_loop(shared: &Arc<SharedState>, mut renderer: Box<dyn FrameRenderer>) {
        loop {
            let request = {
                let mut slot = shared.lock_slot();
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if slot.visible {
                        if let Some(request) = slot.pending.take() {
                            slot.running = Some(request.token().clone());
                            break request;
                        }
                    }

                    slot = shared
                        .wake
                        .wait(slot)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let generation = request.generation();
            let fractal_name = request.fractal().name().to_owned();

            shared.presenter_port.present(RenderEvent::Started {
                generation,
                fractal: fractal_name.clone(),
            });

            let start = Instant::now();
            let result = renderer.render(&request, request.token());
            let render_duration = start.elapsed();

            let event = {
                let mut slot = shared.lock_slot();

                if request.token().is_cancelled() || shared.shutdown.load(Ordering::Acquire) {
                    debug!("render {} of '{}' cancelled", generation, fractal_name);
                    continue;
                }
                slot.running = None;

                let event = match result {
                    Ok(pixel_buffer) => {
                        let bitmap =
                            Arc::new(Bitmap::new(fractal_name.as_str(), generation, pixel_buffer));
                        shared.cache.put(Arc::clone(&bitmap));

                        info!(
                            "rendered '{}' at {}x{} in {} ms",
                            fractal_name,
                            bitmap.width(),
                            bitmap.height(),
                            render_duration.as_millis()
                        );

                        RenderEvent::Frame(FrameData {
                            generation,
                            bitmap,
                            render_duration,
                        })
                    }
                    Err(RenderOutcome::Cancelled) => {
                        debug!("render {} of '{}' cancelled", generation, fractal_name);
                        continue;
                    }
                    Err(RenderOutcome::Error(message)) => {
                        warn!("render {} of '{}' failed: {}", generation, fractal_name, message);

                        RenderEvent::Error(RenderError {
                            generation,
                            fractal: fractal_name,
                            message,
                        })
                    }
                };

                shared
                    .last_completed_generation
                    .store(generation, Ordering::Release);
                event
            };

            // presented with the slot lock released
            shared.presenter_port.present(event);
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
