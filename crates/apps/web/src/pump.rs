use foundation::time::Millis;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Current wall-clock time in milliseconds.
pub fn now() -> Millis {
    Millis::from_f64(js_sys::Date::now())
}

/// Keeps a single browser timeout armed for the earliest pending deadline of
/// the page's timer queues. When it fires, `crate::fire_timers` drains what is
/// due and re-arms.
pub struct TimerPump {
    handle: Option<i32>,
    armed_for: Option<Millis>,
    callback: Closure<dyn FnMut()>,
}

impl TimerPump {
    pub fn new() -> Self {
        Self {
            handle: None,
            armed_for: None,
            callback: Closure::<dyn FnMut()>::new(crate::fire_timers),
        }
    }

    pub fn arm(&mut self, window: &Window, deadline: Option<Millis>, now: Millis) {
        if self.handle.is_some() && self.armed_for == deadline {
            return;
        }
        self.disarm(window);
        let Some(deadline) = deadline else {
            return;
        };
        let delay = deadline.since(now).as_i32_clamped();
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.armed_for = Some(deadline);
            }
            Err(err) => warn!("setTimeout failed: {:?}", err),
        }
    }

    /// Forgets the timeout that just fired without clearing it.
    pub fn fired(&mut self) {
        self.handle = None;
        self.armed_for = None;
    }

    pub fn disarm(&mut self, window: &Window) {
        if let Some(handle) = self.handle.take() {
            window.clear_timeout_with_handle(handle);
        }
        self.armed_for = None;
    }
}
