//! Canvas demo application
//!
//! Opens a window, logs progress once a second and reports key presses and
//! mouse clicks.
//! Space schedules a message two seconds ahead; Escape closes the window.

use std::cell::RefCell;
use std::rc::Rc;

use canvas_engine::foundation::logging;
use canvas_engine::input::key::KEY_SPACE;
use canvas_engine::prelude::*;

struct PointerTrace {
    clicks: u32,
}

impl MouseListener for PointerTrace {
    fn on_mouse_down(&mut self, button: i32, pos: Vec2) {
        self.clicks += 1;
        log::info!("Mouse button {button} down at ({:.0}, {:.0}), {} clicks so far", pos.x, pos.y, self.clicks);
    }

    fn on_mouse_wheel(&mut self, delta: Vec2) {
        log::debug!("Scrolled by {:.1}", delta.y);
    }
}

fn main() {
    logging::init();
    log::info!("Starting canvas demo");

    let params = Parameters::from_values([
        ("antialiasing", ParameterValue::Int(4)),
        ("size", ParameterValue::Size(WindowSize::new(800, 600))),
    ])
    .with_title("Canvas Demo");

    let mut canvas = match Canvas::builder().parameters(params).build() {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Failed to create canvas: {e}");
            std::process::exit(1);
        }
    };

    canvas.on_window_resize(|size| log::info!("Window resized to {}x{}", size.width, size.height));
    canvas.add_mouse_listener(Rc::new(RefCell::new(PointerTrace { clicks: 0 })));

    let scheduler = canvas.scheduler();
    canvas.add_key_listener(
        KeyAdapter::new(KeyAction::Pressed, move |event| {
            log::info!("Key {} pressed (mods {:?})", event.key, event.modifiers());
            if event.key == KEY_SPACE {
                scheduler.invoke_later(|| log::info!("Two seconds after space"), 2.0);
            }
        })
        .into_listener(),
    );

    canvas.invoke_later(|| log::info!("Canvas has been open for one second"), 1.0);

    let mut last_report = 0.0_f32;
    let mut frames = 0_u64;
    canvas.animate_with_delta(|elapsed, _delta| {
        frames += 1;
        if elapsed - last_report >= 1.0 {
            last_report = elapsed;
            log::info!("t = {elapsed:.1}s, {frames} frames rendered");
        }
    });

    log::info!("Canvas closed after {frames} frames, last measured {} fps", canvas.get_fps());
}
