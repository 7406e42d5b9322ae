//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use appdock_common::Rect;

use super::core::AppDockApp;
use super::init::logical_size;

impl ApplicationHandler for AppDockApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_registry() || !self.initialize_window(event_loop) {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.handle_resize();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => self.handle_resize(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl AppDockApp {
    /// Resize the shell to the window and reposition the visible app.
    fn handle_resize(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = logical_size(window);
        if let Some(shell) = &self.shell {
            shell.set_bounds(Rect::new(0.0, 0.0, size.width, size.height));
        }
        if let Some(lifecycle) = &self.lifecycle {
            lifecycle.set_window_size(size);
        }
    }
}
