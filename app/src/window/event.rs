use std::mem::replace;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent},
};

use crate::types::U32x2;

use super::Window;

/// Represents incoming events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The window close request or Escape
    Close,
    /// The window has been resized
    Resize(U32x2),
    /// A key has been pressed
    KeyPressed(VirtualKeyCode),
    /// The window is (un)focused
    Focused(bool),
}

/// Window logic for processing incoming events
impl Window {
    const EVENTS_PREALLOCATE: usize = 4;

    pub fn handle_window_event(&mut self, event: WindowEvent) {
        if let Some(event) = translate(&event) {
            if let Event::Focused(focused) = event {
                self.focused = focused;
            }
            self.events.push(event);
        } else if matches!(
            event,
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. }
        ) {
            self.resized = true;
        }
    }

    /// Take events collected since the last call
    pub fn fetch(&mut self) -> Vec<Event> {
        // Handle deduplicated resize event
        if self.resized {
            self.resized = false;
            let size = {
                let PhysicalSize { width, height } = self.inner.inner_size();
                U32x2::new(width, height)
            };

            self.renderer.on_resize(size);

            self.events.push(Event::Resize(size));
        }

        replace(
            &mut self.events,
            Vec::with_capacity(Self::EVENTS_PREALLOCATE),
        )
    }
}

/// Map a winit event to an application event. Resizes are deduplicated
/// separately and are not translated here.
fn translate(event: &WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Close),
        WindowEvent::Focused(focused) => Some(Event::Focused(*focused)),
        WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    state: ElementState::Pressed,
                    virtual_keycode: Some(key),
                    ..
                },
            is_synthetic: false,
            ..
        } => Some(match key {
            VirtualKeyCode::Escape => Event::Close,
            key => Event::KeyPressed(*key),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use winit::event::{DeviceId, ModifiersState};

    use super::*;

    #[allow(deprecated)]
    fn key(key: VirtualKeyCode, state: ElementState, is_synthetic: bool) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            // Safe in tests: the id is never passed to the platform
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(key),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic,
        }
    }

    #[test]
    fn close_request_and_escape_close() {
        assert_eq!(translate(&WindowEvent::CloseRequested), Some(Event::Close));
        assert_eq!(
            translate(&key(VirtualKeyCode::Escape, ElementState::Pressed, false)),
            Some(Event::Close)
        );
    }

    #[test]
    fn releases_and_synthetic_presses_are_ignored() {
        assert_eq!(
            translate(&key(VirtualKeyCode::Escape, ElementState::Released, false)),
            None
        );
        assert_eq!(
            translate(&key(VirtualKeyCode::Tab, ElementState::Pressed, true)),
            None
        );
    }

    #[test]
    fn other_keys_are_forwarded() {
        assert_eq!(
            translate(&key(VirtualKeyCode::F1, ElementState::Pressed, false)),
            Some(Event::KeyPressed(VirtualKeyCode::F1))
        );
        assert_eq!(
            translate(&WindowEvent::Focused(false)),
            Some(Event::Focused(false))
        );
    }
}
