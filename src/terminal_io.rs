use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::InputSignal;

/// Maps a terminal event to one of the game's two signals.
pub fn signal_for_event(event: &Event) -> Option<InputSignal> {
    match event {
        Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => None,
        Event::Key(key_event) => match key_event.code {
            KeyCode::Char(' ') | KeyCode::Up => Some(InputSignal::Jump),
            KeyCode::Char('q') | KeyCode::Esc => Some(InputSignal::Quit),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Some(InputSignal::Quit),
            _ => None,
        },
        _ => None,
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// Space every `period` frames from frame 1, then `q` at `quit_frame`.
    pub fn flap_script(period: u64, quit_frame: u64) -> Self {
        let mut events: HashMap<u64, Event> = (1..quit_frame)
            .step_by(period.max(1) as usize)
            .map(|frame| (frame, Event::Key(KeyCode::Char(' ').into())))
            .collect();
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}
