use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    /// A frame boundary, carrying the time since the previous one.
    Tick(Duration),
}

/// Polls the terminal on the calling thread, waking at least once per frame.
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    pub fn next(&mut self) -> io::Result<Event> {
        loop {
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if !timeout.is_zero() && event::poll(timeout)? {
                if let event::Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(Event::Key(key));
                    }
                }
                continue;
            }

            let elapsed = self.last_tick.elapsed();
            if elapsed >= self.tick_rate {
                self.last_tick = Instant::now();
                return Ok(Event::Tick(elapsed));
            }
        }
    }
}
