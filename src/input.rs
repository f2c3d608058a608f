//! Keyboard input over crossterm, exposed as the core's `InputSource`.
//!
//! A dedicated thread performs blocking reads and forwards events through a
//! channel; `poll` drains it without blocking.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → a key is held from its press
//!   until its release, and fire is truly edge-triggered.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  A key counts as held while its last press is
//!   recent, and a synthetic release is emitted once it goes stale.  Fire
//!   therefore releases only `FIRE_HOLD_WINDOW` after the last press, so two
//!   taps closer together than that yield a single shot.
//!
//! Enhanced mode is assumed when the terminal reports support up front, and
//! switched on the first time a `Release` or `Repeat` event arrives.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use side_shooter::ports::{HeldKey, InputEvent, InputSource};

/// Movement keys stay held this long after their last press/repeat.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Fire must also outlast the OS initial key-repeat delay, otherwise a
/// held trigger would release and re-press on classic terminals.
const FIRE_HOLD_WINDOW: Duration = Duration::from_millis(600);

const FIRE: KeyCode = KeyCode::Char(' ');

pub struct CrosstermInput {
    rx: Receiver<Event>,
    /// Each held key → when it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, Instant>,
    fire_down: bool,
    /// Terminal delivers real release events.
    enhanced: bool,
}

impl CrosstermInput {
    /// Start the reader thread.  It exits on its own once this value is
    /// dropped and the next event arrives.
    pub fn spawn(enhanced: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
        });
        CrosstermInput::from_receiver(rx, enhanced)
    }

    pub fn from_receiver(rx: Receiver<Event>, enhanced: bool) -> Self {
        CrosstermInput {
            rx,
            last_seen: HashMap::new(),
            fire_down: false,
            enhanced,
        }
    }

    fn seen_within(&self, code: &KeyCode, window: Duration) -> bool {
        self.last_seen
            .get(code)
            .map(|at| at.elapsed() <= window)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        if self.enhanced {
            codes.iter().any(|c| self.last_seen.contains_key(c))
        } else {
            codes.iter().any(|c| self.seen_within(c, HOLD_WINDOW))
        }
    }

    fn on_press(&mut self, code: KeyCode, modifiers: KeyModifiers, events: &mut Vec<InputEvent>) {
        self.last_seen.insert(code, Instant::now());
        match code {
            FIRE if !self.fire_down => {
                self.fire_down = true;
                events.push(InputEvent::FirePressed);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => events.push(InputEvent::Reload),
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                events.push(InputEvent::Pause)
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                events.push(InputEvent::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => events.push(InputEvent::Quit),
            _ => {}
        }
    }

    fn on_release(&mut self, code: KeyCode, events: &mut Vec<InputEvent>) {
        self.last_seen.remove(&code);
        if code == FIRE && self.fire_down {
            self.fire_down = false;
            events.push(InputEvent::FireReleased);
        }
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => self.on_press(code, modifiers, &mut events),
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    self.enhanced = true;
                    self.last_seen.insert(code, Instant::now());
                }
                KeyEventKind::Release => {
                    self.enhanced = true;
                    self.on_release(code, &mut events);
                }
            }
        }

        if !self.enhanced && self.fire_down && !self.seen_within(&FIRE, FIRE_HOLD_WINDOW) {
            self.on_release(FIRE, &mut events);
        }
        events
    }

    fn is_held(&self, key: HeldKey) -> bool {
        match key {
            HeldKey::Up => self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            HeldKey::Down => {
                self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    /// Longer than `HOLD_WINDOW`, shorter than a typical OS repeat delay.
    const REPEAT_DELAY: Duration = Duration::from_millis(200);

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn fire_is_edge_triggered() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, false);
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap();
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap(); // OS repeat
        assert_eq!(input.poll(), vec![InputEvent::FirePressed]);

        tx.send(key(FIRE, KeyEventKind::Release)).unwrap();
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap();
        assert_eq!(
            input.poll(),
            vec![InputEvent::FireReleased, InputEvent::FirePressed]
        );
    }

    #[test]
    fn movement_keys_are_held_until_release() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, false);
        tx.send(key(KeyCode::Char('w'), KeyEventKind::Press)).unwrap();
        input.poll();
        assert!(input.is_held(HeldKey::Up));
        assert!(!input.is_held(HeldKey::Down));

        tx.send(key(KeyCode::Char('w'), KeyEventKind::Release)).unwrap();
        input.poll();
        assert!(!input.is_held(HeldKey::Up));
    }

    #[test]
    fn escape_pauses_and_q_quits() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, false);
        tx.send(key(KeyCode::Esc, KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Char('q'), KeyEventKind::Press)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::Pause, InputEvent::Quit]);
    }

    #[test]
    fn enhanced_key_stays_held_through_repeat_delay() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, true);
        tx.send(key(KeyCode::Char('w'), KeyEventKind::Press)).unwrap();
        input.poll();
        thread::sleep(REPEAT_DELAY);
        input.poll();
        assert!(input.is_held(HeldKey::Up));

        tx.send(key(KeyCode::Char('w'), KeyEventKind::Release)).unwrap();
        input.poll();
        assert!(!input.is_held(HeldKey::Up));
    }

    #[test]
    fn first_release_event_switches_to_enhanced_mode() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, false);
        tx.send(key(KeyCode::Char('r'), KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Char('r'), KeyEventKind::Release)).unwrap();
        tx.send(key(KeyCode::Down, KeyEventKind::Press)).unwrap();
        input.poll();
        thread::sleep(REPEAT_DELAY);
        input.poll();
        assert!(input.is_held(HeldKey::Down));
    }

    #[test]
    fn classic_key_expires_without_repeats() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, false);
        tx.send(key(KeyCode::Char('w'), KeyEventKind::Press)).unwrap();
        input.poll();
        thread::sleep(REPEAT_DELAY);
        input.poll();
        assert!(!input.is_held(HeldKey::Up));
    }

    #[test]
    fn enhanced_fire_waits_for_real_release() {
        let (tx, rx) = mpsc::channel();
        let mut input = CrosstermInput::from_receiver(rx, true);
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::FirePressed]);

        thread::sleep(FIRE_HOLD_WINDOW + Duration::from_millis(50));
        assert!(input.poll().is_empty());

        // Quick taps each register
        tx.send(key(FIRE, KeyEventKind::Release)).unwrap();
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap();
        tx.send(key(FIRE, KeyEventKind::Release)).unwrap();
        tx.send(key(FIRE, KeyEventKind::Press)).unwrap();
        assert_eq!(
            input.poll(),
            vec![
                InputEvent::FireReleased,
                InputEvent::FirePressed,
                InputEvent::FireReleased,
                InputEvent::FirePressed,
            ]
        );
    }
}
