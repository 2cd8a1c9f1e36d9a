use std::collections::HashMap;

const DEFAULT_TILT: i32 = 15;
const MAX_TILT: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleDepth,
    ToggleRgb,
    ToggleIr,
    TiltUp,
    TiltDown,
}

/// Input symbol to command table.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, command: Command) -> &mut Self {
        self.bindings.insert(key, command);
        self
    }

    pub fn dispatch(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();

        map.bind(Key::Char('q'), Command::Quit)
            .bind(Key::Char('Q'), Command::Quit)
            .bind(Key::Char('d'), Command::ToggleDepth)
            .bind(Key::Char('r'), Command::ToggleRgb)
            .bind(Key::Char('i'), Command::ToggleIr)
            .bind(Key::Up, Command::TiltUp)
            .bind(Key::Down, Command::TiltDown);

        map
    }
}

/// Stream and motor state the controls drive. RGB and IR share the video
/// stream, so enabling one disables the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorToggles {
    pub depth: bool,
    pub rgb: bool,
    pub ir: bool,
    /// Motor tilt in degrees `[0, 30]`
    tilt: i32,
}

impl SensorToggles {
    pub fn tilt(&self) -> i32 {
        self.tilt
    }

    /// Returns `false` once the session should stop.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::ToggleDepth => self.depth = !self.depth,
            Command::ToggleRgb => {
                self.rgb = !self.rgb;
                if self.rgb {
                    self.ir = false;
                }
            }
            Command::ToggleIr => {
                self.ir = !self.ir;
                if self.ir {
                    self.rgb = false;
                }
            }
            Command::TiltUp => self.tilt = (self.tilt + 1).clamp(0, MAX_TILT),
            Command::TiltDown => self.tilt = (self.tilt - 1).clamp(0, MAX_TILT),
        }

        tracing::debug!(?command, state = ?self, "Applied sensor command");

        true
    }
}

impl Default for SensorToggles {
    fn default() -> Self {
        Self {
            depth: true,
            rgb: false,
            ir: false,
            tilt: DEFAULT_TILT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let map = KeyMap::default();

        assert_eq!(map.dispatch(Key::Char('Q')), Some(Command::Quit));
        assert_eq!(map.dispatch(Key::Up), Some(Command::TiltUp));
        assert_eq!(map.dispatch(Key::Char('x')), None);
    }

    #[test]
    fn rgb_and_ir_are_exclusive() {
        let mut toggles = SensorToggles::default();

        toggles.apply(Command::ToggleRgb);
        assert!(toggles.rgb && !toggles.ir);

        toggles.apply(Command::ToggleIr);
        assert!(toggles.ir && !toggles.rgb);

        toggles.apply(Command::ToggleIr);
        assert!(!toggles.ir && !toggles.rgb);
    }

    #[test]
    fn tilt_is_clamped() {
        let mut toggles = SensorToggles::default();

        for _ in 0..40 {
            toggles.apply(Command::TiltUp);
        }
        assert_eq!(toggles.tilt(), 30);

        for _ in 0..40 {
            toggles.apply(Command::TiltDown);
        }
        assert_eq!(toggles.tilt(), 0);
    }

    #[test]
    fn quit_stops() {
        let mut toggles = SensorToggles::default();

        assert!(!toggles.apply(Command::Quit));
        assert!(toggles.apply(Command::ToggleDepth));
        assert!(!toggles.depth);
    }
}
