//! Discrete navigation events produced by the physical keys.
//!
//! [`InputEvent`] is the closed input alphabet of the menu. The meaning of
//! each key is navigation grammar rather than per-widget behavior:
//!
//! | Event    | In a list                     | While editing a value            |
//! |----------|-------------------------------|----------------------------------|
//! | `Up`     | move the cursor up            | one step up                      |
//! | `Down`   | move the cursor down          | one step down                    |
//! | `Right`  | descend into the child context| coarse step up / next choice     |
//! | `Left`   | ascend to the parent context  | coarse step down / previous choice |
//! | `Cancel` | exit the context              | abort the edit, restore the value|
//! | `Ok`     | toggle / enter edit / invoke  | commit the edit                  |
//!
//! Debouncing and key repeat belong to whoever produces the events.

/// One key press. `None` means no key is down.
///
/// The discriminants are the key codes used on the wire and by the
/// firmware's button table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InputEvent {
    #[default]
    None = 0,
    Up = 1,
    Right = 2,
    Down = 3,
    Left = 4,
    Cancel = 5,
    Ok = 6,
}

impl InputEvent {
    /// Every event, in key-code order.
    pub const ALL: [InputEvent; 7] = [
        InputEvent::None,
        InputEvent::Up,
        InputEvent::Right,
        InputEvent::Down,
        InputEvent::Left,
        InputEvent::Cancel,
        InputEvent::Ok,
    ];

    /// Decode a key code. Returns `None` for codes above 6.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` for every event except [`InputEvent::None`].
    pub fn is_press(self) -> bool {
        self != InputEvent::None
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, InputEvent::Up | InputEvent::Down)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, InputEvent::Left | InputEvent::Right)
    }

    /// Direction of a vertical or horizontal event as a step sign:
    /// `Up`/`Right` are `+1`, `Down`/`Left` are `-1`, anything else `0`.
    pub fn direction(self) -> i32 {
        match self {
            InputEvent::Up | InputEvent::Right => 1,
            InputEvent::Down | InputEvent::Left => -1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for event in InputEvent::ALL {
            assert_eq!(InputEvent::from_code(event.code()), Some(event));
        }
        assert_eq!(InputEvent::Ok.code(), 6);
        assert_eq!(InputEvent::from_code(7), None);
        assert_eq!(InputEvent::from_code(255), None);
    }

    #[test]
    fn default_is_none() {
        assert_eq!(InputEvent::default(), InputEvent::None);
        assert!(!InputEvent::None.is_press());
        assert!(InputEvent::Cancel.is_press());
    }

    #[test]
    fn axis_classification() {
        assert!(InputEvent::Up.is_vertical());
        assert!(InputEvent::Down.is_vertical());
        assert!(!InputEvent::Left.is_vertical());
        assert!(InputEvent::Left.is_horizontal());
        assert!(InputEvent::Right.is_horizontal());
        assert!(!InputEvent::Ok.is_horizontal());
    }

    #[test]
    fn direction_signs() {
        assert_eq!(InputEvent::Up.direction(), 1);
        assert_eq!(InputEvent::Right.direction(), 1);
        assert_eq!(InputEvent::Down.direction(), -1);
        assert_eq!(InputEvent::Left.direction(), -1);
        assert_eq!(InputEvent::Ok.direction(), 0);
    }
}
