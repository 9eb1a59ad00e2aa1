use std::str::FromStr;

use crate::error::Error;

/// The six movement keys, sampled once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl KeyState {
    pub const IDLE: KeyState = KeyState {
        forward: false,
        backward: false,
        strafe_left: false,
        strafe_right: false,
        rotate_left: false,
        rotate_right: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    /// Set the flag bound to a script key (`w` `s` `a` `d` `l` `r`).
    fn press(&mut self, key: char) -> bool {
        match key.to_ascii_lowercase() {
            'w' => self.forward = true,
            's' => self.backward = true,
            'a' => self.strafe_left = true,
            'd' => self.strafe_right = true,
            'l' => self.rotate_left = true,
            'r' => self.rotate_right = true,
            _ => return false,
        }
        true
    }
}

/// A headless stand-in for live keyboard state: a list of held-key segments.
///
/// Written as comma-separated `KEYS*FRAMES` segments, e.g. `w*30,l*10,wd*5,-*4`.
/// `KEYS` is any combination of `w` (forward), `s` (back), `a`/`d` (strafe
/// left/right) and `l`/`r` (rotate left/right), or `-` for no keys. `*FRAMES`
/// defaults to one frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputScript {
    segments: Vec<(KeyState, usize)>,
}

impl InputScript {
    pub fn total_frames(&self) -> usize {
        self.segments.iter().map(|(_, n)| n).sum()
    }

    /// Keys held during `frame`. Frames past the end of the script are idle.
    pub fn keys_for_frame(&self, frame: usize) -> KeyState {
        let mut remaining = frame;
        for (keys, count) in &self.segments {
            if remaining < *count {
                return *keys;
            }
            remaining -= count;
        }
        KeyState::IDLE
    }
}

impl FromStr for InputScript {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut segments = Vec::new();
        for segment in s.split(',').map(str::trim).filter(|seg| !seg.is_empty()) {
            let (keys, count) = match segment.split_once('*') {
                Some((keys, count)) => {
                    let count = count.trim().parse::<usize>().map_err(|_| {
                        Error::InputScript(format!("bad frame count in {segment:?}"))
                    })?;
                    (keys.trim(), count)
                }
                None => (segment, 1),
            };

            let mut state = KeyState::IDLE;
            if keys != "-" {
                if keys.is_empty() {
                    return Err(Error::InputScript(format!("no keys in {segment:?}")));
                }
                for key in keys.chars() {
                    if !state.press(key) {
                        return Err(Error::InputScript(format!(
                            "unknown key {key:?} in {segment:?}"
                        )));
                    }
                }
            }
            segments.push((state, count));
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segments() {
        let script: InputScript = "w*3, ld*2,-*1,s".parse().unwrap();
        assert_eq!(script.total_frames(), 7);

        assert!(script.keys_for_frame(0).forward);
        assert!(script.keys_for_frame(2).forward);

        let turn = script.keys_for_frame(3);
        assert!(turn.rotate_left && turn.strafe_right && !turn.forward);

        assert!(script.keys_for_frame(5).is_idle());
        assert!(script.keys_for_frame(6).backward);
        assert!(script.keys_for_frame(100).is_idle());
    }

    #[test]
    fn empty_script_is_idle() {
        let script: InputScript = "".parse().unwrap();
        assert_eq!(script.total_frames(), 0);
        assert!(script.keys_for_frame(0).is_idle());
    }

    #[test]
    fn rejects_bad_segments() {
        assert!("x*3".parse::<InputScript>().is_err());
        assert!("w*three".parse::<InputScript>().is_err());
        assert!("*3".parse::<InputScript>().is_err());
    }
}
