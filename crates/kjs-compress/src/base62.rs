//! Base-62 counter behind generated identifiers.

use std::fmt;

/// Digits in ascending order of value.
const DIGITS: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Prefix of every generated name.
pub const MARKER: &str = "__";

/// Monotonic counter rendered in base 62.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base62(u64);

impl Base62 {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Advance by one.
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    /// `MARKER` followed by the current value; advances the counter.
    pub fn next_name(&mut self) -> String {
        let name = format!("{MARKER}{self}");
        self.increment();
        name
    }
}

impl fmt::Display for Base62 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0");
        }
        let mut digits = Vec::with_capacity(11);
        let mut n = self.0;
        while n != 0 {
            digits.push(DIGITS[(n % 62) as usize]);
            n /= 62;
        }
        digits.reverse();
        // DIGITS is ASCII
        f.write_str(std::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_boundaries() {
        assert_eq!(Base62::new(0).to_string(), "0");
        assert_eq!(Base62::new(9).to_string(), "9");
        assert_eq!(Base62::new(10).to_string(), "a");
        assert_eq!(Base62::new(35).to_string(), "z");
        assert_eq!(Base62::new(36).to_string(), "A");
        assert_eq!(Base62::new(61).to_string(), "Z");
        assert_eq!(Base62::new(62).to_string(), "10");
        assert_eq!(Base62::new(62 * 62 - 1).to_string(), "ZZ");
        assert_eq!(Base62::new(62 * 62).to_string(), "100");
    }

    #[test]
    fn test_name_sequence() {
        let mut counter = Base62::default();
        let names: Vec<String> = (0..12).map(|_| counter.next_name()).collect();
        assert_eq!(names[0], "__0");
        assert_eq!(names[1], "__1");
        assert_eq!(names[9], "__9");
        assert_eq!(names[10], "__a");
        assert_eq!(names[11], "__b");
        assert_eq!(counter.value(), 12);
    }
}
