/// A closed range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Returns a copy with `max` lowered to `max`, used to shrink the search
    /// window as closer hits are found.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Positive ray parameters beyond `min`.
    pub const fn beyond(min: f32) -> Interval {
        Interval {
            min,
            max: f32::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));
    }

    #[test]
    fn test_interval_beyond() {
        let window = Interval::beyond(1e-3);

        assert!(!window.surrounds(1e-3));
        assert!(!window.surrounds(0.0));
        assert!(window.surrounds(1e6));
        assert!(!window.surrounds(f32::INFINITY));
    }

    #[test]
    fn test_interval_with_max() {
        let window = Interval::beyond(0.001).with_max(4.0);
        assert!(window.surrounds(3.9));
        assert!(!window.surrounds(4.0));
    }
}
