use std::time::{Duration, Instant};

/// Character-by-character text reveal for the banner tagline
///
/// Advanced from the animation tick; reveals one character per interval and
/// stays complete once the full text is out.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    revealed_bytes: usize,
    interval: Duration,
    last_reveal: Instant,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval_ms: u64) -> Self {
        Self {
            text: text.into(),
            revealed_bytes: 0,
            interval: Duration::from_millis(interval_ms),
            last_reveal: Instant::now(),
        }
    }

    /// The revealed prefix
    pub fn visible(&self) -> &str {
        &self.text[..self.revealed_bytes]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_bytes >= self.text.len()
    }

    /// Reveal every character whose interval has elapsed
    ///
    /// The tick rate is coarser than the reveal interval, so one tick may owe
    /// several characters. `last_reveal` advances by whole intervals rather
    /// than to `now`, which carries the sub-interval remainder into the next
    /// tick and keeps the average cadence at exactly one character per
    /// interval.
    pub fn tick(&mut self) {
        if self.is_complete() {
            return;
        }
        if self.interval.is_zero() {
            self.reveal_one();
            return;
        }

        while !self.is_complete() && self.last_reveal.elapsed() >= self.interval {
            self.reveal_one();
            self.last_reveal += self.interval;
        }
    }

    fn reveal_one(&mut self) {
        if let Some(ch) = self.text[self.revealed_bytes..].chars().next() {
            self.revealed_bytes += ch.len_utf8();
        }
    }

    #[cfg(test)]
    fn backdate(&mut self, by: Duration) {
        self.last_reveal -= by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_tick() {
        // Zero interval: every tick reveals a character
        let mut tw = Typewriter::new("abc", 0);
        assert_eq!(tw.visible(), "");

        tw.tick();
        assert_eq!(tw.visible(), "a");
        tw.tick();
        assert_eq!(tw.visible(), "ab");
        tw.tick();
        assert_eq!(tw.visible(), "abc");
        assert!(tw.is_complete());
    }

    #[test]
    fn test_stays_complete() {
        let mut tw = Typewriter::new("hi", 0);
        for _ in 0..10 {
            tw.tick();
        }
        assert_eq!(tw.visible(), "hi");
        assert!(tw.is_complete());
    }

    #[test]
    fn test_multibyte_boundaries() {
        let mut tw = Typewriter::new("héllo", 0);
        tw.tick();
        tw.tick();
        assert_eq!(tw.visible(), "hé");
    }

    #[test]
    fn test_interval_gates_reveal() {
        let mut tw = Typewriter::new("abc", 10_000);
        tw.tick();
        tw.tick();
        // Interval has not elapsed, nothing revealed yet
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_empty_text_complete_immediately() {
        let tw = Typewriter::new("", 0);
        assert!(tw.is_complete());
    }

    #[test]
    fn test_catches_up_and_carries_remainder() {
        let mut tw = Typewriter::new("abcd", 10_000);

        // Two full intervals plus 4 s owed after one coarse tick
        tw.backdate(Duration::from_secs(24));
        tw.tick();
        assert_eq!(tw.visible(), "ab");

        // The carried 4 s plus 6 s completes the third interval
        tw.backdate(Duration::from_secs(6));
        tw.tick();
        assert_eq!(tw.visible(), "abc");
    }

    #[test]
    fn test_catch_up_stops_at_text_end() {
        let mut tw = Typewriter::new("hi", 50);
        tw.backdate(Duration::from_secs(10));
        tw.tick();
        assert_eq!(tw.visible(), "hi");
        assert!(tw.is_complete());
    }
}
