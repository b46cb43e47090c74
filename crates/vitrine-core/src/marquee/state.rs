/// Direction a track scrolls along its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Offset grows toward the threshold, wraps back to zero
    Forward,
    /// Offset shrinks toward zero, wraps back to the threshold
    Reverse,
}

/// Per-track scroll state advanced once per animation tick
///
/// The wrap threshold is the rendered extent of one non-duplicated copy of
/// the track (half of the doubled content), measured by the render surface
/// in cells. While the threshold is zero the track has nothing to loop over
/// and ticks are no-ops.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: f64,
    speed: f64,
    threshold: f64,
    direction: ScrollDirection,
    paused_pointer: bool,
    paused_toggle: bool,
}

impl ScrollState {
    pub fn new(speed: f64, direction: ScrollDirection) -> Self {
        Self {
            offset: 0.0,
            speed,
            threshold: 0.0,
            direction,
            paused_pointer: false,
            paused_toggle: false,
        }
    }

    /// Current offset along the scroll axis, in cells
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset truncated to whole cells for rendering
    #[inline]
    pub fn offset_cells(&self) -> usize {
        self.offset.max(0.0) as usize
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Whether the loop is running at all (zero extent means no animation)
    #[inline]
    pub fn is_running(&self) -> bool {
        self.threshold > 0.0
    }

    /// Paused while either pause source is set
    ///
    /// Pointer hover and the click/key toggle are independent sources
    /// combined with OR; releasing one never clears the other.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_pointer || self.paused_toggle
    }

    pub fn set_pointer_pause(&mut self, paused: bool) {
        self.paused_pointer = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused_toggle = !self.paused_toggle;
    }

    /// Set the wrap threshold after (re)measuring the track extent
    ///
    /// Called on initial layout, after an incremental append, and when the
    /// scroll axis changes. An offset left outside the new loop is pulled
    /// back inside it.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold.max(0.0);
        if self.threshold == 0.0 {
            self.offset = 0.0;
        } else if self.offset >= self.threshold {
            self.offset %= self.threshold;
        }
    }

    /// Advance one animation frame
    ///
    /// O(1): pure arithmetic, no allocation. Paused or non-running states
    /// leave the offset untouched; the caller keeps ticking regardless, so
    /// resuming needs no re-arming.
    pub fn tick(&mut self) {
        if !self.is_running() || self.is_paused() {
            return;
        }

        match self.direction {
            ScrollDirection::Forward => {
                self.offset += self.speed;
                if self.offset >= self.threshold {
                    self.offset = 0.0;
                }
            }
            ScrollDirection::Reverse => {
                self.offset -= self.speed;
                if self.offset <= 0.0 {
                    self.offset = self.threshold;
                }
            }
        }
    }

    /// Reset to the direction's starting boundary
    pub fn reset(&mut self) {
        self.offset = match self.direction {
            ScrollDirection::Forward => 0.0,
            ScrollDirection::Reverse => self.threshold,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_wraps_to_zero() {
        let mut state = ScrollState::new(3.0, ScrollDirection::Forward);
        state.set_threshold(10.0);

        state.tick();
        state.tick();
        state.tick();
        assert_eq!(state.offset(), 9.0);

        state.tick(); // 12 >= 10, wraps
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn test_forward_offset_stays_inside_loop() {
        let mut state = ScrollState::new(0.7, ScrollDirection::Forward);
        state.set_threshold(5.0);

        for _ in 0..1000 {
            state.tick();
            assert!(state.offset() >= 0.0);
            assert!(state.offset() < state.threshold());
        }
    }

    #[test]
    fn test_reverse_wraps_to_threshold() {
        let mut state = ScrollState::new(1.0, ScrollDirection::Reverse);
        state.set_threshold(4.0);

        state.tick(); // 0 - 1 <= 0, wraps to threshold
        assert_eq!(state.offset(), 4.0);

        state.tick();
        assert_eq!(state.offset(), 3.0);

        for _ in 0..1000 {
            state.tick();
            assert!(state.offset() > 0.0);
            assert!(state.offset() <= state.threshold());
        }
    }

    #[test]
    fn test_paused_never_moves() {
        let mut state = ScrollState::new(2.0, ScrollDirection::Forward);
        state.set_threshold(100.0);
        state.tick();
        let at_pause = state.offset();

        state.set_pointer_pause(true);
        for _ in 0..50 {
            state.tick();
        }
        assert_eq!(state.offset(), at_pause);

        state.set_pointer_pause(false);
        state.tick();
        assert!(state.offset() > at_pause);
    }

    #[test]
    fn test_pause_sources_compose_with_or() {
        let mut state = ScrollState::new(1.0, ScrollDirection::Forward);
        state.set_threshold(100.0);

        state.set_pointer_pause(true);
        state.toggle_pause();
        assert!(state.is_paused());

        // Leaving hover while the toggle is still set keeps it paused
        state.set_pointer_pause(false);
        assert!(state.is_paused());

        state.toggle_pause();
        assert!(!state.is_paused());
    }

    #[test]
    fn test_zero_threshold_never_moves() {
        let mut state = ScrollState::new(5.0, ScrollDirection::Forward);
        assert!(!state.is_running());

        for _ in 0..100 {
            state.tick();
        }
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn test_threshold_shrink_reclamps_offset() {
        let mut state = ScrollState::new(1.0, ScrollDirection::Forward);
        state.set_threshold(50.0);
        for _ in 0..30 {
            state.tick();
        }
        assert_eq!(state.offset(), 30.0);

        state.set_threshold(8.0);
        assert!(state.offset() < 8.0);
    }

    #[test]
    fn test_threshold_growth_after_append_keeps_offset() {
        let mut state = ScrollState::new(1.0, ScrollDirection::Forward);
        state.set_threshold(10.0);
        for _ in 0..7 {
            state.tick();
        }

        // More items arrived, extent grew
        state.set_threshold(25.0);
        assert_eq!(state.offset(), 7.0);
    }

    #[test]
    fn test_reset_to_direction_boundary() {
        let mut forward = ScrollState::new(1.0, ScrollDirection::Forward);
        forward.set_threshold(10.0);
        forward.tick();
        forward.reset();
        assert_eq!(forward.offset(), 0.0);

        let mut reverse = ScrollState::new(1.0, ScrollDirection::Reverse);
        reverse.set_threshold(10.0);
        reverse.reset();
        assert_eq!(reverse.offset(), 10.0);
    }
}
