//! Autoscroll controller
//!
//! While the hover element sits near an edge of the container the list is
//! scrolled in small steps. Each step issues one scroll request and waits
//! for the host to report that the list got there before the next one is
//! computed, so there is never more than one request in flight.
//!
//! A request the host never confirms is abandoned after a timeout. That
//! ends the loop and stalls the controller: no new request is issued until
//! the host reports a scroll again, or the drag ends.

/// Snapshot of the hover element relative to the container edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeParams {
    /// Distance from the hover's leading edge to the container start
    pub dist_top: f32,
    /// Distance from the hover's trailing edge to the container end
    pub dist_bottom: f32,
    pub scroll_offset: f32,
    /// The list is scrolled all the way to the start
    pub scrolled_up: bool,
    /// The list is scrolled all the way to the end
    pub scrolled_down: bool,
}

impl EdgeParams {
    /// Derive edge distances for a hover at `hover` of `size` in `container`
    pub fn measure(
        hover: f32,
        size: f32,
        container: f32,
        content: f32,
        scroll_offset: f32,
        tolerance: f32,
    ) -> Self {
        Self {
            dist_top: hover.max(0.0),
            dist_bottom: (container - (hover + size)).max(0.0),
            scroll_offset,
            scrolled_up: scroll_offset - tolerance <= 0.0,
            scrolled_down: scroll_offset + container + tolerance >= content,
        }
    }

    pub fn at_top_edge(&self, threshold: f32) -> bool {
        self.dist_top <= threshold
    }

    pub fn at_bottom_edge(&self, threshold: f32) -> bool {
        self.dist_bottom <= threshold
    }
}

/// A scroll request the host has not confirmed yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub target: f32,
    /// Seconds since the request was issued
    pub age: f32,
}

/// Drives the autoscroll loop
#[derive(Debug, Default)]
pub struct AutoscrollController {
    looping: bool,
    in_flight: Option<ScrollRequest>,
    /// The last request timed out and no scroll event arrived since
    stalled: bool,
    requests_issued: u64,
}

impl AutoscrollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn in_flight(&self) -> Option<&ScrollRequest> {
        self.in_flight.as_ref()
    }

    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Whether a pointer move at `params` should start the loop
    pub fn should_trigger(&self, params: &EdgeParams, threshold: f32, gesture_active: bool) -> bool {
        let at_top = params.at_top_edge(threshold);
        let at_bottom = params.at_bottom_edge(threshold);
        (at_top || at_bottom)
            && !(at_top && params.scrolled_up)
            && !(at_bottom && params.scrolled_down)
            && gesture_active
            && self.in_flight.is_none()
            && !self.stalled
    }

    /// Offset of the next step, or `None` when no step applies
    pub fn target_offset(&self, params: &EdgeParams, threshold: f32, speed: f32) -> Option<f32> {
        if self.in_flight.is_some() || threshold <= 0.0 {
            return None;
        }
        let scroll_up = params.dist_top < threshold;
        let scroll_down = params.dist_bottom < threshold;
        if !(scroll_up || scroll_down)
            || (scroll_up && params.scrolled_up)
            || (scroll_down && params.scrolled_down)
        {
            return None;
        }
        let dist = if scroll_up {
            params.dist_top
        } else {
            params.dist_bottom
        };
        let step = (1.0 - dist / threshold) * speed;
        Some(if scroll_up {
            (params.scroll_offset - step).max(0.0)
        } else {
            params.scroll_offset + step
        })
    }

    /// Enter the loop. Returns false if it is already running.
    pub fn begin(&mut self) -> bool {
        if self.looping {
            return false;
        }
        self.looping = true;
        true
    }

    /// Compute the next request, or leave the loop
    ///
    /// The loop continues while a valid target exists, the pointer is
    /// pressed and the list is not pinned in the requested direction.
    pub fn next_step(
        &mut self,
        params: &EdgeParams,
        pressed: bool,
        threshold: f32,
        speed: f32,
    ) -> Option<f32> {
        if self.stalled {
            self.looping = false;
            return None;
        }
        if !self.looping || self.in_flight.is_some() {
            return None;
        }
        let target = self.target_offset(params, threshold, speed);
        let proceed = target.filter(|&target| {
            let up_at_top = params.scrolled_up && target <= params.scroll_offset;
            let down_at_bottom = params.scrolled_down && target >= params.scroll_offset;
            pressed && !up_at_top && !down_at_bottom
        });
        match proceed {
            Some(target) => {
                self.in_flight = Some(ScrollRequest { target, age: 0.0 });
                self.requests_issued += 1;
                Some(target)
            }
            None => {
                self.looping = false;
                None
            }
        }
    }

    /// Check a scroll notification against the outstanding request
    ///
    /// Returns true when it completes the request: the list reached the
    /// target within `tolerance`, or is pinned at an end the target lies
    /// beyond. Any notification clears a stall.
    pub fn on_scroll(&mut self, params: &EdgeParams, tolerance: f32) -> bool {
        self.stalled = false;
        let Some(request) = self.in_flight else {
            return false;
        };
        let offset = params.scroll_offset;
        let arrived = (request.target - offset).abs() <= tolerance
            || (params.scrolled_up && request.target <= offset)
            || (params.scrolled_down && request.target >= offset);
        if arrived {
            self.in_flight = None;
        }
        arrived
    }

    /// Age the outstanding request; abandon it after `timeout` seconds
    ///
    /// Abandoning leaves the loop and stalls the controller. Returns true
    /// when a request was abandoned.
    pub fn expire(&mut self, dt: f32, timeout: f32) -> bool {
        let Some(request) = self.in_flight.as_mut() else {
            return false;
        };
        request.age += dt;
        if request.age < timeout {
            return false;
        }
        tracing::debug!(target = request.target, "autoscroll request timed out");
        self.in_flight = None;
        self.looping = false;
        self.stalled = true;
        true
    }

    /// Leave the loop and forget any outstanding request
    pub fn cancel(&mut self) {
        self.looping = false;
        self.in_flight = None;
        self.stalled = false;
    }
}
