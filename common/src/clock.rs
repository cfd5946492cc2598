use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use spin_sleep::sleep;

use crate::span;

/// Keeps frames at a steady pace and records frame statistics.
///
/// A zero `target` disables pacing: the clock only measures. That is the mode
/// used when presentation already waits for vertical sync.
pub struct Clock {
    /// Target frame duration
    pub target: Duration,
    /// Last frame end
    last: Instant,
    /// Last frame duration
    last_dur: Duration,

    stats: ClockStats,
    /// Frame durations history (seconds)
    frame_durs: VecDeque<f32>,
    /// Busy part of frame durations history (seconds)
    frame_busy_durs: VecDeque<f32>,
}

impl Clock {
    pub const HISTORY_LENGTH: usize = 100;

    pub fn new(target: Duration) -> Self {
        Self {
            target,
            last: Instant::now(),
            last_dur: target,
            stats: ClockStats::new(),
            frame_durs: VecDeque::with_capacity(Self::HISTORY_LENGTH),
            frame_busy_durs: VecDeque::with_capacity(Self::HISTORY_LENGTH),
        }
    }

    pub fn stats(&self) -> ClockStats {
        self.stats.clone()
    }

    /// Frame duration for `fps` frames per second. Zero fps means unpaced.
    pub fn fps_to_duration(fps: u32) -> Duration {
        if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        }
    }

    /// Get last frame duration
    pub fn duration(&self) -> Duration {
        self.last_dur
    }

    pub fn tick(&mut self) {
        span!(_guard, "Clock::tick");

        let now = Instant::now();
        // Time spent working on the frame since the last tick
        let busy = now.duration_since(self.last);

        self.stats.update(&self.frame_durs, &self.frame_busy_durs);

        if let Some(sleep_dur) = self.target.checked_sub(busy) {
            if !sleep_dur.is_zero() {
                sleep(sleep_dur);
            }
        }

        let after = Instant::now();
        self.last_dur = after.duration_since(self.last);

        push_bounded(&mut self.frame_durs, self.last_dur.as_secs_f32());
        push_bounded(&mut self.frame_busy_durs, busy.as_secs_f32());

        self.stats.total += self.last_dur;
        self.stats.frames += 1;
        self.last = after;
    }
}

fn push_bounded(history: &mut VecDeque<f32>, value: f32) {
    if history.len() >= Clock::HISTORY_LENGTH {
        history.pop_front();
    }
    history.push_back(value);
}

#[derive(Clone, Debug, Default)]
pub struct ClockStats {
    /// Total clock duration
    pub total: Duration,
    /// Frames ticked so far
    pub frames: u64,
    /// Average busy frame duration
    pub avg_frame_dur: Duration,
    /// Average frames per second
    pub avg_fps: f32,
}

impl ClockStats {
    pub const fn new() -> Self {
        Self {
            total: Duration::ZERO,
            frames: 0,
            avg_frame_dur: Duration::ZERO,
            avg_fps: 0.0,
        }
    }

    pub fn update(&mut self, frame_durs: &VecDeque<f32>, frame_busy_durs: &VecDeque<f32>) {
        self.avg_frame_dur = Duration::from_secs_f32(
            frame_busy_durs.iter().sum::<f32>() / frame_busy_durs.len().max(1) as f32,
        );

        let avg = frame_durs.iter().sum::<f32>() / frame_durs.len().max(1) as f32;
        self.avg_fps = if avg > 0.0 { 1.0 / avg } else { 0.0 };
    }
}
