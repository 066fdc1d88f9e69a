//! Heartbeat scheduling and latency measurement

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Outcome of a heartbeat poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatDue {
    /// Interval unknown or not yet elapsed
    NotDue,
    /// A heartbeat must be sent now; the send time is already recorded
    Due {
        /// The previous heartbeat never got an ACK
        previous_unacked: bool,
    },
}

/// Point-in-time copy of the liveness fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivenessSnapshot {
    /// Heartbeat interval from HELLO, `None` until received
    pub interval: Option<Duration>,
    pub last_sent: Option<Instant>,
    pub last_ack: Option<Instant>,
    /// Whether the last heartbeat was acknowledged
    pub acked: bool,
    /// Last measured round trip, `None` until the first ACK
    pub latency: Option<Duration>,
}

#[derive(Debug, Default)]
struct Liveness {
    interval: Duration,
    // HELLO time until the first heartbeat, then the last send time
    anchor: Option<Instant>,
    last_sent: Option<Instant>,
    last_ack: Option<Instant>,
    acked: bool,
    latency: Option<Duration>,
}

/// Heartbeat bookkeeping shared between the driver and host threads
///
/// Every read and write goes through a single lock so that a send time and
/// its ACK are never observed half-updated.
#[derive(Debug, Default)]
pub struct LivenessTracker {
    inner: Mutex<Liveness>,
}

impl LivenessTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the scheduler with the interval announced by HELLO
    ///
    /// A zero interval leaves heartbeats disabled.
    pub fn start(&self, interval: Duration, now: Instant) {
        let mut inner = self.inner.lock();
        inner.interval = interval;
        inner.anchor = Some(now);
        inner.last_sent = None;
        inner.acked = false;
    }

    /// Decide whether a heartbeat is due at `now`
    ///
    /// When it is, the send is recorded before returning.
    pub fn poll_heartbeat(&self, now: Instant) -> HeartbeatDue {
        let mut inner = self.inner.lock();
        let Some(anchor) = inner.anchor else {
            return HeartbeatDue::NotDue;
        };
        if inner.interval.is_zero() || now.saturating_duration_since(anchor) < inner.interval {
            return HeartbeatDue::NotDue;
        }

        let previous_unacked = inner.last_sent.is_some() && !inner.acked;
        inner.anchor = Some(now);
        inner.last_sent = Some(now);
        inner.acked = false;
        HeartbeatDue::Due { previous_unacked }
    }

    /// Record a heartbeat ACK and return the measured latency
    ///
    /// Returns `None` when no heartbeat is outstanding.
    pub fn record_ack(&self, now: Instant) -> Option<Duration> {
        let mut inner = self.inner.lock();
        let sent = match inner.last_sent {
            Some(sent) if !inner.acked => sent,
            _ => return None,
        };

        let latency = now.saturating_duration_since(sent);
        inner.last_ack = Some(now);
        inner.acked = true;
        inner.latency = Some(latency);
        Some(latency)
    }

    /// Last measured round trip
    pub fn latency(&self) -> Option<Duration> {
        self.inner.lock().latency
    }

    pub fn snapshot(&self) -> LivenessSnapshot {
        let inner = self.inner.lock();
        LivenessSnapshot {
            interval: (!inner.interval.is_zero()).then_some(inner.interval),
            last_sent: inner.last_sent,
            last_ack: inner.last_ack,
            acked: inner.acked,
            latency: inner.latency,
        }
    }

    /// Forget the timing of the current connection
    ///
    /// Latency reads `None` again until the next connection's first ACK.
    pub fn reset(&self) {
        *self.inner.lock() = Liveness::default();
    }
}
