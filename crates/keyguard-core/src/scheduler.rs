//! Transient message scheduling.
//!
//! A transient message is shown in a region and cleared again after a fixed
//! delay. Each message is a pair of timers: a zero-delay "show" and a delayed
//! "clear". Showing a new message in a region first cancels the exact timers
//! of the previous pair, so a stale clear can never wipe a fresh message and a
//! stale show can never reappear after a fresh clear.
//!
//! The scheduler holds no clock. Callers pass `now` in, ask for
//! [`MessageScheduler::next_deadline`], and [`MessageScheduler::poll`] once
//! that instant has been reached.

use std::{collections::BTreeMap, ops::Add, time::Duration};

use crate::{layout::Region, resources::Icon};

/// Delay between showing a transient message and clearing it.
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_millis(3500);

/// Handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Which half of a show/clear pair a timer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Sets the message.
    Show,
    /// Clears the region.
    Clear,
}

/// Content to put into a region when a timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionContent {
    /// Target region.
    pub region: Region,
    /// Text, empty when clearing.
    pub text: String,
    /// Icon, `None` when clearing.
    pub icon: Option<Icon>,
}

impl RegionContent {
    /// Empty content for `region`.
    pub fn cleared(region: Region) -> Self {
        Self { region, text: String::new(), icon: None }
    }

    /// Whether this content clears the region.
    pub fn is_cleared(&self) -> bool {
        self.text.is_empty() && self.icon.is_none()
    }
}

#[derive(Debug, Clone)]
struct Timer<I> {
    kind: TimerKind,
    deadline: I,
    content: RegionContent,
}

/// Cancel-and-reschedule scheduler for transient messages.
///
/// # Invariants
///
/// - At most one show and one clear timer are pending per region.
/// - Timers fire in deadline order; ties fire in scheduling order.
#[derive(Debug, Clone)]
pub struct MessageScheduler<I> {
    duration: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer<I>>,
    pairs: BTreeMap<Region, [TimerId; 2]>,
}

impl<I> Default for MessageScheduler<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_DURATION)
    }
}

impl<I> MessageScheduler<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Scheduler clearing messages after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration, next_id: 0, timers: BTreeMap::new(), pairs: BTreeMap::new() }
    }

    /// Delay before a message is cleared.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `text` with `icon` in `region` now, and clear it after the delay.
    ///
    /// Cancels the previous pair for `region` first. Returns the show and
    /// clear handles.
    pub fn show(&mut self, now: I, region: Region, text: &str, icon: Icon) -> [TimerId; 2] {
        if self.cancel_region(region) {
            tracing::debug!(%region, "rescheduling transient message");
        }

        let show = self.schedule(now, TimerKind::Show, RegionContent {
            region,
            text: text.to_string(),
            icon: Some(icon),
        });
        let clear =
            self.schedule(now + self.duration, TimerKind::Clear, RegionContent::cleared(region));

        self.pairs.insert(region, [show, clear]);
        [show, clear]
    }

    fn schedule(&mut self, deadline: I, kind: TimerKind, content: RegionContent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { kind, deadline, content });
        id
    }

    /// Cancel one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel the pair for `region`. Returns `true` if any of its timers was
    /// still pending.
    pub fn cancel_region(&mut self, region: Region) -> bool {
        let Some(pair) = self.pairs.remove(&region) else { return false };
        pair.into_iter().filter(|id| self.cancel(*id)).count() > 0
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            tracing::debug!(pending = self.timers.len(), "cancelling all transient timers");
        }
        self.timers.clear();
        self.pairs.clear();
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<I> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Fire every timer due at `now`, in deadline order.
    pub fn poll(&mut self, now: I) -> Vec<RegionContent> {
        let mut due: Vec<(I, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (timer.deadline, *id))
            .collect();
        due.sort();

        let mut fired = Vec::with_capacity(due.len());
        for (_, id) in due {
            let Some(timer) = self.timers.remove(&id) else { continue };
            if timer.kind == TimerKind::Clear
                && self.pairs.get(&timer.content.region).is_some_and(|pair| pair[1] == id)
            {
                self.pairs.remove(&timer.content.region);
            }
            fired.push(timer.content);
        }
        fired
    }

    /// Pending timers targeting `region`.
    pub fn pending(&self, region: Region) -> Vec<(TimerId, TimerKind)> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.content.region == region)
            .map(|(id, timer)| (*id, timer.kind))
            .collect()
    }

    /// Whether no timer is pending.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Milliseconds since an arbitrary origin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl Add<Duration> for Ms {
        type Output = Ms;

        fn add(self, rhs: Duration) -> Ms {
            Ms(self.0 + rhs.as_millis() as u64)
        }
    }

    fn scheduler() -> MessageScheduler<Ms> {
        MessageScheduler::default()
    }

    #[test]
    fn show_then_clear() {
        let mut s = scheduler();
        s.show(Ms(0), Region::ScreenLocked, "Sound is OFF", Icon::RingerOff);

        let shown = s.poll(Ms(0));
        assert_eq!(shown, vec![RegionContent {
            region: Region::ScreenLocked,
            text: "Sound is OFF".into(),
            icon: Some(Icon::RingerOff),
        }]);
        assert_eq!(s.next_deadline(), Some(Ms(3500)));

        assert!(s.poll(Ms(3499)).is_empty());
        assert_eq!(s.poll(Ms(3500)), vec![RegionContent::cleared(Region::ScreenLocked)]);
        assert!(s.is_idle());
    }

    #[test]
    fn reschedule_cancels_exact_previous_pair() {
        let mut s = scheduler();
        let [show1, clear1] = s.show(Ms(0), Region::ScreenLocked, "first", Icon::RingerOff);
        let [show2, clear2] = s.show(Ms(10), Region::ScreenLocked, "second", Icon::RingerOn);

        assert_eq!(s.pending(Region::ScreenLocked), vec![
            (show2, TimerKind::Show),
            (clear2, TimerKind::Clear)
        ]);
        assert!(!s.cancel(show1));
        assert!(!s.cancel(clear1));

        let fired = s.poll(Ms(3600));
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].text, "second");
        assert!(fired[1].is_cleared());
        assert!(s.is_idle());
    }

    #[test]
    fn stale_clear_does_not_wipe_fresh_message() {
        let mut s = scheduler();
        s.show(Ms(0), Region::ScreenLocked, "first", Icon::RingerOff);
        let _ = s.poll(Ms(0));
        s.show(Ms(3000), Region::ScreenLocked, "second", Icon::RingerOn);
        let _ = s.poll(Ms(3000));

        // First pair's clear would have fired here.
        assert!(s.poll(Ms(3500)).is_empty());
        assert_eq!(s.poll(Ms(6500)), vec![RegionContent::cleared(Region::ScreenLocked)]);
    }

    #[test]
    fn cancel_region_drops_pending_clear() {
        let mut s = scheduler();
        s.show(Ms(0), Region::ScreenLocked, "a", Icon::RingerOff);
        s.show(Ms(0), Region::StatusLine1, "b", Icon::Alarm);
        let _ = s.poll(Ms(0));

        assert!(s.cancel_region(Region::ScreenLocked));
        assert!(!s.cancel_region(Region::ScreenLocked));
        assert!(s.pending(Region::ScreenLocked).is_empty());
        assert_eq!(s.poll(Ms(3500)), vec![RegionContent::cleared(Region::StatusLine1)]);
    }

    #[test]
    fn regions_are_independent() {
        let mut s = scheduler();
        s.show(Ms(0), Region::ScreenLocked, "a", Icon::RingerOff);
        s.show(Ms(0), Region::StatusLine1, "b", Icon::Alarm);

        assert_eq!(s.pending(Region::ScreenLocked).len(), 2);
        assert_eq!(s.pending(Region::StatusLine1).len(), 2);
    }

    #[test]
    fn cancel_all_empties_scheduler() {
        let mut s = scheduler();
        s.show(Ms(0), Region::ScreenLocked, "a", Icon::RingerOff);
        s.cancel_all();

        assert!(s.is_idle());
        assert_eq!(s.next_deadline(), None);
        assert!(s.poll(Ms(10_000)).is_empty());
    }
}
