//! Quiet-period debouncing of an input value

use std::time::{Duration, Instant};

/// Default quiet period of the search inputs
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Holds the latest input and releases it once no change happened for the
/// quiet period. Time is passed in explicitly.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T: Clone> Debounce<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record a new input at `now`; restarts the quiet period
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// When the pending value settles, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its quiet period has passed at `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Wait for the pending value to settle
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline.into()).await;
        self.poll(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DEFAULT_QUIET_PERIOD);
        d.set("jo".to_string(), t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(499)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(500)).as_deref(), Some("jo"));
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_typing_restarts_the_period() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DEFAULT_QUIET_PERIOD);
        d.set("j".to_string(), t0);
        d.set("jo".to_string(), t0 + Duration::from_millis(300));
        d.set("john".to_string(), t0 + Duration::from_millis(600));
        assert_eq!(d.poll(t0 + Duration::from_millis(900)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(1100)).as_deref(), Some("john"));
    }

    #[tokio::test]
    async fn test_settled_waits() {
        let mut d = Debounce::new(Duration::from_millis(20));
        d.set(7u32, Instant::now());
        assert_eq!(d.settled().await, Some(7));
        assert!(!d.is_pending());
    }
}
