use super::TimerToken;

/// One-shot delay carrying the action to run when it fires.
///
/// Shares the countdown's discipline: scheduling replaces any pending
/// action, and a token from a cancelled or replaced activation fires nothing.
#[derive(Debug, Clone)]
pub struct Delay<A> {
    generation: u64,
    pending: Option<A>,
}

impl<A> Default for Delay<A> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<A> Delay<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, action: A) -> TimerToken {
        self.generation += 1;
        self.pending = Some(action);
        TimerToken(self.generation)
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending action if `token` is current
    pub fn fire(&mut self, token: TimerToken) -> Option<A> {
        if token.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    #[inline]
    pub fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the pending activation, if any
    #[inline]
    pub fn token(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|_| TimerToken(self.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut delay = Delay::new();
        let token = delay.schedule("advance");
        assert!(delay.is_pending());
        assert_eq!(delay.fire(token), Some("advance"));
        assert_eq!(delay.fire(token), None);
    }

    #[test]
    fn test_cancelled_token_is_stale() {
        let mut delay = Delay::new();
        let token = delay.schedule(1);
        delay.cancel();
        delay.cancel();
        assert_eq!(delay.fire(token), None);
    }

    #[test]
    fn test_reschedule_replaces_action() {
        let mut delay = Delay::new();
        let first = delay.schedule(1);
        let second = delay.schedule(2);
        assert_eq!(delay.fire(first), None);
        assert_eq!(delay.pending(), Some(&2));
        assert_eq!(delay.fire(second), Some(2));
    }
}
