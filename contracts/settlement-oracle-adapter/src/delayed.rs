//! Owner-controlled parameters that take effect only after an activation delay.
//!
//! Activation is lazy: once `activation_time` has passed, [`DelayedParameter::active`]
//! returns the pending value without any further write.

/// Delay between scheduling an update and the new value taking effect (1 day).
pub const ACTIVATION_DELAY: u64 = 86_400;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DelayedUpdateError {
    /// An update is scheduled and has not activated yet.
    PendingUpdate,
    /// Nothing is pending, or the pending value is already in effect.
    AlreadyActive,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayedParameter<T> {
    pub previous: T,
    pub current: T,
    pub pending: T,
    /// 0 when no update has been scheduled.
    pub activation_time: u64,
}

impl<T: Clone> DelayedParameter<T> {
    pub fn new(value: T) -> Self {
        Self {
            previous: value.clone(),
            current: value.clone(),
            pending: value,
            activation_time: 0,
        }
    }

    pub fn is_activated(&self, now: u64) -> bool {
        self.activation_time != 0 && now >= self.activation_time
    }

    pub fn has_pending_update(&self, now: u64) -> bool {
        self.activation_time > now
    }

    /// The value in effect at `now`.
    pub fn active(&self, now: u64) -> &T {
        if self.is_activated(now) {
            &self.pending
        } else {
            &self.current
        }
    }

    /// The most recently scheduled value, whether or not it is active yet.
    pub fn latest(&self) -> &T {
        &self.pending
    }

    /// Schedules `value` to take effect at `now + delay` and returns the
    /// activation time.
    pub fn schedule(&mut self, value: T, now: u64, delay: u64) -> Result<u64, DelayedUpdateError> {
        if self.has_pending_update(now) {
            return Err(DelayedUpdateError::PendingUpdate);
        }

        let active = self.active(now).clone();
        self.previous = active.clone();
        self.current = active;
        self.pending = value;
        self.activation_time = now.saturating_add(delay);

        Ok(self.activation_time)
    }

    /// Cancels a scheduled update that has not activated yet. The value in
    /// effect is left untouched.
    pub fn revoke(&mut self, now: u64) -> Result<(), DelayedUpdateError> {
        if !self.has_pending_update(now) {
            return Err(DelayedUpdateError::AlreadyActive);
        }

        self.pending = self.current.clone();
        self.activation_time = 0;

        Ok(())
    }
}
