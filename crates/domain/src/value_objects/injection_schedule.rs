//! When a scheduled injection fires

use serde::Serialize;

use crate::errors::DomainError;

/// Skip the first `skip` calls at a site, then fire on the next `fire` calls
///
/// Calls are numbered from zero in the order the registry observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InjectionSchedule {
    skip: u32,
    fire: u32,
}

impl InjectionSchedule {
    /// Create a schedule
    ///
    /// # Errors
    ///
    /// Returns an error if `fire` is zero, since such an injection could
    /// never fire.
    pub fn new(skip: u32, fire: u32) -> Result<Self, DomainError> {
        if fire == 0 {
            return Err(DomainError::ValidationError(
                "fire count must be greater than 0".to_string(),
            ));
        }
        Ok(Self { skip, fire })
    }

    /// Fire on the very first call only
    pub const fn once() -> Self {
        Self { skip: 0, fire: 1 }
    }

    /// Fire on the first `u32::MAX` calls, the widest window a schedule holds
    ///
    /// Later calls do not fire.
    pub const fn unbounded() -> Self {
        Self {
            skip: 0,
            fire: u32::MAX,
        }
    }

    /// Number of calls skipped before the first firing
    pub const fn skip(&self) -> u32 {
        self.skip
    }

    /// Number of calls that fire
    pub const fn fire(&self) -> u32 {
        self.fire
    }

    /// Whether the call with the given zero-based index fires
    pub fn fires_at(&self, call_index: u64) -> bool {
        let skip = u64::from(self.skip);
        call_index >= skip && call_index - skip < u64::from(self.fire)
    }
}

impl Default for InjectionSchedule {
    fn default() -> Self {
        Self::once()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_first_call_only() {
        let schedule = InjectionSchedule::once();
        assert!(schedule.fires_at(0));
        assert!(!schedule.fires_at(1));
    }

    #[test]
    fn skip_then_fire_window() {
        let schedule = InjectionSchedule::new(2, 3).unwrap();
        let fired: Vec<bool> = (0..7).map(|i| schedule.fires_at(i)).collect();
        assert_eq!(fired, [false, false, true, true, true, false, false]);
    }

    #[test]
    fn zero_fire_is_rejected() {
        assert!(InjectionSchedule::new(0, 0).is_err());
    }

    #[test]
    fn unbounded_fires_up_to_u32_max_calls() {
        let schedule = InjectionSchedule::unbounded();
        let last = u64::from(u32::MAX) - 1;
        assert!(schedule.fires_at(0));
        assert!(schedule.fires_at(1_000_000));
        assert!(schedule.fires_at(last));
        assert!(!schedule.fires_at(last + 1));
    }

    #[test]
    fn default_is_once() {
        assert_eq!(InjectionSchedule::default(), InjectionSchedule::once());
    }
}
