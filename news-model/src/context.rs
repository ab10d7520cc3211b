//! Who is asking, and when.

use chrono::Utc;

/// Rendering mode of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Regular site rendering.
    #[default]
    Frontend,
    /// Back end rendering, including feed generation.
    Backend,
}

/// Privilege and mode of the caller, passed explicitly into every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallerContext {
    privileged: bool,
    mode: Mode,
}

impl CallerContext {
    /// Build a context from its parts.
    #[must_use]
    pub const fn new(privileged: bool, mode: Mode) -> Self {
        Self { privileged, mode }
    }

    /// A site visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::new(false, Mode::Frontend)
    }

    /// A logged-in back end user previewing the front end.
    #[must_use]
    pub const fn backend_user() -> Self {
        Self::new(true, Mode::Frontend)
    }

    /// A logged-in back end user inside the back end itself.
    #[must_use]
    pub const fn backend_render() -> Self {
        Self::new(true, Mode::Backend)
    }

    /// Whether the caller is an authenticated back end user.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Whether the request renders in back end mode.
    #[must_use]
    pub const fn is_backend_mode(&self) -> bool {
        matches!(self.mode, Mode::Backend)
    }

    /// Rendering mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

/// Source of the current Unix time.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock stopped at a fixed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Caller and timestamp captured once per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryScope {
    /// Who is asking.
    pub caller: CallerContext,
    /// Unix time the visibility window is evaluated at.
    pub now: i64,
}

impl QueryScope {
    /// Capture a scope.
    #[must_use]
    pub const fn new(caller: CallerContext, now: i64) -> Self {
        Self { caller, now }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert!(!CallerContext::anonymous().is_privileged());
        assert!(!CallerContext::anonymous().is_backend_mode());
        assert!(CallerContext::backend_user().is_privileged());
        assert!(!CallerContext::backend_user().is_backend_mode());
        assert!(CallerContext::backend_render().is_backend_mode());
        assert_eq!(CallerContext::default(), CallerContext::anonymous());
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), 1_700_000_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
