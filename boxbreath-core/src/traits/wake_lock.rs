//! Stay-awake grant trait

/// Errors from stay-awake grant operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeLockError {
    /// Host has no stay-awake facility
    Unsupported,
    /// Host refused the request (hidden page, power saver, policy)
    NotAllowed,
    /// Releasing the grant failed
    ReleaseFailed,
}

impl core::fmt::Display for WakeLockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WakeLockError::Unsupported => f.write_str("wake lock unsupported"),
            WakeLockError::NotAllowed => f.write_str("wake lock not allowed"),
            WakeLockError::ReleaseFailed => f.write_str("wake lock release failed"),
        }
    }
}

/// Trait for keeping the display awake
///
/// Grants are best-effort. The host may revoke a grant at any time (for
/// example when the page is hidden); it reports that separately so the
/// holder can drop its sentinel.
pub trait WakeLock {
    /// Handle for a granted lock
    ///
    /// Compared against the handle in a host release notice, so each grant
    /// must compare unequal to every other grant.
    type Sentinel: PartialEq;

    /// Check if the host offers a stay-awake facility at all
    fn is_supported(&self) -> bool;

    /// Request a screen stay-awake grant
    fn request(&mut self) -> impl core::future::Future<Output = Result<Self::Sentinel, WakeLockError>>;

    /// Release a previously granted lock
    fn release(
        &mut self,
        sentinel: Self::Sentinel,
    ) -> impl core::future::Future<Output = Result<(), WakeLockError>>;
}
