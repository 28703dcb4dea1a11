//! Cloud reporting trait

use crate::reading::Reading;

/// HTTP-style status code returned by the remote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Anything below 400 counts as an accepted report
    pub const fn is_success(self) -> bool {
        self.0 < 400
    }
}

/// Errors that can occur on the network path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CloudError {
    /// Association did not complete in time
    Timeout,
    /// Hostname lookup failed
    Dns,
    /// Connection or transfer failed
    Transport,
    /// Operation needs an associated link
    NotAssociated,
}

/// Trait for the remote reporting link
///
/// Association is split from readiness so the caller can own the polling
/// loop (and its per-second progress feedback) while the implementation
/// owns the radio.
pub trait CloudLink {
    /// Kick off network association. Idempotent when already associated.
    async fn start_association(&mut self) -> Result<(), CloudError>;

    /// One readiness check; does not wait
    async fn poll_associated(&mut self) -> bool;

    /// Send one reading to the remote endpoint and return its status code
    async fn report(&mut self, reading: &Reading) -> Result<StatusCode, CloudError>;
}
