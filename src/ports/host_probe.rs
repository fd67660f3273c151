use crate::inventory::domain::HostInfo;
use crate::shared::Result;

/// HostProbe port for gathering host metadata.
///
/// This port abstracts how hostname, OS identity, logged-in users and
/// network addresses are collected, so the document pipeline can be
/// tested with a stub host.
pub trait HostProbe {
    /// Gathers host information. `fetch_public_ip` opts into the
    /// external public-IP lookup; when false the probe performs no
    /// network I/O at all.
    fn probe(&self, fetch_public_ip: bool) -> Result<HostInfo>;
}
