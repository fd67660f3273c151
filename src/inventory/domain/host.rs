use super::component_ref::ComponentRef;

/// Descriptive metadata about the scanned host, attached to the root
/// node of every generated document.
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub users: Vec<String>,
    pub local_ips: Vec<String>,
    pub public_ip: Option<String>,
}

impl HostInfo {
    /// The synthetic root ref for this host. The `device:` scheme is
    /// reserved so the root can never collide with a component ref.
    pub fn root_ref(&self) -> ComponentRef {
        ComponentRef::new(format!("device:{}", self.hostname))
    }
}
