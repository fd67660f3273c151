use crate::config::Config;
use crate::inventory::domain::{Category, Component};
use crate::shared::Result;

/// Scanner port for software discovery collaborators.
///
/// Scanners produce lists of component trees; the core consumes them
/// read-only. A scanner should supply a non-empty `name` for every
/// component and set `origin` whenever a package manager is the source
/// of truth, so refs come out in canonical package-URL form.
///
/// Scanner failures are non-fatal: the caller reports them and moves
/// on to the next scanner.
pub trait Scanner {
    /// Stable scanner identifier, used for disable lists and the
    /// `source` provenance property.
    fn name(&self) -> &'static str;

    /// The output category this scanner's components belong to.
    fn category(&self) -> Category;

    /// Performs the scan and returns discovered component trees.
    /// Returns an empty list when the underlying tool or directory is
    /// absent on this host.
    fn scan(&self, config: &Config) -> Result<Vec<Component>>;
}
