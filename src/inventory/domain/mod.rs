pub mod category;
pub mod component;
pub mod component_ref;
pub mod document;
pub mod host;

pub use category::Category;
pub use component::{Component, ComponentKind};
pub use component_ref::{derive_ref, ComponentRef};
pub use document::{BomDocument, RootNode};
pub use host::HostInfo;
