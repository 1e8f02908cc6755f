//! Translation Module
//!
//! PV and StorageClass topology translation between in-tree plugins and
//! their CSI drivers.

pub mod allowed;
pub mod config;
pub mod in_tree_volume;
pub mod translator;

pub use allowed::*;
pub use config::*;
pub use in_tree_volume::*;
pub use translator::*;
