//! UI components: narrow, verb-based wrappers over locators.
//!
//! Each component holds its locators plus a driver handle and exposes the
//! few operations the workflows need. Waits inside components always name a
//! timeout-policy entry. Components return data and propagate failures; they
//! never validate business input or retry.

pub mod checkbox;
pub mod dropdown;
pub mod input;
pub mod navigation;
pub mod table;

pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use input::{FormInput, TextReader};
pub use navigation::{Navigation, DEFAULT_ACTIVE_CLASS};
pub use table::Table;
