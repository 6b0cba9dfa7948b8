//! Page objects: named components composed into page-level workflows.
//!
//! Pages own component instances, never raw locators, and they return data
//! rather than verdicts. Shared behavior lives in the components.

pub mod filters;
pub mod home;
pub mod login;

pub use filters::FiltersPage;
pub use home::HomePage;
pub use login::LoginPage;
