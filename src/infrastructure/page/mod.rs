//! Page implementations.

mod headless;

pub use headless::HeadlessPage;
