//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::MathConfig;
pub use site::Mode;
pub use site::PreviewConfig;
pub use site::SiteConfig;
