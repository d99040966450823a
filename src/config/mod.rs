//! Configuration module

mod site;

pub use site::Feature;
pub use site::OutreachConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
