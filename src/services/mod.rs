//! 业务能力层：描述"我能做什么"，不持有流程

pub mod portal;
pub mod resolver;
pub mod select_surface;

pub use portal::{HtmlTag, PortalNavigator};
pub use resolver::SelectorResolver;
pub use select_surface::SelectSurface;
