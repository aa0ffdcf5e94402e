//! The bookmark context menu: building it and reacting to clicks.

mod builder;
mod click;

pub use builder::ContextMenuBuilder;
pub use builder::MenuBuildSummary;
pub use builder::RebuildOutcome;
pub use click::MenuClickHandler;
pub use click::MenuClickOutcome;
