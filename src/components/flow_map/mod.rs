mod component;
mod format;
mod project;
mod render;
mod state;
mod types;

pub use component::FlowMapCanvas;
pub use format::format_amount;
pub use types::{FlowKind, FlowLink, FlowNode, MapData};
