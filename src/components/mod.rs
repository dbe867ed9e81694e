//! Graph feature components.

pub mod graph_styles;
