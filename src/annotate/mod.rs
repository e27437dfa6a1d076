//! Attribute annotators.
//!
//! These functions derive visual attributes (labels, colors, sizes, widths, opacities) from node
//! and edge data and write them onto a [`Graph`](crate::Graph), ready for [`draw`](crate::draw),
//! [`interact`](crate::interact) or an [`Animation`](crate::Animation).

mod mappers;
mod source;

pub use mappers::{
    Bounds, EdgeFilter, NodeFilter, color_borders, color_community_edges, color_community_nodes,
    color_edges, color_nodes, heat_edges, heat_nodes, label_edges, label_nodes, scale_edges_alpha,
    scale_edges_width, scale_nodes_dark, scale_nodes_size, set_edges, set_nodes, stack_and_track,
    unset_edges, unset_nodes,
};
pub use source::{
    EdgeSource, NodeSource, ValueSource, edge_values, node_values, numeric, resolve_edge,
    resolve_node,
};
