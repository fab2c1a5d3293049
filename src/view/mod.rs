//! Pure view computation: state, filtering, lineage, layout, and the
//! shareable link format. Nothing here touches the terminal or the
//! filesystem; `tui` and the CLI commands render what these produce.

pub mod controller;
pub mod filter;
pub mod layout;
pub mod lineage;
pub mod link;
pub mod state;
