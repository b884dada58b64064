//! Gridboard core: layout engine for a drag-and-drop widget dashboard.
//!
//! Widgets live on an integer cell grid. The layout core keeps the board
//! overlap-free: placement searches outward from an item's anchor, a repair
//! loop untangles overlapping boards, and container resizes reflow every
//! item (restoring the user's arrangement when space returns). The
//! [`DashboardController`] sequences those pieces around pointer input and
//! an owned item store; `wasm.rs` is the one adapter shipped, exposing the
//! core to a JavaScript frontend as stateless JSON functions.

pub mod controller;
pub mod interact;
pub mod item;
pub mod layout;
pub mod output;
pub mod store;
pub mod wasm;

pub use controller::DashboardController;
pub use interact::{DragState, Interaction, ResizeHandle, ResizeState};
pub use item::{GridItem, WidgetConfig};
pub use layout::{GridConfig, GridDimensions, RectI, RepairOutcome};
pub use output::{DashboardOutput, ItemOutput};
pub use store::{DashboardSnapshot, DashboardStore, SnapshotError};
