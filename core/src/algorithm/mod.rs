//! Graphflow Algorithm Framework
//! Flow network augmentation and maximum flow over caller-owned graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod config;
pub mod events;
pub mod graph;
pub mod state;
pub mod traits;

pub use self::config::FlowConfig;
pub use self::events::{EventHandlers, HandlerId};
pub use self::graph::*;
pub use self::state::{SearchState, VertexColor};
pub use self::traits::*;
