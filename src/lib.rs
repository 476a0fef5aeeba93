//! Force-directed tweet clustering: months become anchors, sentiment or
//! subjectivity becomes color, and clicked tweets collect in a selection.

pub mod app;
pub mod cluster;
pub mod dataset;
pub mod encoding;
pub mod engine;
pub mod export;
pub mod physics;
pub mod record;
pub mod search;
pub mod selection;
pub mod surface;
pub mod util;

pub use cluster::{Canvas, ClusterAnchor, ClusterLayout};
pub use encoding::{Attribute, ColorScale, Legend, color_of};
pub use engine::{Engine, EnginePhase};
pub use export::{LayoutRow, settle_layout, write_layout};
pub use physics::{ForceSimulation, SimulationConfig, SimulationPoint};
pub use record::{Record, RecordId};
pub use selection::{SelectionChange, SelectionEntry, SelectionStore};
pub use surface::{DrawList, GradientStop, Primitive, Surface};
