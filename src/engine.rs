//! Lifecycle of one loaded dataset: starts the simulation once, re-binds colors
//! and the legend on attribute switches, and routes point clicks to the selection.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use eframe::egui::{Align2, Color32, FontId, Stroke, Vec2, vec2};
use tracing::{debug, info};

use crate::cluster::{Canvas, ClusterLayout};
use crate::encoding::{Attribute, Legend, color_of};
use crate::physics::{ForceSimulation, SimulationConfig, SimulationPoint};
use crate::record::{Record, RecordId};
use crate::selection::{SelectionChange, SelectionStore};
use crate::surface::Surface;

const SELECTED_STROKE_WIDTH: f32 = 2.0;
const DIMMED_ALPHA: u8 = 60;
const MONTH_LABEL_SIZE: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    /// No data yet; only the empty canvas is shown.
    Empty,
    /// Data has arrived but the simulation has not been started.
    Initializing,
    /// Simulation running or settled.
    Active,
}

pub struct Engine {
    phase: EnginePhase,
    canvas: Canvas,
    clusters: ClusterLayout,
    config: SimulationConfig,
    attribute: Attribute,
    legend: Legend,
    records: Option<Arc<[Record]>>,
    index_by_id: HashMap<RecordId, usize>,
    simulation: Option<ForceSimulation>,
    selection: SelectionStore,
    simulation_runs: u32,
}

impl Engine {
    pub fn new(canvas: Canvas, config: SimulationConfig, attribute: Attribute) -> Self {
        Self {
            phase: EnginePhase::Empty,
            clusters: ClusterLayout::months(&canvas),
            legend: Legend::build(attribute, &canvas),
            canvas,
            config,
            attribute,
            records: None,
            index_by_id: HashMap::new(),
            simulation: None,
            selection: SelectionStore::new(),
            simulation_runs: 0,
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn clusters(&self) -> &ClusterLayout {
        &self.clusters
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn records(&self) -> &[Record] {
        self.records.as_deref().unwrap_or(&[])
    }

    pub fn simulation(&self) -> Option<&ForceSimulation> {
        self.simulation.as_ref()
    }

    pub fn points(&self) -> &[SimulationPoint] {
        self.simulation
            .as_ref()
            .map(ForceSimulation::points)
            .unwrap_or(&[])
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Number of simulations started over the engine's lifetime.
    pub fn simulation_runs(&self) -> u32 {
        self.simulation_runs
    }

    pub fn is_running(&self) -> bool {
        self.simulation
            .as_ref()
            .is_some_and(ForceSimulation::is_running)
    }

    /// Hands the current dataset to the engine. Safe to call on every frame:
    /// the same dataset is recognised and left alone.
    pub fn receive(&mut self, records: &Arc<[Record]>) {
        if records.is_empty() {
            return;
        }

        if let Some(current) = &self.records
            && Arc::ptr_eq(current, records)
        {
            return;
        }

        if self.phase != EnginePhase::Empty {
            info!(
                previous = self.records().len(),
                next = records.len(),
                "dataset replaced, discarding layout and selection"
            );
        }

        self.index_by_id.clear();
        for (index, record) in records.iter().enumerate() {
            self.index_by_id.entry(record.idx).or_insert(index);
        }
        self.records = Some(Arc::clone(records));
        self.simulation = None;
        self.selection.clear();
        self.phase = EnginePhase::Initializing;
    }

    /// Starts the simulation for the received dataset. Only the first call after
    /// `receive` does anything.
    pub fn initialize(&mut self) -> bool {
        if self.phase != EnginePhase::Initializing {
            return false;
        }

        let Some(records) = self.records.as_ref() else {
            return false;
        };

        self.simulation = Some(ForceSimulation::new(records, &self.clusters, self.config));
        self.simulation_runs += 1;
        self.phase = EnginePhase::Active;
        true
    }

    /// Steps the simulation at most `ticks` times. Returns whether it is still running.
    pub fn advance(&mut self, ticks: u32, mut on_tick: impl FnMut(&[SimulationPoint])) -> bool {
        let Some(simulation) = self.simulation.as_mut() else {
            return false;
        };

        for _ in 0..ticks {
            if !simulation.step() {
                break;
            }
            on_tick(simulation.points());
        }
        simulation.is_running()
    }

    /// Switches the color encoding. Positions are never touched.
    pub fn set_attribute(&mut self, attribute: Attribute) -> bool {
        if self.attribute == attribute {
            return false;
        }

        debug!(from = %self.attribute, to = %attribute, "color attribute changed");
        self.attribute = attribute;
        self.legend = Legend::build(attribute, &self.canvas);
        true
    }

    pub fn color_of_record(&self, index: usize) -> Option<Color32> {
        self.records()
            .get(index)
            .map(|record| color_of(self.attribute, record))
    }

    /// Toggles the clicked record. Ids outside the current dataset are ignored.
    pub fn click(&mut self, id: RecordId) -> Option<SelectionChange> {
        let Some(&index) = self.index_by_id.get(&id) else {
            debug!(%id, "click on unknown record ignored");
            return None;
        };

        let change = self.selection.toggle(id, index);
        debug!(%id, ?change, selected = self.selection.len(), "selection toggled");
        Some(change)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records for the side panel, most recent first.
    pub fn selected_records(&self) -> Vec<&Record> {
        let records = self.records();
        self.selection
            .entries()
            .filter_map(|entry| records.get(entry.record))
            .collect()
    }

    /// Record under `position` (layout space), nearest centre wins.
    pub fn point_at(&self, position: Vec2) -> Option<RecordId> {
        let radius = self.config.collision_radius;
        let records = self.records();
        self.points()
            .iter()
            .filter_map(|point| {
                let distance = (point.position - position).length();
                (distance <= radius).then_some((point.record, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .and_then(|(index, _)| records.get(index))
            .map(|record| record.idx)
    }

    /// Paints the whole scene from current state. `emphasis`, when given, keeps
    /// full opacity for those record indices and dims everything else.
    pub fn render(&self, surface: &mut dyn Surface, emphasis: Option<&HashSet<usize>>) {
        if self.phase == EnginePhase::Empty {
            return;
        }

        for anchor in self.clusters.anchors() {
            surface.text(
                vec2(-self.canvas.margin_left + 10.0, anchor.target.y),
                Align2::LEFT_CENTER,
                &anchor.label,
                FontId::proportional(MONTH_LABEL_SIZE),
                Color32::from_gray(20),
            );
        }

        let records = self.records();
        let radius = self.config.collision_radius;
        for point in self.points() {
            let Some(record) = records.get(point.record) else {
                continue;
            };

            let mut fill = color_of(self.attribute, record);
            if emphasis.is_some_and(|matches| !matches.contains(&point.record)) {
                fill = Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), DIMMED_ALPHA);
            }
            let stroke = if self.selection.contains(record.idx) {
                Stroke::new(SELECTED_STROKE_WIDTH, Color32::BLACK)
            } else {
                Stroke::NONE
            };
            surface.circle(point.position, radius, fill, stroke);
        }

        self.legend.draw(surface);
    }
}
