use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::Engine;
use crate::record::{Record, RecordId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutRow {
    pub idx: RecordId,
    pub month: String,
    pub x: f32,
    pub y: f32,
    /// `#rrggbb` for the engine's active attribute.
    pub color: String,
}

/// Runs a fresh layout for `records` to convergence and reports where each point ended up.
pub fn settle_layout(engine: &mut Engine, records: Arc<[Record]>) -> Vec<LayoutRow> {
    engine.receive(&records);
    engine.initialize();
    while engine.advance(u32::MAX, |_| {}) {}

    engine
        .points()
        .iter()
        .filter_map(|point| {
            let record = records.get(point.record)?;
            let color = engine.color_of_record(point.record)?;
            Some(LayoutRow {
                idx: record.idx,
                month: record.month.clone(),
                x: point.position.x,
                y: point.position.y,
                color: format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()),
            })
        })
        .collect()
}

pub fn write_layout(rows: &[LayoutRow], writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows).context("failed to write layout JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Canvas;
    use crate::encoding::Attribute;
    use crate::physics::SimulationConfig;

    #[test]
    fn exported_rows_carry_settled_positions_and_colors() {
        let mut engine = Engine::new(
            Canvas::default(),
            SimulationConfig::default(),
            Attribute::Sentiment,
        );
        let records: Arc<[Record]> = vec![
            Record::new(1, "March", 1.0, 0.5, "great"),
            Record::new(2, "March", -1.0, 0.5, "awful"),
        ]
        .into();

        let rows = settle_layout(&mut engine, records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].color, "#008000");
        assert_eq!(rows[1].color, "#ff0000");
        assert!(!engine.is_running());

        let mut buffer = Vec::new();
        write_layout(&rows, &mut buffer).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed[1]["idx"], 2);
        assert_eq!(parsed[0]["month"], "March");
    }
}
