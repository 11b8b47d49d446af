//! # Tabular display for meteor observations
//!
//! [`MeteorObservation`] implements [`fmt::Display`]: a short header describing the
//! station and the reference epoch, followed by one table row per measured point,
//! rendered with [`comfy-table`].
//!
//! ## Units
//!
//! - **Time**: seconds relative to the reference Julian Date.
//! - **Angles**: degrees, azimuth +E of due North.
//! - **Magnitudes**: `-` when the detection software measured none.
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use super::MeteorObservation;
use crate::time::iso_utc_from_jd;

fn magnitude_cell(mag: Option<f64>) -> Cell {
    let cell = match mag {
        Some(m) => Cell::new(format!("{m:+.2}")),
        None => Cell::new("-"),
    };
    cell.set_alignment(CellAlignment::Right)
}

impl MeteorObservation {
    fn render_points(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            Cell::new("#"),
            Cell::new("Time (s)"),
            Cell::new("Azim (deg)"),
            Cell::new("Elev (deg)"),
            Cell::new("RA (deg)"),
            Cell::new("Dec (deg)"),
            Cell::new("Mag"),
        ];
        if self.abs_mag_data().is_some() {
            header.push(Cell::new("Abs mag"));
        }
        table.set_header(header);

        for i in 0..self.len() {
            let mut row = vec![
                Cell::new(i).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", self.time_data()[i])).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", self.azim_data()[i].to_degrees()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", self.elev_data()[i].to_degrees()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", self.ra_data()[i].to_degrees()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", self.dec_data()[i].to_degrees()))
                    .set_alignment(CellAlignment::Right),
                magnitude_cell(self.mag_data()[i]),
            ];
            if let Some(abs_mag) = self.abs_mag_data() {
                row.push(magnitude_cell(abs_mag[i]));
            }
            table.add_row(Row::from(row));
        }

        table.to_string()
    }
}

impl fmt::Display for MeteorObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Station ID = {}", self.station_id())?;
        writeln!(
            f,
            "JD ref = {:.6} ({} UTC)",
            self.jdt_ref(),
            iso_utc_from_jd(self.jdt_ref())
        )?;
        writeln!(
            f,
            "Lat = {:.6} deg, Lon = {:.6} deg, Ht = {:.1} m",
            self.latitude().to_degrees(),
            self.longitude().to_degrees(),
            self.height()
        )?;
        writeln!(f, "FPS = {:.3}", self.fps())?;
        writeln!(f, "Points = {}", self.len())?;
        write!(f, "{}", self.render_points())
    }
}

#[cfg(test)]
mod display_test {
    use crate::observations::ObservationBuilder;
    use crate::stations::{StationId, StationRecord};

    #[test]
    fn test_display_lists_every_point() {
        let station = StationRecord {
            id: StationId::new("000321"),
            latitude: 45.0_f64.to_radians(),
            longitude: -75.0_f64.to_radians(),
            height: 90.0,
            time_offset: None,
        };
        let mut builder = ObservationBuilder::new(2458283.5, &station, 25.0);
        builder.add_point(0.0, 120.0, 30.0, 200.0, 10.0, Some(1.5));
        builder.add_point(1.0, 121.0, 29.5, 200.5, 9.8, None);
        let rendered = builder.finish().to_string();

        assert!(rendered.contains("Station ID = 321"));
        assert!(rendered.contains("JD ref = 2458283.500000"));
        assert!(rendered.contains("FPS = 25.000"));
        assert!(rendered.contains("Points = 2"));
        assert!(rendered.contains("120.0000"));
        assert!(rendered.contains("+1.50"));
        assert!(rendered.contains("0.0400"));
        assert!(!rendered.contains("Abs mag"));
    }
}
