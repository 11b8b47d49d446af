//! # FTPdetectinfo record parser
//!
//! Single pass over the lines of a detection file, driven by `ParserState`. Each state
//! owns exactly what the next line needs: the reference epoch while the record header is
//! read, the [`ObservationBuilder`] once points are coming in. A record is therefore only
//! ever finalized from the `Points` state, and a record interrupted by a fatal lookup
//! failure is simply dropped with the state.
//!
//! Error policy
//! -----------------
//! * Numeric or structural errors in a line abort the parse with `Err`.
//! * A station missing from the site catalog halts the parse: the records finalized so far
//!   are returned in [`DetectionReport::observations`] and the error is kept in
//!   [`DetectionReport::halted`].
//! * A station without clock offset, while offsets are attached to the catalog, is recorded
//!   in [`DetectionReport::warnings`] and its record is kept with the unadjusted epoch.
use std::ops::ControlFlow;

use camino::Utf8Path;
use log::{debug, error, info, warn};

use super::bin_name::bin_name_to_jd;
use crate::{
    cams_errors::{parse_number, CamsError},
    constants::{
        JulianDate, FTPDETECT_HEADER_LINES, NO_MAGNITUDE, RECORD_SEPARATOR, SECONDS_PER_DAY,
    },
    observations::{MeteorObservation, ObservationBuilder},
    stations::{skip_header, StationCatalog, StationId},
};

/// Outcome of parsing one detection file.
#[derive(Debug, Default, PartialEq)]
pub struct DetectionReport {
    /// Finalized records, in file order.
    pub observations: Vec<MeteorObservation>,
    /// Recoverable problems met along the way.
    pub warnings: Vec<CamsError>,
    /// Reason the parse stopped before the end of the file, if it did.
    pub halted: Option<CamsError>,
}

impl DetectionReport {
    /// `true` when the whole file was consumed.
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    pub fn into_observations(self) -> Vec<MeteorObservation> {
        self.observations
    }
}

#[derive(Debug)]
enum ParserState {
    /// Outside of any record, waiting for a separator line.
    AwaitSeparator,
    /// A separator was read, the FF bin name comes next.
    BinName,
    /// Reference epoch known, the calibration line comes next.
    Calibration { jdt_ref: JulianDate },
    /// Calibration line consumed, the meteor header comes next.
    MeteorHeader { jdt_ref: JulianDate },
    /// Collecting the points of a record.
    Points(ObservationBuilder),
}

struct FtpDetectParser<'a> {
    catalog: &'a StationCatalog,
    state: ParserState,
    report: DetectionReport,
}

impl<'a> FtpDetectParser<'a> {
    fn new(catalog: &'a StationCatalog) -> Self {
        FtpDetectParser {
            catalog,
            state: ParserState::AwaitSeparator,
            report: DetectionReport::default(),
        }
    }

    /// Feed one line to the state machine.
    ///
    /// Return
    /// ----------
    /// * `ControlFlow::Break` when the parse must stop here, the halt reason being already
    ///   stored in the report.
    fn step(&mut self, line_number: usize, line: &str) -> Result<ControlFlow<()>, CamsError> {
        if line.trim().is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let state = std::mem::replace(&mut self.state, ParserState::AwaitSeparator);

        if line.contains(RECORD_SEPARATOR) {
            if let ParserState::Points(builder) = state {
                self.finalize(builder);
            }
            self.state = ParserState::BinName;
            return Ok(ControlFlow::Continue(()));
        }

        self.state = match state {
            ParserState::AwaitSeparator => {
                debug!("Skipping line {line_number} outside of any record");
                ParserState::AwaitSeparator
            }
            ParserState::BinName => ParserState::Calibration {
                jdt_ref: bin_name_to_jd(line)?,
            },
            ParserState::Calibration { jdt_ref } => ParserState::MeteorHeader { jdt_ref },
            ParserState::MeteorHeader { jdt_ref } => {
                match self.start_observation(jdt_ref, line_number, line)? {
                    Some(builder) => ParserState::Points(builder),
                    None => return Ok(ControlFlow::Break(())),
                }
            }
            ParserState::Points(mut builder) => {
                add_point(&mut builder, line_number, line)?;
                ParserState::Points(builder)
            }
        };

        Ok(ControlFlow::Continue(()))
    }

    /// Resolve the station of a meteor header and open its record.
    ///
    /// Returns `None` when the station is unknown; the parse is then halted.
    fn start_observation(
        &mut self,
        mut jdt_ref: JulianDate,
        line_number: usize,
        line: &str,
    ) -> Result<Option<ObservationBuilder>, CamsError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let station_id = StationId::new(field(&fields, 0, "station id", line_number, line)?);

        let fps: f64 = parse_number(field(&fields, 3, "fps", line_number, line)?, "fps")?;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(CamsError::InvalidNumericField {
                field: "fps",
                token: fields[3].to_string(),
            });
        }

        let catalog = self.catalog;
        let Some(station) = catalog.get(&station_id) else {
            let err = CamsError::UnknownStation(station_id);
            error!("{err}, stopping at line {line_number}");
            self.report.halted = Some(err);
            return Ok(None);
        };

        match catalog.clock_offset(&station_id) {
            Ok(Some(offset)) => {
                info!("Applying time offset for station {station_id} of {offset:.2} s");
                jdt_ref += offset / SECONDS_PER_DAY;
            }
            Ok(None) => {}
            Err(err) => {
                warn!("{err}");
                self.report.warnings.push(err);
            }
        }

        Ok(Some(ObservationBuilder::new(jdt_ref, station, fps)))
    }

    fn finalize(&mut self, builder: ObservationBuilder) {
        debug!(
            "Record of station {} finalized with {} points",
            builder.station_id(),
            builder.len()
        );
        self.report.observations.push(builder.finish());
    }

    /// End of input: an open record does not need a trailing separator.
    fn finish(mut self) -> DetectionReport {
        if let ParserState::Points(builder) =
            std::mem::replace(&mut self.state, ParserState::AwaitSeparator)
        {
            self.finalize(builder);
        }
        self.report
    }
}

fn field<'l>(
    fields: &[&'l str],
    index: usize,
    name: &'static str,
    line_number: usize,
    line: &str,
) -> Result<&'l str, CamsError> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| CamsError::MissingField {
            field: name,
            line_number,
            line: line.to_string(),
        })
}

/// Read one point line: `frame _ _ ra dec azim elev _ [mag]`.
fn add_point(
    builder: &mut ObservationBuilder,
    line_number: usize,
    line: &str,
) -> Result<(), CamsError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let value = |index: usize, name: &'static str| -> Result<f64, CamsError> {
        parse_number(field(&fields, index, name, line_number, line)?, name)
    };

    let frame_n = value(0, "frame")?;
    if builder
        .last_time()
        .is_some_and(|last| builder.frame_time(frame_n) < last)
    {
        return Err(CamsError::NonMonotonicTime {
            line_number,
            line: line.to_string(),
        });
    }
    let ra = value(3, "ra")?;
    let dec = value(4, "dec")?;
    let azim = value(5, "azim")?;
    let elev = value(6, "elev")?;

    let mag = match fields.get(8) {
        None => None,
        Some(&token) if token == NO_MAGNITUDE => None,
        Some(&token) => Some(parse_number(token, "mag")?),
    };

    builder.add_point(frame_n, azim, elev, ra, dec, mag);
    Ok(())
}

/// Parse the content of an `FTPdetectinfo` file.
///
/// Arguments
/// -----------------
/// * `content` – Full text of the file, including its 11-line header.
/// * `catalog` – Stations the meteor headers are resolved against. When time offsets are
///   attached, each record's reference epoch is corrected by its station's offset.
/// * `origin` – Path used to label errors.
///
/// Return
/// ----------
/// * A [`DetectionReport`] with the finalized records in file order.
///
/// Errors
/// ----------
/// * [`CamsError::TruncatedHeader`], [`CamsError::InvalidBinName`],
///   [`CamsError::InvalidTimestamp`], [`CamsError::MissingField`] or
///   [`CamsError::InvalidNumericField`] on malformed input.
/// * [`CamsError::NonMonotonicTime`] when a point's frame time is earlier than the
///   previous point of the same record.
pub fn parse_ftpdetectinfo(
    content: &str,
    catalog: &StationCatalog,
    origin: &Utf8Path,
) -> Result<DetectionReport, CamsError> {
    let mut parser = FtpDetectParser::new(catalog);

    for (line_number, line) in skip_header(content, FTPDETECT_HEADER_LINES, origin)? {
        if parser.step(line_number, line)?.is_break() {
            break;
        }
    }

    let report = parser.finish();
    info!(
        "Loaded {} observations from {origin}{}",
        report.observations.len(),
        if report.is_complete() { "" } else { " (halted)" }
    );
    Ok(report)
}

/// Loads all meteor observations from an `FTPdetectinfo` file.
///
/// See [`parse_ftpdetectinfo`] for the format and error semantics.
pub fn read_ftpdetectinfo(
    path: &Utf8Path,
    catalog: &StationCatalog,
) -> Result<DetectionReport, CamsError> {
    let content = std::fs::read_to_string(path)?;
    parse_ftpdetectinfo(&content, catalog, path)
}
