//! Training dataset CSV output.
//!
//! One row per grid cell: the six features in classifier order, the
//! cell area, the cell bounds, and the rule-assigned label.

use std::path::Path;

use aquaguard_types::{TrainingSample, FEATURE_NAMES};

use crate::error::TrainerError;

/// Write the labeled dataset to `path`, creating parent directories.
pub fn write_dataset(samples: &[TrainingSample], path: &Path) -> Result<(), TrainerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
    header.extend(["area_km2", "north", "south", "east", "west", "label"]);
    writer.write_record(&header)?;

    for sample in samples {
        let feature_row = sample.features.to_array();
        let mut record: Vec<String> = feature_row.iter().map(ToString::to_string).collect();
        record.push(sample.area_km2.to_string());
        record.push(sample.cell.north.to_string());
        record.push(sample.cell.south.to_string());
        record.push(sample.cell.east.to_string());
        record.push(sample.cell.west.to_string());
        record.push(sample.label.index().to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use aquaguard_types::{GridCell, SustainabilityClass, ZoneFeatures};

    use super::*;

    #[test]
    fn dataset_round_trips_through_csv() {
        let sample = TrainingSample {
            features: ZoneFeatures {
                pop_density: 12.0,
                road_density: 3.5,
                green_cover: 10.0,
                distance_water: 2.0,
                elevation: 39.09,
                flood_risk: 0.61,
            },
            area_km2: 0.99,
            cell: GridCell {
                north: 13.1,
                south: 13.09,
                east: 80.28,
                west: 80.27,
            },
            label: SustainabilityClass::ModeratelySustainable,
        };

        let dir = std::env::temp_dir().join("aquaguard-dataset-test");
        let path = dir.join("zones_dataset.csv");
        write_dataset(&[sample], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header = reader.headers().unwrap().clone();
        assert_eq!(&header[0], "pop_density");
        assert_eq!(&header[6], "area_km2");
        assert_eq!(&header[11], "label");

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "3.5");
        assert_eq!(&rows[0][11], "1");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
