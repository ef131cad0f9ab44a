use std::path::Path;

use csv::WriterBuilder;

use crate::lineup::{Lineup, LineupRequest};

/// Writes a lineup as CSV: one row per position in field order, then one
/// `BENCH` row per substitute.
///
/// Columns: `Position,Player,Athleticism,Preferences`
pub fn export_lineup_to_csv(
    lineup: &Lineup,
    request: &LineupRequest,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(csv_path)?;
    wtr.write_record(["Position", "Player", "Athleticism", "Preferences"])?;

    let describe = |name: &str| {
        let athleticism = request.athleticism.get(name).copied().unwrap_or(0).to_string();
        let prefs = request
            .roster
            .get(name)
            .map(|p| p.preferences.join(" "))
            .unwrap_or_default();
        (athleticism, prefs)
    };

    for slot in lineup.assignment.slots() {
        let (athleticism, prefs) = describe(&slot.player);
        wtr.write_record([slot.position.as_str(), slot.player.as_str(), &athleticism, &prefs])?;
    }
    for name in &lineup.bench {
        let (athleticism, prefs) = describe(name);
        wtr.write_record(["BENCH", name.as_str(), &athleticism, &prefs])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::plan_lineup;
    use crate::roster::RosterConfig;

    #[test]
    fn writes_positions_then_bench() {
        let request = RosterConfig::freebasers()
            .lineup_request(&["Dave".to_string()], &[])
            .unwrap();
        let lineup = plan_lineup(&request).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.csv");
        export_lineup_to_csv(&lineup, &request, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 11);
        assert_eq!(&rows[0][0], "P");
        assert_eq!(&rows[10][0], "BENCH");
    }
}
