//! CSV import of competitors and export of standings.

use crate::logic::add_competitor;
use crate::models::{Standing, TournamentError, TournamentId, TournamentResult};
use crate::store::Store;
use std::io::Read;

/// Add competitors from CSV rows of `name,rating`. The first row is a header.
///
/// Rows with fewer than two columns, an empty name or a rating that is not a
/// non-negative integer are skipped. Returns the number of competitors added.
pub fn import_competitors<S, R>(
    store: &mut S,
    tournament_id: TournamentId,
    input: R,
) -> TournamentResult<usize>
where
    S: Store + ?Sized,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut added = 0;
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row {}: {}", line + 2, e);
                continue;
            }
        };
        if record.len() < 2 {
            continue;
        }
        let name = record[0].trim();
        let Ok(rating) = record[1].trim().parse::<i64>() else {
            continue;
        };
        match add_competitor(store, tournament_id, name, rating) {
            Ok(_) => added += 1,
            Err(TournamentError::EmptyName | TournamentError::InvalidRating(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    log::info!("Imported {} competitor(s) into tournament {}", added, tournament_id);
    Ok(added)
}

/// Standings as CSV with a `Name,Rating,Points` header.
pub fn export_standings(standings: &[Standing]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Name", "Rating", "Points"])?;
    for s in standings {
        writer.write_record([s.name.clone(), s.rating.to_string(), s.score.to_string()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
