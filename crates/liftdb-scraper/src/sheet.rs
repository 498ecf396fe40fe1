//! Parser for a published sheet's lift table.
//!
//! The sheet host renders one `<tbody>` per published tab: the first row is
//! the header, everything after is one lift per row. The header vocabulary
//! is closed; a column we have never seen means the sheet layout changed
//! and the run must stop before it misreads capacity data. Most known
//! columns are deliberately left unmapped.

use scraper::{ElementRef, Html, Selector};

use liftdb_core::{Feature, FeatureStatus};

use crate::classify::classify_lift_type;
use crate::error::ScrapeError;

/// Every header the sheets are known to publish, lower-cased.
const KNOWN_COLUMNS: &[&str] = &[
    "status",
    "lift name",
    "type",
    "manufacturer",
    "years of operation",
    "capacity",
    "vertical rise",
    "length",
    "horsepower",
    "line speed",
    "chairs",
    "towers",
    "drive",
    "tension",
    "ride time",
    "notes",
];

/// Parses the lift table out of a published-sheet page, one [`Feature`] per
/// data row, preserving row order. A table with a header and no data rows
/// (or no rows at all) yields an empty list.
///
/// # Errors
///
/// - [`ScrapeError::MalformedPayload`] when the page has no `<tbody>` or a
///   data row has more cells than the header has columns.
/// - [`ScrapeError::UnknownColumn`] when a header cell is outside
///   [`KNOWN_COLUMNS`].
/// - [`ScrapeError::UnknownLiftType`] from classifying a `type` cell.
pub fn parse_lift_table(html: &str) -> Result<Vec<Feature>, ScrapeError> {
    let document = Html::parse_document(html);
    let tbody_selector = Selector::parse("tbody").expect("valid selector");
    let row_selector = Selector::parse("tr").expect("valid selector");
    let cell_selector = Selector::parse("td").expect("valid selector");

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| malformed("no <tbody> found"))?;

    let mut rows = tbody.select(&row_selector);
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let mut columns = Vec::new();
    for cell in header_row.select(&cell_selector) {
        let column = cell_text(&cell).trim().to_lowercase();
        if !KNOWN_COLUMNS.contains(&column.as_str()) {
            return Err(ScrapeError::UnknownColumn { column });
        }
        columns.push(column);
    }

    let mut features = Vec::new();
    for row in rows {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.len() > columns.len() {
            return Err(malformed(&format!(
                "row has {} cells but the header has {} columns",
                cells.len(),
                columns.len()
            )));
        }

        let mut feature = Feature::default();
        for (cell, column) in cells.iter().zip(&columns) {
            let text = cell_text(cell);
            apply_cell(&mut feature, column, text.trim())?;
        }
        features.push(feature);
    }

    Ok(features)
}

/// Applies one data cell to the row's feature under its column's header.
/// Columns without a match here are consumed and dropped; the header check
/// has already vouched for them.
fn apply_cell(feature: &mut Feature, column: &str, text: &str) -> Result<(), ScrapeError> {
    match column {
        "status" => feature.status = parse_status(text),
        "lift name" => {
            if !text.is_empty() {
                feature.name = Some(text.to_string());
            }
        }
        "type" => {
            if let Some(class) = classify_lift_type(text)? {
                feature.kind = class.kind;
                feature.capacity = class.capacity;
                feature.pulse = class.pulse;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Status is looser vocabulary than type: anything unrecognized stays
/// `Unknown` instead of failing the run.
fn parse_status(text: &str) -> FeatureStatus {
    match text.to_lowercase().as_str() {
        "operating" => FeatureStatus::Operating,
        "removed" => FeatureStatus::Removed,
        "construction" => FeatureStatus::Construction,
        _ => FeatureStatus::Unknown,
    }
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>()
}

fn malformed(reason: &str) -> ScrapeError {
    ScrapeError::MalformedPayload {
        context: "sheet table".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use liftdb_core::FeatureType;

    use super::*;

    /// Builds a sheet page the way the host publishes it: row-number `<th>`
    /// cells ahead of the data cells.
    fn sheet_page(rows: &[Vec<&str>]) -> String {
        let mut body = String::from("<html><body><table><tbody>");
        for (index, row) in rows.iter().enumerate() {
            body.push_str("<tr>");
            body.push_str(&format!("<th>{index}</th>"));
            for cell in row {
                body.push_str(&format!("<td>{cell}</td>"));
            }
            body.push_str("</tr>");
        }
        body.push_str("</tbody></table></body></html>");
        body
    }

    #[test]
    fn parses_a_two_lift_table() {
        let page = sheet_page(&[
            vec!["Status", "Lift Name", "Type", "Notes"],
            vec!["Operating", "Eagle Express", "High Speed Quad", ""],
            vec!["Removed", "Bunny Rope", "Handle Tow", "replaced in 2009"],
        ]);
        let features = parse_lift_table(&page).expect("should parse");

        assert_eq!(features.len(), 2);

        assert_eq!(features[0].name.as_deref(), Some("Eagle Express"));
        assert_eq!(features[0].status, FeatureStatus::Operating);
        assert_eq!(features[0].kind, FeatureType::ChairHispeed);
        assert_eq!(features[0].capacity, vec![4]);
        assert!(!features[0].pulse);

        assert_eq!(features[1].name.as_deref(), Some("Bunny Rope"));
        assert_eq!(features[1].status, FeatureStatus::Removed);
        assert_eq!(features[1].kind, FeatureType::HandleTow);
        assert_eq!(features[1].capacity, vec![1]);
    }

    #[test]
    fn notes_column_is_consumed_but_never_copied() {
        let page = sheet_page(&[
            vec!["Lift Name", "Notes"],
            vec!["Summit Six", "bullwheel replaced"],
        ]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].notes, "");
    }

    #[test]
    fn row_order_is_preserved() {
        let page = sheet_page(&[
            vec!["Lift Name"],
            vec!["Chair 1"],
            vec!["Chair 2"],
            vec!["Chair 3"],
        ]);
        let features = parse_lift_table(&page).expect("should parse");
        let names: Vec<_> = features
            .iter()
            .map(|f| f.name.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, vec!["Chair 1", "Chair 2", "Chair 3"]);
    }

    #[test]
    fn header_matching_ignores_case_and_padding() {
        let page = sheet_page(&[vec!["  STATUS ", "lift name"], vec!["Operating", "Solitude"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].status, FeatureStatus::Operating);
    }

    #[test]
    fn unknown_header_column_fails() {
        let page = sheet_page(&[vec!["Lift Name", "Elevation"], vec!["Chair 1", "2400"]]);
        let result = parse_lift_table(&page);
        match result {
            Err(ScrapeError::UnknownColumn { ref column }) => assert_eq!(column, "elevation"),
            other => panic!("expected UnknownColumn, got: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_falls_back_to_unknown() {
        let page = sheet_page(&[vec!["Status", "Lift Name"], vec!["standby", "Chair 1"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].status, FeatureStatus::Unknown);
    }

    #[test]
    fn empty_type_cell_leaves_row_defaults() {
        let page = sheet_page(&[vec!["Lift Name", "Type"], vec!["Mystery", ""]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].kind, FeatureType::Unknown);
        assert_eq!(features[0].capacity, vec![0]);
    }

    #[test]
    fn double_t_bar_row_keeps_defaults() {
        let page = sheet_page(&[vec!["Lift Name", "Type"], vec!["Old Mixed", "Double/T-Bar"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].kind, FeatureType::Unknown);
        assert_eq!(features[0].capacity, vec![0]);
        assert!(!features[0].pulse);
    }

    #[test]
    fn chondola_row_carries_both_capacities() {
        let page = sheet_page(&[vec!["Lift Name", "Type"], vec!["Telemix", "Chondola 4/8"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].kind, FeatureType::Chondola);
        assert_eq!(features[0].capacity, vec![4, 8]);
    }

    #[test]
    fn unclassifiable_type_cell_fails_the_parse() {
        let page = sheet_page(&[vec!["Lift Name", "Type"], vec!["Chair 1", "six pack"]]);
        let result = parse_lift_table(&page);
        assert!(
            matches!(result, Err(ScrapeError::UnknownLiftType { .. })),
            "expected UnknownLiftType, got: {result:?}"
        );
    }

    #[test]
    fn blank_name_cell_stays_none() {
        let page = sheet_page(&[vec!["Lift Name", "Status"], vec!["", "Operating"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert!(features[0].name.is_none());
    }

    #[test]
    fn short_rows_are_padded_with_defaults() {
        let page = sheet_page(&[
            vec!["Status", "Lift Name", "Type"],
            vec!["Operating"],
        ]);
        let features = parse_lift_table(&page).expect("should parse");
        assert_eq!(features[0].status, FeatureStatus::Operating);
        assert!(features[0].name.is_none());
        assert_eq!(features[0].kind, FeatureType::Unknown);
    }

    #[test]
    fn row_with_more_cells_than_headers_fails() {
        let page = sheet_page(&[
            vec!["Status", "Lift Name"],
            vec!["Operating", "Chair 1", "extra"],
        ]);
        let result = parse_lift_table(&page);
        assert!(
            matches!(result, Err(ScrapeError::MalformedPayload { .. })),
            "expected MalformedPayload, got: {result:?}"
        );
    }

    #[test]
    fn page_without_a_table_fails() {
        let result = parse_lift_table("<html><body><p>Loading…</p></body></html>");
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn table_with_no_rows_yields_no_features() {
        let page = "<html><body><table><tbody></tbody></table></body></html>";
        let features = parse_lift_table(page).expect("should parse");
        assert!(features.is_empty());
    }

    #[test]
    fn header_only_table_yields_no_features() {
        let page = sheet_page(&[vec!["Status", "Lift Name", "Type"]]);
        let features = parse_lift_table(&page).expect("should parse");
        assert!(features.is_empty());
    }

    #[test]
    fn implicit_tbody_from_bare_rows_is_accepted() {
        let page = "<table><tr><td>Lift Name</td></tr><tr><td>Chair 1</td></tr></table>";
        let features = parse_lift_table(page).expect("should parse");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name.as_deref(), Some("Chair 1"));
    }
}
