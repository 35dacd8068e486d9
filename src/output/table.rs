use crate::photo::{DateChoice, PhotoRecord};

/// Column titles shared by the text listing and the GUI list tab
pub const TABLE_TITLES: [&str; 5] = ["File Name", "Exif Date", "File Date", "Entry Date", "Dropped"];

/// Marker placed after the authoritative date in the text listing
const CHOSEN_MARK: char = '*';

fn row(record: &PhotoRecord) -> [String; 5] {
    let mark = |choice: DateChoice, text: &str| {
        if record.choice == choice && !text.is_empty() {
            format!("{}{}", text, CHOSEN_MARK)
        } else {
            text.to_string()
        }
    };
    [
        record.file_name.clone(),
        mark(DateChoice::Exif, &record.exif_date),
        mark(DateChoice::FileModified, &record.file_date),
        mark(DateChoice::Manual, &record.entry_date),
        if record.dropped { "Yes" } else { "" }.to_string(),
    ]
}

/// Render records as an aligned text table.
///
/// The authoritative date of each photo is suffixed with `*`.
pub fn format_table(records: &[PhotoRecord]) -> String {
    let rows: Vec<[String; 5]> = records.iter().map(row).collect();

    let mut widths = TABLE_TITLES.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_line(&TABLE_TITLES);
    for cells in &rows {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        push_line(&cells);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, choice: DateChoice, dropped: bool) -> PhotoRecord {
        PhotoRecord {
            file_name: name.to_string(),
            exif_date: "2020:01:02 03:04:05".to_string(),
            file_date: "2023:06:07 08:09:10".to_string(),
            entry_date: String::new(),
            choice,
            dropped,
        }
    }

    #[test]
    fn test_table_header_and_rows() {
        let table = format_table(&[
            record("a.jpg", DateChoice::Exif, false),
            record("long_name.jpg", DateChoice::FileModified, true),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File Name      Exif Date"));
        assert!(lines[1].contains("2020:01:02 03:04:05*"));
        assert!(!lines[1].contains("2023:06:07 08:09:10*"));
        assert!(lines[2].contains("2023:06:07 08:09:10*"));
        assert!(lines[2].ends_with("Yes"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = format_table(&[]);
        assert_eq!(table.lines().count(), 1);
    }
}
