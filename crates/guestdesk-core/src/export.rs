//! CSV export of the currently filtered collection.
//!
//! A pure client-side transform — the backend is never involved. Callers
//! pass the rows the engine made visible (all pages of the filtered set),
//! so the file matches exactly what the operator was looking at.

/// Column layout for one entity's CSV export.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    fn csv_row(&self) -> Vec<String>;
}

/// Render header plus one line per item, RFC-4180-style quoting.
pub fn to_csv<'a, T, I>(items: I) -> String
where
    T: CsvRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = String::new();
    push_row(&mut out, T::HEADER.iter().map(|h| (*h).to_owned()));
    for item in items {
        push_row(&mut out, item.csv_row());
    }
    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line = fields
        .into_iter()
        .map(|f| escape(&f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Quote a field when it contains a comma, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Suggested file name, e.g. `orders_2025-08-11.csv`.
pub fn export_file_name(entity: &str, today: chrono::NaiveDate) -> String {
    format!("{entity}_{}.csv", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CsvRecord for Row {
        const HEADER: &'static [&'static str] = &["Name", "Notes"];

        fn csv_row(&self) -> Vec<String> {
            vec![self.0.to_owned(), self.1.to_owned()]
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let rows = [Row("Alpha", "plain"), Row("Beta", "also plain")];
        let csv = to_csv(rows.iter());
        assert_eq!(csv, "Name,Notes\nAlpha,plain\nBeta,also plain\n");
    }

    #[test]
    fn quotes_fields_with_separators() {
        let rows = [Row("Suite, Deluxe", "said \"hello\"")];
        let csv = to_csv(rows.iter());
        assert_eq!(
            csv,
            "Name,Notes\n\"Suite, Deluxe\",\"said \"\"hello\"\"\"\n"
        );
    }

    #[test]
    fn file_name_embeds_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 11).expect("valid date");
        assert_eq!(export_file_name("orders", date), "orders_2025-08-11.csv");
    }
}
