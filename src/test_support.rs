//! In-memory `.xlsx` fixtures for tests.
//! Writes the smallest OOXML package calamine accepts: one worksheet using
//! inline strings, no shared strings and no styles.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
}

pub fn cell(text: &str) -> Cell {
    Cell::Text(text.to_string())
}

pub fn num(value: f64) -> Cell {
    Cell::Number(value)
}

/// Header plus data rows for the usual four attendance columns.
pub fn attendance_rows(rows: &[(&str, &str, &str, &str)]) -> Vec<Vec<Cell>> {
    let mut out = vec![vec![
        cell("Class Date"),
        cell("Section ID"),
        cell("Student Name"),
        cell("Attendance"),
    ]];
    out.extend(
        rows.iter()
            .map(|(date, section, name, status)| {
                vec![cell(date), cell(section), cell(name), cell(status)]
            }),
    );
    out
}

#[derive(Default)]
pub struct WorkbookBuilder {
    rows: Vec<Vec<Cell>>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows(mut self, rows: Vec<Vec<Cell>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", ROOT_RELS_XML.to_string()),
            ("xl/workbook.xml", WORKBOOK_XML.to_string()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml()),
        ];
        for (name, body) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    fn sheet_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, row) in self.rows.iter().enumerate() {
            let row_num = r + 1;
            xml.push_str(&format!(r#"<row r="{}">"#, row_num));
            for (c, value) in row.iter().enumerate() {
                let reference = format!("{}{}", column_letters(c), row_num);
                match value {
                    Cell::Text(text) if text.is_empty() => {}
                    Cell::Text(text) => xml.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference,
                        escape(text)
                    )),
                    Cell::Number(n) => {
                        xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n))
                    }
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Attendance" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
    }
}
