use anyhow::{Context, Result};
use arcos_report::{Conversion, STRUCTURED_COLUMNS};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

const SHEET_NAME: &str = "Sheet1";

/// Where the artifacts of one input land: `<stem>.txt` and
/// `<stem>_formatted.<ext>` in `dir`.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub stem: String,
}

impl OutputPaths {
    pub fn for_input(input: &Path, dir: Option<&Path>) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self { dir, stem }
    }

    pub fn text(&self) -> PathBuf {
        self.dir.join(format!("{}.txt", self.stem))
    }

    pub fn structured(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}_formatted.{ext}", self.stem))
    }
}

pub fn write_text(report: &Conversion, path: &Path) -> Result<()> {
    fs::write(path, report.to_text()).with_context(|| format!("writing {}", path.display()))
}

pub fn write_xlsx(report: &Conversion, path: &Path) -> Result<()> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet().set_name(SHEET_NAME)?;
    write_sheet(ws, report)?;
    wb.save(path).with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}

fn write_sheet(ws: &mut Worksheet, report: &Conversion) -> Result<()> {
    for (c, h) in STRUCTURED_COLUMNS.iter().enumerate() { ws.write_string(0, c as u16, *h)?; }
    // Strings throughout: quantities and ids keep their leading zeros.
    for (i, row) in report.structured.iter().enumerate() {
        for (c, v) in row.cells().iter().enumerate() {
            ws.write_string((i + 1) as u32, c as u16, *v)?;
        }
    }
    Ok(())
}

pub fn write_csv(report: &Conversion, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(STRUCTURED_COLUMNS)?;
    for row in &report.structured {
        wtr.write_record(row.cells())?;
    }
    wtr.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcos_report::{Layout, ReportConfig, SourceTable, convert};

    fn report() -> Conversion {
        let rows = vec![
            vec!["NDC".into(), "QUANTITY".into(), "DEA".into(), "DATE".into()],
            vec!["123-45-6789".into(), "5".into(), "AB1234567".into(), "2024-01-31".into()],
        ];
        convert(&SourceTable::new(rows), "purchase", Layout::Auto, &ReportConfig::default()).unwrap()
    }

    #[test]
    fn paths_follow_the_input_name() {
        let p = OutputPaths::for_input(Path::new("/data/in/March sales.xlsx"), None);
        assert_eq!(p.text(), PathBuf::from("/data/in/March sales.txt"));
        assert_eq!(p.structured("xlsx"), PathBuf::from("/data/in/March sales_formatted.xlsx"));
        let p = OutputPaths::for_input(Path::new("/data/in/x.csv"), Some(Path::new("/out")));
        assert_eq!(p.text(), PathBuf::from("/out/x.txt"));
    }

    #[test]
    fn text_and_csv_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let r = report();
        let txt = dir.path().join("r.txt");
        write_text(&r, &txt).unwrap();
        let written = fs::read_to_string(&txt).unwrap();
        assert_eq!(written, r.to_text());
        assert!(written.ends_with('\n'));

        let csv_path = dir.path().join("r_formatted.csv");
        write_csv(&r, &csv_path).unwrap();
        let written = fs::read_to_string(&csv_path).unwrap();
        let mut lines = written.lines();
        assert!(lines.next().unwrap().starts_with("Registrant Id,Transaction Code"));
        assert_eq!(lines.next().unwrap(), "RY0658940,P,,123456789,00000005,,AB1234567,,01312024,,,0000000001");
    }

    #[test]
    fn xlsx_artifact_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r_formatted.xlsx");
        write_xlsx(&report(), &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
