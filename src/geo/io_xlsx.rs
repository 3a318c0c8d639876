use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::geo::{io_common::ColumnLayout, *};

pub fn read_xlsx_rows(path: &str, cfs: &FileSource) -> GeoResult<Vec<RawVoteRow>> {
    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header_cells = iter.next().context(EmptyExcelSnafu { path })?;
    let mut header: Vec<String> = Vec::new();
    for c in header_cells {
        header.push(read_cell(c, path, 1)?);
    }
    let layout = ColumnLayout::from_header(&header, path)?;

    let mut res: Vec<RawVoteRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let mut cells: Vec<String> = Vec::new();
        for c in row {
            cells.push(read_cell(c, path, lineno)?);
        }
        res.push(layout.raw_row(lineno, &cells));
    }
    debug!("read_xlsx_rows: {}: {} rows", path, res.len());
    Ok(res)
}

fn get_range(path: &str, cfs: &FileSource) -> GeoResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &cfs.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange_o = match &cfs.excel_worksheet_name {
        Some(worksheet_name) => workbook.worksheet_range(worksheet_name),
        None => workbook.worksheet_range_at(0),
    };
    let wrange = wrange_o
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })?;
    Ok(wrange)
}

fn read_cell(cell: &DataType, path: &str, lineno: usize) -> GeoResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => whatever!(
            "{}:{}: could not understand cell {:?}",
            path,
            lineno,
            cell
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook(worksheet: Option<&str>) -> (String, FileSource) {
        let path = format!(
            "{}/tests/data/votos_2022.xlsx",
            env!("CARGO_MANIFEST_DIR")
        );
        let cfs = FileSource {
            provider: "xlsx".to_string(),
            file_path: path.clone(),
            state: None,
            excel_worksheet_name: worksheet.map(|s| s.to_string()),
            csv_delimiter: None,
        };
        (path, cfs)
    }

    #[test]
    fn first_worksheet_by_default() {
        let (path, cfs) = workbook(None);
        let rows = read_xlsx_rows(&path, &cfs).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].lineno, 2);
        assert_eq!(rows[0].state.as_deref(), Some("PR"));
        assert_eq!(rows[0].round, "1");
        assert_eq!(rows[0].candidate, "LUIZ INÁCIO LULA DA SILVA");
        assert_eq!(rows[2].votes, "70");
        assert_eq!(rows[2].validate(None).unwrap().round, Round::Second);
    }

    #[test]
    fn named_worksheet_with_raw_columns() {
        let (path, cfs) = workbook(Some("votos"));
        let rows = read_xlsx_rows(&path, &cfs).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state.as_deref(), Some("GO"));
        assert_eq!(rows[0].votes, "90");
        assert_eq!(rows[1].candidate, "VOTO NULO");
    }

    #[test]
    fn missing_worksheet() {
        let (path, cfs) = workbook(Some("nope"));
        assert!(matches!(
            read_xlsx_rows(&path, &cfs),
            Err(GeoError::EmptyExcel { .. })
        ));
    }

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Float(12.0), "x", 2).unwrap(), "12");
        assert_eq!(read_cell(&DataType::Int(7), "x", 2).unwrap(), "7");
        assert_eq!(read_cell(&DataType::Empty, "x", 2).unwrap(), "");
        assert!(read_cell(&DataType::Bool(true), "x", 2).is_err());
    }
}
