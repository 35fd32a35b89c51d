use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use statx_output::{ArtifactStore, OutputError, XlsxWriter, commit_workbook, temp_path_for};
use statx_transform::{SheetKind, SheetRows, SheetSpec};

fn data_sheet(name: &str) -> SheetSpec {
    let data = DataFrame::new(vec![
        Column::from(Series::new("VAR_NAME_CODE".into(), ["10:Premium", "10:Premium"])),
        Column::from(Series::new("NUM_POLS".into(), [12i64, 7])),
        Column::from(Series::new("LOSS_RATIO".into(), [Some(0.25f64), None])),
    ])
    .unwrap();
    SheetSpec::new(
        name,
        SheetRows {
            kind: SheetKind::Data,
            data,
        },
    )
}

fn read_entry(path: &Path, entry: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut file = archive.by_name(entry).unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    contents
}

#[test]
fn writes_each_sheet_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let (_, target) = store.allocate();

    let sheets = vec![data_sheet("2020_AC1_10"), data_sheet("2020_AC1_10_1")];
    commit_workbook(&XlsxWriter, &sheets, &target).expect("commit workbook");

    assert!(target.is_file());
    assert!(!temp_path_for(&target).exists());

    let workbook = read_entry(&target, "xl/workbook.xml");
    let first = workbook.find("name=\"2020_AC1_10\"").expect("first sheet");
    let second = workbook.find("name=\"2020_AC1_10_1\"").expect("second sheet");
    assert!(first < second);

    let strings = read_entry(&target, "xl/sharedStrings.xml");
    assert!(strings.contains("VAR_NAME_CODE"));
    assert!(strings.contains("10:Premium"));
}

/// The `<c r="..">...</c>` element for one cell, if it was written.
fn cell_xml<'a>(sheet_xml: &'a str, cell: &str) -> Option<&'a str> {
    let start = sheet_xml.find(&format!("<c r=\"{cell}\""))?;
    let len = sheet_xml[start..].find("</c>")? + "</c>".len();
    Some(&sheet_xml[start..start + len])
}

#[test]
fn cells_keep_their_types() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("export_cells.xlsx");
    let mut sheet = data_sheet("2020_AC1_10");
    sheet
        .data
        .with_column(Series::new("REINSURED".into(), [true, false]))
        .unwrap();
    commit_workbook(&XlsxWriter, &[sheet], &target).expect("commit workbook");

    let xml = read_entry(&target, "xl/worksheets/sheet1.xml");
    let number = cell_xml(&xml, "B2").expect("numeric cell");
    assert!(!number.contains("t=\"s\""));
    assert!(number.contains("<v>12</v>"));
    assert!(cell_xml(&xml, "C2").expect("float cell").contains("<v>0.25</v>"));
    // null LOSS_RATIO in row 3
    assert!(cell_xml(&xml, "C3").is_none());
    assert!(!xml.contains("r=\"C3\""));
    let flag = cell_xml(&xml, "D2").expect("boolean cell");
    assert!(flag.contains("t=\"b\""));
    assert!(flag.contains("<v>1</v>"));
}

#[test]
fn rejected_sheet_name_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let (id, target) = store.allocate();

    let sheets = vec![data_sheet("2020_AC1_10"), data_sheet("bad[name]")];
    let error = commit_workbook(&XlsxWriter, &sheets, &target).unwrap_err();

    assert!(matches!(error, OutputError::Workbook { .. }));
    assert!(!target.exists());
    assert!(store.retrieve(&id.to_string()).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
