use report_gen::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings document with the given page size and column widths.
#[allow(dead_code)]
pub fn settings_xml(
    page_width: usize,
    page_height: usize,
    number_width: usize,
    date_width: usize,
    fio_width: usize,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<settings>
    <page>
        <width>{page_width}</width>
        <height>{page_height}</height>
    </page>
    <columns>
        <column>
            <title>Номер</title>
            <width>{number_width}</width>
        </column>
        <column>
            <title>Дата</title>
            <width>{date_width}</width>
        </column>
        <column>
            <title>ФИО</title>
            <width>{fio_width}</width>
        </column>
    </columns>
</settings>
"#
    )
}

/// Writes `content` to `name` inside `dir` and returns the full path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Three records that wrap differently at the default test widths.
#[allow(dead_code)]
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new("1", "01.01.2023", "Ivanov Ivan Ivanovich"),
        Record::new("2", "2023/01/02", "Petrov Petr"),
        Record::new("3", "03.01.2023", "Sidorov Sidor Sidorovich"),
    ]
}

/// `sample_records` in the tab-separated source format.
#[allow(dead_code)]
pub fn sample_data() -> String {
    sample_records()
        .iter()
        .map(|record| format!("{}\t{}\t{}\n", record.number, record.date, record.fio))
        .collect()
}
