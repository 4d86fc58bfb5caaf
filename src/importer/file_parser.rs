// ==========================================
// 排产主数据导入 - 数据集读取
// ==========================================
// 职责: 按源文件名提供有序记录流（含表头，表头由管道丢弃）
// 支持: 目录下的 CSV 文件 / 内存数据集
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// 一条原始记录（已按分隔符拆分）
pub type RawRecord = Vec<String>;

/// 有序记录流
pub type RecordStream<'a> = Box<dyn Iterator<Item = ImportResult<RawRecord>> + 'a>;

// ==========================================
// DatasetSource Trait
// ==========================================
// 用途: 源数据协作方接口
// 实现者: CsvDirectorySource, InMemorySource
pub trait DatasetSource {
    /// 打开指定源文件的记录流
    ///
    /// # 参数
    /// - source_stem: 源文件名（不含扩展名），如 "resource-group"
    ///
    /// # 返回
    /// - Ok(RecordStream): 第一条记录为表头
    /// - Err: 文件不存在、无法读取
    fn records(&self, source_stem: &str) -> ImportResult<RecordStream<'_>>;
}

// ==========================================
// CsvDirectorySource - 目录 CSV 数据集
// ==========================================
pub struct CsvDirectorySource {
    data_dir: PathBuf,
    delimiter: u8,
}

impl CsvDirectorySource {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    /// 指定字段分隔符（默认逗号）
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 源文件完整路径: <data_dir>/<stem>.csv
    pub fn file_path(&self, source_stem: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", source_stem))
    }
}

impl DatasetSource for CsvDirectorySource {
    fn records(&self, source_stem: &str) -> ImportResult<RecordStream<'_>> {
        let path = self.file_path(source_stem);

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(&path)?;
        let reader = ReaderBuilder::new()
            .has_headers(false) // 表头作为第一条记录交给管道
            .flexible(true) // 列数校验由管道负责
            .delimiter(self.delimiter)
            .from_reader(file);

        let stream = reader.into_records().map(|result| {
            result
                .map(|record| record.iter().map(str::to_string).collect())
                .map_err(ImportError::from)
        });

        Ok(Box::new(stream))
    }
}

// ==========================================
// InMemorySource - 内存数据集
// ==========================================
// 用于测试与嵌入式调用
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    files: HashMap<String, Vec<RawRecord>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个源文件（records 第一条应为表头）
    pub fn with_file<S: Into<String>>(mut self, source_stem: S, records: Vec<RawRecord>) -> Self {
        self.files.insert(source_stem.into(), records);
        self
    }

    /// 从 &str 二维数组构造记录
    pub fn rows(rows: &[&[&str]]) -> Vec<RawRecord> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }
}

impl DatasetSource for InMemorySource {
    fn records(&self, source_stem: &str) -> ImportResult<RecordStream<'_>> {
        let records = self
            .files
            .get(source_stem)
            .ok_or_else(|| ImportError::FileNotFound(source_stem.to_string()))?;
        Ok(Box::new(records.iter().cloned().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_source_reads_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = File::create(dir.path().join("plant.csv")).unwrap();
        writeln!(f, "id,name,description").unwrap();
        writeln!(f, "P1,Plant One,\"Main, north\"").unwrap();
        writeln!(f, "P2,Plant Two,").unwrap();

        let source = CsvDirectorySource::new(dir.path());
        let records: Vec<RawRecord> = source
            .records("plant")
            .unwrap()
            .collect::<ImportResult<_>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec!["id", "name", "description"]);
        assert_eq!(records[1][2], "Main, north");
        assert_eq!(records[2], vec!["P2", "Plant Two", ""]);
    }

    #[test]
    fn test_csv_source_keeps_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = File::create(dir.path().join("product.csv")).unwrap();
        writeln!(f, "id,name").unwrap();
        writeln!(f, "P1").unwrap();

        let source = CsvDirectorySource::new(dir.path());
        let records: Vec<RawRecord> = source
            .records("product")
            .unwrap()
            .collect::<ImportResult<_>>()
            .unwrap();
        assert_eq!(records[1].len(), 1);
    }

    #[test]
    fn test_csv_source_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = File::create(dir.path().join("product.csv")).unwrap();
        writeln!(f, "id;name").unwrap();
        writeln!(f, "P1;Coil 12,5").unwrap();

        let source = CsvDirectorySource::new(dir.path()).with_delimiter(b';');
        let mut stream = source.records("product").unwrap();
        stream.next();
        let row = stream.next().unwrap().unwrap();
        assert_eq!(row, vec!["P1", "Coil 12,5"]);
    }

    #[test]
    fn test_csv_source_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDirectorySource::new(dir.path());
        let result = source.records("routing");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new()
            .with_file("product", InMemorySource::rows(&[&["id", "name"], &["P1", "Coil"]]));
        assert_eq!(source.records("product").unwrap().count(), 2);
        assert!(source.records("plant").is_err());
    }
}
