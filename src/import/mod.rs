mod csv_export;
mod csv_import;

pub(crate) use csv_export::CsvExporter;
pub(crate) use csv_import::CsvImporter;
