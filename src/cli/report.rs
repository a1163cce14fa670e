use crate::config;
use crate::report::{Report, ReportFormat};
use crate::store::DemoStore;

pub fn parse_format(format: &str) -> ReportFormat {
    match format {
        "json" => ReportFormat::Json,
        "html" => ReportFormat::Html,
        "csv" => ReportFormat::Csv,
        "csv-detalle" => ReportFormat::CsvDetalle,
        _ => ReportFormat::Terminal,
    }
}

pub fn generate_report(
    store: &DemoStore,
    format: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let report = Report::build(store);
    let rendered = report.render(parse_format(format))?;

    match output {
        Some(path) => {
            let path = config::resolve_output(path)?;
            std::fs::write(&path, &rendered)?;
            println!("Reporte escrito en {}", path.display());
        }
        None => {
            println!("{rendered}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proveedores.csv");
        let store = DemoStore::seeded();

        generate_report(&store, "csv", Some(path.to_str().unwrap())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("\"Nombre\",\"NIT\""));
        assert_eq!(written.lines().count(), 7);
    }
}
