use super::Report;
use crate::error::AppError;

pub fn render(report: &Report) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DemoStore;

    #[test]
    fn test_json_uses_wire_names() {
        let out = render(&Report::build(&DemoStore::seeded())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["providers"][0]["status"], "activo");
        assert_eq!(value["alerts"][2]["type"], "faltante");
        assert_eq!(value["alerts"][2]["docKey"], "bancaria");
        assert_eq!(value["summary"]["providers"]["todos"], 6);
    }
}
