use comfy_table::{Cell, Table};

use super::Report;
use crate::display;
use crate::error::AppError;

pub fn render(report: &Report) -> Result<String, AppError> {
    let mut output = String::new();
    let s = &report.summary;

    output.push_str(&format!(
        "=== Reporte de Proveedores ({}) ===\n\n",
        report.generated_at
    ));

    // Summary
    output.push_str("--- Resumen ---\n");
    output.push_str(&format!("Proveedores:          {}\n", s.providers.todos));
    output.push_str(&format!("  Activos:            {}\n", s.providers.activo));
    output.push_str(&format!("  Completos:          {}\n", s.providers.completo));
    output.push_str(&format!("  Pendientes:         {}\n", s.providers.pendiente));
    output.push_str(&format!("  Bloqueados:         {}\n", s.providers.bloqueado));
    output.push_str(&format!(
        "Alertas:              {}\n",
        s.alerts.proximo + s.alerts.vencido + s.alerts.faltante
    ));
    output.push_str(&format!("  Próximas a vencer:  {}\n", s.alerts.proximo));
    output.push_str(&format!("  Vencidas:           {}\n", s.alerts.vencido));
    output.push_str(&format!("  Faltantes:          {}\n", s.alerts.faltante));
    output.push_str(&format!("Historial:            {}\n", s.history_entries));
    output.push_str(&format!("Sin leer:             {}\n", s.unread_notifications));

    if !report.providers.is_empty() {
        output.push_str("\n--- Proveedores ---\n");
        let mut table = Table::new();
        table.set_header(vec!["Nombre", "NIT", "Ciudad", "Estado", "Requeridos", "Docs"]);
        for p in &report.providers {
            let (done, total) = p.required_progress();
            table.add_row(vec![
                Cell::new(&p.nombre),
                Cell::new(&p.nit),
                Cell::new(p.ciudad.as_deref().unwrap_or("-")),
                display::status_cell(p.status),
                Cell::new(format!("{done}/{total}")),
                Cell::new(format!("{}/5", p.docs.uploaded_count())),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    if !report.alerts.is_empty() {
        output.push_str("\n--- Alertas ---\n");
        let mut table = Table::new();
        table.set_header(vec!["Tipo", "Proveedor", "Documento", "Fecha"]);
        for a in &report.alerts {
            table.add_row(vec![
                display::alert_cell(a.kind),
                Cell::new(&a.provider),
                Cell::new(&a.document),
                Cell::new(a.date.as_deref().unwrap_or("-")),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    Ok(output)
}
