use super::Report;
use crate::display;
use crate::error::AppError;

pub fn render(report: &Report) -> Result<String, AppError> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>Reporte de Proveedores</title>\n");
    html.push_str("<style>\n");
    html.push_str("  body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #0B1D3A; }\n");
    html.push_str("  h1 { border-bottom: 2px solid #0B1D3A; padding-bottom: 0.5rem; }\n");
    html.push_str("  table { border-collapse: collapse; width: 100%; margin: 1rem 0; }\n");
    html.push_str("  th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }\n");
    html.push_str("  th { background: #f5f5f5; font-weight: 600; }\n");
    html.push_str("  .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; margin: 1rem 0; }\n");
    html.push_str("  .stat { background: #f5f5f5; padding: 1rem; border-radius: 4px; }\n");
    html.push_str("  .stat .value { font-size: 1.5rem; font-weight: 700; }\n");
    html.push_str("  .stat .label { color: #666; font-size: 0.875rem; }\n");
    html.push_str("  .activo { color: #00C48C; } .pendiente { color: #F59E0B; } .completo { color: #3B82F6; } .bloqueado { color: #EF4444; }\n");
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<h1>Reporte de Proveedores</h1>\n<p>Generado: {}</p>\n",
        escape_html(&report.generated_at)
    ));

    let s = &report.summary;
    html.push_str("<div class=\"summary\">\n");
    write_stat(&mut html, "Proveedores", s.providers.todos);
    write_stat(&mut html, "Activos", s.providers.activo);
    write_stat(&mut html, "Completos", s.providers.completo);
    write_stat(&mut html, "Pendientes", s.providers.pendiente);
    write_stat(&mut html, "Bloqueados", s.providers.bloqueado);
    write_stat(
        &mut html,
        "Alertas",
        s.alerts.proximo + s.alerts.vencido + s.alerts.faltante,
    );
    html.push_str("</div>\n");

    if !report.providers.is_empty() {
        html.push_str("<h2>Proveedores</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Nombre</th><th>NIT</th><th>Correo</th><th>Estado</th><th>Requeridos</th></tr></thead>\n<tbody>\n");
        for p in &report.providers {
            let (done, total) = p.required_progress();
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{done}/{total}</td></tr>\n",
                escape_html(&p.nombre),
                escape_html(&p.nit),
                escape_html(&p.correo),
                p.status.as_str(),
                display::status_style(p.status).label,
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    if !report.alerts.is_empty() {
        html.push_str("<h2>Alertas</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Tipo</th><th>Proveedor</th><th>Documento</th><th>Fecha</th></tr></thead>\n<tbody>\n");
        for a in &report.alerts {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                a.kind.label(),
                escape_html(&a.provider),
                escape_html(&a.document),
                escape_html(a.date.as_deref().unwrap_or("-")),
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    if !report.history.is_empty() {
        html.push_str("<h2>Historial</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Fecha</th><th>Acción</th><th>Proveedor</th><th>Detalle</th></tr></thead>\n<tbody>\n");
        for h in &report.history {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&h.date),
                display::action_label(h.action),
                escape_html(&h.provider_name),
                escape_html(&h.detail),
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("</body>\n</html>\n");

    Ok(html)
}

fn write_stat(html: &mut String, label: &str, value: usize) {
    html.push_str(&format!(
        "<div class=\"stat\"><div class=\"value\">{value}</div><div class=\"label\">{label}</div></div>\n"
    ));
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DemoStore;
    use crate::store::models::NewProvider;

    #[test]
    fn test_escapes_user_text() {
        let mut store = DemoStore::seeded();
        store.add_provider(NewProvider {
            nombre: "<script>alert(1)</script> & Cía".into(),
            nit: "901.111.222-3".into(),
            correo: "x@y.co".into(),
            ..Default::default()
        });
        let out = render(&Report::build(&store)).unwrap();
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; Cía"));
    }
}
