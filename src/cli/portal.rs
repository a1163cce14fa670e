use comfy_table::{Cell, Table};

use crate::config;
use crate::display;
use crate::error::AppError;
use crate::store::DemoStore;
use crate::store::models::Provider;

/// Mock provider sign-in: the email must belong to a registered provider and
/// any password of the minimum length is accepted.
pub fn authenticate<'a>(
    store: &'a DemoStore,
    correo: &str,
    clave: &str,
) -> Result<&'a Provider, AppError> {
    if correo.trim().is_empty() || clave.trim().is_empty() {
        return Err(AppError::LoginIncomplete);
    }
    let provider = store
        .find_by_correo(correo)
        .ok_or(AppError::LoginUnknownEmail)?;
    if clave.chars().count() < config::MIN_PASSWORD_LEN {
        return Err(AppError::LoginPasswordTooShort(config::MIN_PASSWORD_LEN));
    }
    tracing::info!("Portal login for {}", provider.id);
    Ok(provider)
}

pub fn show_portal(store: &DemoStore, provider_id: &str) -> anyhow::Result<()> {
    let p = store
        .provider(provider_id)
        .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;

    let (done, total) = p.required_progress();
    println!("Bienvenido, {}", p.nombre);
    println!(
        "Estado: {} | Documentos requeridos: {done}/{total} ({:.0}%)",
        display::status_style(p.status).label,
        p.required_percent()
    );

    let missing = p.missing_required();
    if !missing.is_empty() {
        let labels: Vec<_> = missing.iter().map(|k| k.label()).collect();
        println!("Pendientes: {}", labels.join(", "));
    }

    let mut docs = Table::new();
    docs.set_header(vec!["Documento", "Estado", "Archivo", "Vence"]);
    for (key, slot) in p.docs.iter() {
        let state = match (slot.uploaded, key.is_required()) {
            (true, _) => "Subido",
            (false, true) => "Requerido",
            (false, false) => "Opcional",
        };
        docs.add_row(vec![
            Cell::new(key.label()),
            Cell::new(state),
            Cell::new(slot.file_name.as_deref().unwrap_or("-")),
            Cell::new(slot.expiry_date.as_deref().unwrap_or("-")),
        ]);
    }
    println!("\n{docs}");

    let alerts = store.alerts_for(provider_id);
    if !alerts.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Alerta", "Documento", "Fecha"]);
        for a in alerts {
            table.add_row(vec![
                display::alert_cell(a.kind),
                Cell::new(&a.document),
                Cell::new(a.date.as_deref().unwrap_or("-")),
            ]);
        }
        println!("\n{table}");
    }

    let history = store.history_for(provider_id);
    if !history.is_empty() {
        println!("\nActividad reciente:");
        for h in history {
            println!("  {}  {}: {}", h.date, display::action_label(h.action), h.detail);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate() {
        let store = DemoStore::seeded();
        let p = authenticate(&store, "  VENTAS@aseoindustrial.co ", "1234").unwrap();
        assert_eq!(p.id, "seed-3");
    }

    #[test]
    fn test_authenticate_failures() {
        let store = DemoStore::seeded();
        assert!(matches!(
            authenticate(&store, "", "1234"),
            Err(AppError::LoginIncomplete)
        ));
        assert!(matches!(
            authenticate(&store, "ventas@aseoindustrial.co", "   "),
            Err(AppError::LoginIncomplete)
        ));
        assert!(matches!(
            authenticate(&store, "nadie@example.co", "1234"),
            Err(AppError::LoginUnknownEmail)
        ));
        assert!(matches!(
            authenticate(&store, "ventas@aseoindustrial.co", "123"),
            Err(AppError::LoginPasswordTooShort(4))
        ));
    }

    #[test]
    fn test_show_portal_unknown_provider() {
        let store = DemoStore::seeded();
        assert!(show_portal(&store, "seed-1").is_ok());
        assert!(show_portal(&store, "gone").is_err());
    }
}
