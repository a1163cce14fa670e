use chrono::NaiveDate;
use comfy_table::{Cell, Table};

use crate::display;
use crate::error::AppError;
use crate::store::DemoStore;
use crate::store::clock;
use crate::store::models::{AlertItem, AlertKind};

/// Alerts, optionally narrowed to one provider and one type.
pub fn select_alerts<'a>(
    store: &'a DemoStore,
    provider_id: Option<&str>,
    tipo: Option<&str>,
) -> Result<Vec<&'a AlertItem>, AppError> {
    let kind = tipo.map(str::parse::<AlertKind>).transpose()?;
    let alerts = match provider_id {
        Some(id) => {
            if store.provider(id).is_none() {
                return Err(AppError::ProviderNotFound(id.to_string()));
            }
            store.alerts_for(id)
        }
        None => store.alerts().iter().collect(),
    };
    Ok(alerts
        .into_iter()
        .filter(|a| kind.is_none_or(|k| a.kind == k))
        .collect())
}

pub fn list_alerts(
    store: &DemoStore,
    provider_id: Option<&str>,
    tipo: Option<&str>,
) -> anyhow::Result<()> {
    let alerts = select_alerts(store, provider_id, tipo)?;
    if alerts.is_empty() {
        println!("Sin alertas.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Tipo", "Proveedor", "Documento", "Fecha"]);
    for a in &alerts {
        table.add_row(vec![
            Cell::new(&a.id),
            display::alert_cell(a.kind),
            Cell::new(&a.provider),
            Cell::new(&a.document),
            Cell::new(a.date.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");

    let counts = store.alert_counts();
    println!(
        "\nPróximos a vencer {} | Vencidos {} | Faltantes {}",
        counts.proximo, counts.vencido, counts.faltante
    );
    Ok(())
}

pub fn dismiss_alert(store: &mut DemoStore, id: &str) -> anyhow::Result<()> {
    if !store.alerts().iter().any(|a| a.id == id) {
        return Err(AppError::AlertNotFound(id.to_string()).into());
    }
    store.dismiss_alert(id);
    println!("Alerta {id} descartada");
    Ok(())
}

pub fn scan_expiry(store: &mut DemoStore, hoy: Option<&str>, dias: i64) -> anyhow::Result<()> {
    if dias < 0 {
        anyhow::bail!("--dias debe ser un número positivo");
    }
    let today = match hoy {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("fecha inválida '{raw}' (AAAA-MM-DD): {e}"))?,
        None => clock::today(),
    };

    let raised = store.scan_expiry(today, dias);
    println!(
        "{raised} alerta(s) nueva(s) al {} (ventana de {dias} días)",
        clock::display_date(today)
    );
    Ok(())
}
