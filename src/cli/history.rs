use comfy_table::{Cell, Table};

use crate::display;
use crate::error::AppError;
use crate::store::DemoStore;

pub fn show_history(store: &DemoStore, provider_id: Option<&str>) -> anyhow::Result<()> {
    let entries: Vec<_> = match provider_id {
        Some(id) => {
            if store.provider(id).is_none() {
                return Err(AppError::ProviderNotFound(id.to_string()).into());
            }
            store.history_for(id)
        }
        None => store.history().iter().collect(),
    };

    if entries.is_empty() {
        println!("Sin movimientos.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Fecha", "Acción", "Proveedor", "Detalle"]);
    for h in &entries {
        table.add_row(vec![
            Cell::new(&h.date),
            Cell::new(display::action_label(h.action)),
            Cell::new(&h.provider_name),
            Cell::new(&h.detail),
        ]);
    }
    println!("{table}");
    Ok(())
}
