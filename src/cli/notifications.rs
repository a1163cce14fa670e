use comfy_table::{Cell, Table};

use crate::display;
use crate::store::DemoStore;

pub fn list_notifications(store: &DemoStore) -> anyhow::Result<()> {
    let notifications = store.notifications();
    if notifications.is_empty() {
        println!("Sin notificaciones.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "", "Tipo", "Mensaje", "Fecha"]);
    for n in notifications {
        table.add_row(vec![
            Cell::new(&n.id),
            Cell::new(if n.read { " " } else { "●" }),
            display::severity_cell(n.severity),
            Cell::new(&n.message),
            Cell::new(&n.timestamp),
        ]);
    }
    println!("{table}");
    println!("\n{} sin leer", store.unread_count());
    Ok(())
}

pub fn mark_read(store: &mut DemoStore, id: &str) -> anyhow::Result<()> {
    if !store.notifications().iter().any(|n| n.id == id) {
        anyhow::bail!("Notificación no encontrada: {id}");
    }
    store.mark_notification_read(id);
    Ok(())
}

pub fn clear(store: &mut DemoStore) -> anyhow::Result<()> {
    let count = store.notifications().len();
    store.clear_notifications();
    println!("{count} notificación(es) eliminada(s)");
    Ok(())
}
