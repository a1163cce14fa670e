use comfy_table::{Cell, Table};

use crate::display;
use crate::error::AppError;
use crate::store::DemoStore;
use crate::store::models::{DocKey, NewProvider, Provider, ProviderPatch, ProviderStatus};

fn require<'a>(store: &'a DemoStore, id: &str) -> Result<&'a Provider, AppError> {
    store
        .provider(id)
        .ok_or_else(|| AppError::ProviderNotFound(id.to_string()))
}

pub fn list_providers(
    store: &DemoStore,
    estado: Option<&str>,
    buscar: Option<&str>,
) -> anyhow::Result<()> {
    let status = estado.map(str::parse::<ProviderStatus>).transpose()?;
    let providers = store.find_providers(status, buscar);

    if providers.is_empty() {
        println!("No se encontraron proveedores.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Nombre", "NIT", "Ciudad", "Estado", "Requeridos"]);

    for p in &providers {
        let (done, total) = p.required_progress();
        table.add_row(vec![
            Cell::new(&p.id),
            Cell::new(&p.nombre),
            Cell::new(&p.nit),
            Cell::new(p.ciudad.as_deref().unwrap_or("-")),
            display::status_cell(p.status),
            Cell::new(format!("{done}/{total}")),
        ]);
    }

    println!("{table}");
    let counts = store.status_counts();
    println!(
        "\n{} proveedor(es) mostrados | todos {} | activo {} | pendiente {} | completo {} | bloqueado {}",
        providers.len(),
        counts.todos,
        counts.activo,
        counts.pendiente,
        counts.completo,
        counts.bloqueado
    );
    Ok(())
}

pub fn provider_info(store: &DemoStore, id: &str) -> anyhow::Result<()> {
    let p = require(store, id)?;

    println!("Proveedor: {}", p.nombre);
    println!("ID:        {}", p.id);
    println!("NIT:       {}", p.nit);
    println!("Correo:    {}", p.correo);
    if let Some(telefono) = &p.telefono {
        println!("Teléfono:  {telefono}");
    }
    if let Some(ciudad) = &p.ciudad {
        println!("Ciudad:    {ciudad}");
    }
    println!("Estado:    {}", display::status_style(p.status).label);
    println!(
        "Progreso:  {:.0}% de documentos requeridos",
        p.required_percent()
    );
    println!("Creado:    {}", p.created_at);
    println!("Editado:   {}", p.updated_at);

    let mut table = Table::new();
    table.set_header(vec!["Documento", "Requerido", "Archivo", "Subido", "Vence"]);
    for (key, slot) in p.docs.iter() {
        table.add_row(vec![
            Cell::new(key.label()),
            Cell::new(if key.is_required() { "Sí" } else { "No" }),
            Cell::new(slot.file_name.as_deref().unwrap_or("-")),
            Cell::new(slot.upload_date.as_deref().unwrap_or("-")),
            Cell::new(slot.expiry_date.as_deref().unwrap_or("-")),
        ]);
    }
    println!("\n{table}");

    if let Some(ocr) = &p.docs.camara.ocr_data {
        println!(
            "\nOCR Cámara: matrícula {} | año renovado {}",
            ocr.matricula.as_deref().unwrap_or("-"),
            ocr.anio_renovado.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

pub fn add_provider(store: &mut DemoStore, input: NewProvider) -> anyhow::Result<()> {
    let provider = store.try_add_provider(input)?;
    println!("Proveedor \"{}\" registrado ({})", provider.nombre, provider.id);
    Ok(())
}

pub fn edit_provider(store: &mut DemoStore, id: &str, patch: ProviderPatch) -> anyhow::Result<()> {
    store.try_update_provider(id, patch)?;
    let p = require(store, id)?;
    println!("\"{}\" actualizado", p.nombre);
    Ok(())
}

pub fn delete_provider(store: &mut DemoStore, id: &str) -> anyhow::Result<()> {
    let nombre = require(store, id)?.nombre.clone();
    store.delete_provider(id);
    println!("\"{nombre}\" eliminado");
    Ok(())
}

pub fn upload_document(
    store: &mut DemoStore,
    id: &str,
    doc: &str,
    archivo: Option<&str>,
) -> anyhow::Result<()> {
    require(store, id)?;
    let key: DocKey = doc.parse()?;
    store.upload_document(id, key, archivo, None);
    print_progress(require(store, id)?, key, "subido");
    Ok(())
}

pub fn remove_document(store: &mut DemoStore, id: &str, doc: &str) -> anyhow::Result<()> {
    require(store, id)?;
    let key: DocKey = doc.parse()?;
    if !require(store, id)?.docs.get(key).uploaded {
        anyhow::bail!("{} no ha sido subido", key.label());
    }
    store.remove_document(id, key);
    print_progress(require(store, id)?, key, "removido");
    Ok(())
}

fn print_progress(p: &Provider, key: DocKey, verb: &str) {
    let (done, total) = p.required_progress();
    println!(
        "{} {verb}. {}: {} ({done}/{total} requeridos)",
        key.label(),
        p.nombre,
        display::status_style(p.status).label
    );
}

pub fn approve_provider(store: &mut DemoStore, id: &str) -> anyhow::Result<()> {
    require(store, id)?;
    store.approve_provider(id);
    println!("\"{}\" aprobado", require(store, id)?.nombre);
    Ok(())
}

pub fn block_provider(store: &mut DemoStore, id: &str, motivo: &str) -> anyhow::Result<()> {
    require(store, id)?;
    let motivo = motivo.trim();
    if motivo.is_empty() {
        return Err(AppError::MissingField("motivo").into());
    }
    store.block_provider(id, motivo);
    println!("\"{}\" bloqueado: {motivo}", require(store, id)?.nombre);
    Ok(())
}

pub fn set_status(store: &mut DemoStore, id: &str, estado: &str) -> anyhow::Result<()> {
    require(store, id)?;
    let status: ProviderStatus = estado.parse()?;
    store.set_provider_status(id, status);
    println!(
        "\"{}\" → {}",
        require(store, id)?.nombre,
        display::status_style(status).label
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_an_error() {
        let mut store = DemoStore::seeded();
        let err = approve_provider(&mut store, "nope").unwrap_err();
        assert!(err.to_string().contains("Proveedor no encontrado"));
        assert_eq!(store.history().len(), 8);
    }

    #[test]
    fn test_remove_missing_document_is_rejected() {
        let mut store = DemoStore::seeded();
        // seed-3 has no Certificación Bancaria on file
        let err = remove_document(&mut store, "seed-3", "bancaria").unwrap_err();
        assert!(err.to_string().contains("no ha sido subido"));
    }

    #[test]
    fn test_block_requires_reason() {
        let mut store = DemoStore::seeded();
        assert!(block_provider(&mut store, "seed-1", "  ").is_err());
        block_provider(&mut store, "seed-1", "Documentos falsos").unwrap();
        assert_eq!(
            store.provider("seed-1").unwrap().status,
            ProviderStatus::Bloqueado
        );
    }
}
