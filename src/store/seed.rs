use super::models::{
    AlertItem, AlertKind, DocKey, DocumentSlot, Documents, HistoryAction, HistoryEntry, Provider,
    ProviderStatus,
};

const SEED_UPLOAD_DATE: &str = "05 Ene 2026, 09:00";

fn seed_docs(keys: &[DocKey], expiry: &[(DocKey, &str)]) -> Documents {
    let mut docs = Documents::default();
    for k in keys {
        *docs.get_mut(*k) = DocumentSlot {
            uploaded: true,
            file_name: Some(format!("{k}_doc.pdf")),
            upload_date: Some(SEED_UPLOAD_DATE.to_string()),
            expiry_date: expiry
                .iter()
                .find(|(ek, _)| ek == k)
                .map(|(_, d)| d.to_string()),
            ocr_data: None,
        };
    }
    docs
}

#[allow(clippy::too_many_arguments)]
fn provider(
    id: &str,
    nombre: &str,
    nit: &str,
    correo: &str,
    telefono: Option<&str>,
    ciudad: &str,
    status: ProviderStatus,
    docs: Documents,
    created_at: &str,
    updated_at: &str,
) -> Provider {
    Provider {
        id: id.into(),
        nombre: nombre.into(),
        nit: nit.into(),
        correo: correo.into(),
        telefono: telefono.map(String::from),
        ciudad: Some(ciudad.into()),
        status,
        docs,
        created_at: created_at.into(),
        updated_at: updated_at.into(),
    }
}

pub fn providers() -> Vec<Provider> {
    vec![
        provider(
            "seed-1",
            "Suministros del Valle S.A.S.",
            "900.123.456-7",
            "contacto@suministrosvalle.co",
            Some("310 555 1234"),
            "Cali",
            ProviderStatus::Activo,
            seed_docs(
                &DocKey::ALL,
                &[(DocKey::Poliza, "2026-03-01"), (DocKey::Camara, "2026-12-31")],
            ),
            "10 Dic 2025, 08:00",
            "05 Feb 2026, 14:20",
        ),
        provider(
            "seed-2",
            "Logística Express Ltda.",
            "800.987.654-3",
            "admin@logisticaexpress.com",
            Some("321 444 5678"),
            "Bogotá",
            ProviderStatus::Activo,
            seed_docs(&DocKey::ALL, &[(DocKey::Rut, "2026-03-08")]),
            "15 Nov 2025, 10:00",
            "12 Feb 2026, 09:15",
        ),
        provider(
            "seed-3",
            "Aseo Industrial S.A.",
            "900.555.111-2",
            "ventas@aseoindustrial.co",
            Some("315 222 3333"),
            "Medellín",
            ProviderStatus::Pendiente,
            seed_docs(&[DocKey::Camara, DocKey::Rut], &[]),
            "20 Ene 2026, 14:00",
            "10 Feb 2026, 16:00",
        ),
        provider(
            "seed-4",
            "Transportes Rápidos S.A.",
            "800.222.333-1",
            "info@transportesrapidos.co",
            Some("300 111 9999"),
            "Barranquilla",
            ProviderStatus::Bloqueado,
            seed_docs(
                &[DocKey::Camara, DocKey::Rut, DocKey::Bancaria, DocKey::Arl],
                &[(DocKey::Arl, "2026-01-15")],
            ),
            "05 Oct 2025, 09:00",
            "15 Ene 2026, 11:30",
        ),
        provider(
            "seed-5",
            "Materiales y Construcciones Ltda.",
            "900.444.666-8",
            "compras@matyconstrucc.co",
            None,
            "Bucaramanga",
            ProviderStatus::Pendiente,
            seed_docs(&[DocKey::Rut], &[]),
            "01 Feb 2026, 11:00",
            "08 Feb 2026, 10:00",
        ),
        provider(
            "seed-6",
            "Seguridad Total Ltda.",
            "800.777.888-9",
            "operaciones@seguridadtotal.co",
            Some("318 666 7777"),
            "Bogotá",
            ProviderStatus::Bloqueado,
            seed_docs(&DocKey::ALL, &[(DocKey::Camara, "2025-12-15")]),
            "01 Sep 2025, 08:00",
            "20 Dic 2025, 16:00",
        ),
    ]
}

fn entry(
    id: &str,
    date: &str,
    action: HistoryAction,
    provider_id: &str,
    provider_name: &str,
    detail: &str,
) -> HistoryEntry {
    HistoryEntry {
        id: id.into(),
        date: date.into(),
        action,
        provider_id: Some(provider_id.into()),
        provider_name: provider_name.into(),
        detail: detail.into(),
    }
}

pub fn history() -> Vec<HistoryEntry> {
    use HistoryAction::*;
    vec![
        entry("h1", "14 Feb 2026, 10:42", DocumentoSubido, "seed-1", "Suministros del Valle", "RUT subido por primera vez"),
        entry("h2", "13 Feb 2026, 09:15", DocumentoActualizado, "seed-2", "Logística Express", "Certificación bancaria actualizada"),
        entry("h3", "12 Feb 2026, 16:30", EstadoCambiado, "seed-4", "Transportes Rápidos", "Bloqueado por certificación ARL vencida"),
        entry("h4", "12 Feb 2026, 14:00", DocumentoSubido, "seed-3", "Aseo Industrial", "Cámara de Comercio subida"),
        entry("h5", "11 Feb 2026, 11:20", EstadoCambiado, "seed-6", "Seguridad Total", "Bloqueado por Cámara de Comercio vencida"),
        entry("h6", "10 Feb 2026, 09:00", DocumentoActualizado, "seed-1", "Suministros del Valle", "Póliza de responsabilidad renovada"),
        entry("h7", "08 Feb 2026, 14:30", Creado, "seed-5", "Materiales y Construcciones", "Proveedor registrado en el sistema"),
        entry("h8", "05 Feb 2026, 10:00", Editado, "seed-1", "Suministros del Valle", "Datos de contacto actualizados"),
    ]
}

fn alert(
    id: &str,
    kind: AlertKind,
    provider_id: &str,
    provider: &str,
    doc_key: DocKey,
    date: Option<&str>,
) -> AlertItem {
    AlertItem {
        id: id.into(),
        kind,
        provider_id: provider_id.into(),
        provider: provider.into(),
        document: doc_key.label().into(),
        doc_key,
        date: date.map(String::from),
    }
}

pub fn alerts() -> Vec<AlertItem> {
    use AlertKind::*;
    vec![
        alert("a1", Proximo, "seed-1", "Suministros del Valle S.A.S.", DocKey::Poliza, Some("Vence el 01 Mar 2026")),
        alert("a2", Vencido, "seed-4", "Transportes Rápidos S.A.", DocKey::Arl, Some("Venció el 15 Ene 2026")),
        alert("a3", Faltante, "seed-3", "Aseo Industrial S.A.", DocKey::Bancaria, None),
        alert("a4", Proximo, "seed-2", "Logística Express Ltda.", DocKey::Rut, Some("Vence el 08 Mar 2026")),
        alert("a5", Vencido, "seed-6", "Seguridad Total Ltda.", DocKey::Camara, Some("Venció el 15 Dic 2025")),
        alert("a6", Faltante, "seed-5", "Materiales y Construcciones Ltda.", DocKey::Bancaria, None),
        alert("a7", Faltante, "seed-5", "Materiales y Construcciones Ltda.", DocKey::Camara, None),
    ]
}
