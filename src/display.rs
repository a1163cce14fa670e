use comfy_table::{Cell, Color};

use crate::store::models::{AlertKind, HistoryAction, ProviderStatus, Severity};

pub struct Style {
    pub label: &'static str,
    pub color: Color,
}

static STATUS_STYLES: [(ProviderStatus, Style); 4] = [
    (
        ProviderStatus::Activo,
        Style {
            label: "Activo",
            color: Color::Green,
        },
    ),
    (
        ProviderStatus::Pendiente,
        Style {
            label: "Pendiente",
            color: Color::Yellow,
        },
    ),
    (
        ProviderStatus::Completo,
        Style {
            label: "Completo",
            color: Color::Blue,
        },
    ),
    (
        ProviderStatus::Bloqueado,
        Style {
            label: "Bloqueado",
            color: Color::Red,
        },
    ),
];

static ALERT_STYLES: [(AlertKind, Style); 3] = [
    (
        AlertKind::Proximo,
        Style {
            label: AlertKind::Proximo.label(),
            color: Color::Yellow,
        },
    ),
    (
        AlertKind::Vencido,
        Style {
            label: AlertKind::Vencido.label(),
            color: Color::Red,
        },
    ),
    (
        AlertKind::Faltante,
        Style {
            label: AlertKind::Faltante.label(),
            color: Color::Grey,
        },
    ),
];

pub fn status_style(status: ProviderStatus) -> &'static Style {
    STATUS_STYLES
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, style)| style)
        .unwrap_or(&STATUS_STYLES[1].1)
}

pub fn alert_style(kind: AlertKind) -> &'static Style {
    ALERT_STYLES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, style)| style)
        .unwrap_or(&ALERT_STYLES[2].1)
}

pub fn status_cell(status: ProviderStatus) -> Cell {
    let style = status_style(status);
    Cell::new(style.label).fg(style.color)
}

pub fn alert_cell(kind: AlertKind) -> Cell {
    let style = alert_style(kind);
    Cell::new(style.label).fg(style.color)
}

pub fn severity_cell(severity: Severity) -> Cell {
    let color = match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Info => Color::Cyan,
    };
    Cell::new(severity.as_str()).fg(color)
}

pub fn action_label(action: HistoryAction) -> &'static str {
    match action {
        HistoryAction::Creado => "Creado",
        HistoryAction::DocumentoSubido => "Documento subido",
        HistoryAction::DocumentoActualizado => "Documento actualizado",
        HistoryAction::EstadoCambiado => "Estado cambiado",
        HistoryAction::Editado => "Editado",
        HistoryAction::Eliminado => "Eliminado",
        HistoryAction::OcrProcesado => "OCR procesado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_style() {
        for status in ProviderStatus::ALL {
            let style = status_style(status);
            assert!(style.label.eq_ignore_ascii_case(status.as_str()));
        }
        assert_eq!(alert_style(AlertKind::Proximo).label, "Próximo a vencer");
        assert_eq!(alert_style(AlertKind::Vencido).label, "Vencido");
        assert_eq!(alert_style(AlertKind::Faltante).label, AlertKind::Faltante.label());
    }
}
