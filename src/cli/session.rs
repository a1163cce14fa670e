use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::{SessionCommand, SessionLine};
use crate::cli;
use crate::ocr::TextRecognizer;
use crate::store::DemoStore;
use crate::store::models::{NewProvider, ProviderPatch};

const PROMPT: &str = "provedocs> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Split a command line into words. Single or double quotes group words
/// and are removed; an unterminated quote is an error.
pub fn split_line(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        anyhow::bail!("comillas sin cerrar ({q})");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// One user session: a seeded store owned for the session's lifetime plus
/// the signed-in portal provider, if any.
pub struct Session {
    store: DemoStore,
    recognizers: HashMap<String, Arc<dyn TextRecognizer>>,
    logged_in: Option<String>,
}

impl Session {
    pub fn new(recognizers: HashMap<String, Arc<dyn TextRecognizer>>) -> Self {
        Self {
            store: DemoStore::seeded(),
            recognizers,
            logged_in: None,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &DemoStore {
        &self.store
    }

    /// Read commands until EOF or `exit`. A failing command reports its
    /// error and the session carries on.
    pub async fn run<R>(&mut self, reader: R, interactive: bool) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        loop {
            if interactive {
                print!("{PROMPT}");
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if !interactive && !is_skippable(&line) {
                println!("{PROMPT}{}", line.trim());
            }
            match self.execute(&line).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("Error: {e:#}"),
            }
        }
        tracing::info!("Session ended, state discarded");
        Ok(())
    }

    pub async fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        if is_skippable(line) {
            return Ok(Flow::Continue);
        }
        let words = split_line(line)?;
        if matches!(words[0].as_str(), "exit" | "quit" | "salir") {
            return Ok(Flow::Exit);
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                print!("{}", e.render());
                return Ok(Flow::Continue);
            }
            Err(e) => anyhow::bail!("{}", e.render().to_string().trim_end()),
        };

        tracing::debug!("Executing: {}", words.join(" "));
        self.dispatch(parsed.command).await?;
        Ok(Flow::Continue)
    }

    async fn dispatch(&mut self, command: SessionCommand) -> anyhow::Result<()> {
        let store = &mut self.store;
        match command {
            SessionCommand::Proveedores { estado, buscar } => {
                cli::provider::list_providers(store, estado.as_deref(), buscar.as_deref())?
            }
            SessionCommand::Ver { id } => cli::provider::provider_info(store, &id)?,
            SessionCommand::Agregar {
                nombre,
                nit,
                correo,
                telefono,
                ciudad,
            } => {
                let input = NewProvider {
                    nombre,
                    nit,
                    correo,
                    telefono,
                    ciudad,
                };
                cli::provider::add_provider(store, input)?;
            }
            SessionCommand::Editar {
                id,
                nombre,
                nit,
                correo,
                telefono,
                ciudad,
            } => {
                let patch = ProviderPatch {
                    nombre,
                    nit,
                    correo,
                    telefono: telefono.map(Some),
                    ciudad: ciudad.map(Some),
                };
                cli::provider::edit_provider(store, &id, patch)?;
            }
            SessionCommand::Eliminar { id } => {
                cli::provider::delete_provider(store, &id)?;
                if self.logged_in.as_deref() == Some(id.as_str()) {
                    self.logged_in = None;
                }
            }
            SessionCommand::Subir { id, doc, archivo } => {
                cli::provider::upload_document(store, &id, &doc, archivo.as_deref())?
            }
            SessionCommand::Quitar { id, doc } => cli::provider::remove_document(store, &id, &doc)?,
            SessionCommand::Aprobar { id } => cli::provider::approve_provider(store, &id)?,
            SessionCommand::Bloquear { id, motivo } => {
                cli::provider::block_provider(store, &id, &motivo)?
            }
            SessionCommand::Estado { id, estado } => cli::provider::set_status(store, &id, &estado)?,
            SessionCommand::Alertas { proveedor, tipo } => {
                cli::alerts::list_alerts(store, proveedor.as_deref(), tipo.as_deref())?
            }
            SessionCommand::Descartar { id } => cli::alerts::dismiss_alert(store, &id)?,
            SessionCommand::Vencimientos { hoy, dias } => {
                cli::alerts::scan_expiry(store, hoy.as_deref(), dias)?
            }
            SessionCommand::Notificaciones => cli::notifications::list_notifications(store)?,
            SessionCommand::Leer { id } => cli::notifications::mark_read(store, &id)?,
            SessionCommand::Limpiar => cli::notifications::clear(store)?,
            SessionCommand::Historial { proveedor } => {
                cli::history::show_history(store, proveedor.as_deref())?
            }
            SessionCommand::Ocr {
                file,
                engine,
                lang,
                vincular,
                export,
            } => {
                cli::ocr::run_ocr_in_session(
                    store,
                    &self.recognizers,
                    &file,
                    &engine,
                    &lang,
                    vincular.as_deref(),
                    export.as_deref(),
                )
                .await?
            }
            SessionCommand::Login { correo, clave } => {
                let provider = cli::portal::authenticate(store, &correo, &clave)?;
                println!("Sesión iniciada como {}", provider.nombre);
                self.logged_in = Some(provider.id.clone());
            }
            SessionCommand::Portal => match &self.logged_in {
                Some(id) => cli::portal::show_portal(store, id)?,
                None => anyhow::bail!("Inicia sesión primero: login --correo <correo> --clave <clave>"),
            },
            SessionCommand::Logout => {
                if self.logged_in.take().is_some() {
                    println!("Sesión cerrada");
                } else {
                    println!("No hay una sesión de portal activa");
                }
            }
            SessionCommand::Reporte { format, output } => {
                cli::report::generate_report(store, &format, output.as_deref())?
            }
            SessionCommand::Reiniciar => {
                store.reset_all();
                self.logged_in = None;
                println!("Datos restaurados");
            }
        }
        Ok(())
    }
}

fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr;
    use crate::store::models::{AlertKind, DocKey, ProviderStatus};

    fn session() -> Session {
        Session::new(ocr::build_recognizer_registry())
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line(r#"agregar --nombre "Aseo Total S.A.S." --nit 901.222.333-4"#).unwrap(),
            vec!["agregar", "--nombre", "Aseo Total S.A.S.", "--nit", "901.222.333-4"]
        );
        assert_eq!(
            split_line("bloquear seed-1 --motivo 'RUT  falso'").unwrap(),
            vec!["bloquear", "seed-1", "--motivo", "RUT  falso"]
        );
        assert_eq!(split_line("editar seed-1 --ciudad \"\"").unwrap()[3], "");
        assert!(split_line("ver \"seed-1").is_err());
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_script() {
        let mut s = session();
        let script = "\
            # alta y documentos
            agregar --nombre \"Aseo Total S.A.S.\" --nit \"901 222 333-4\" --correo compras@aseototal.co
            proveedores --estado pendiente
            ";
        s.run(script.as_bytes(), false).await.unwrap();

        let id = s.store().providers()[0].id.clone();
        assert_eq!(s.store().providers()[0].nombre, "Aseo Total S.A.S.");

        for doc in ["camara", "rut", "bancaria"] {
            s.execute(&format!("subir {id} {doc}")).await.unwrap();
        }
        assert_eq!(
            s.store().provider(&id).unwrap().status,
            ProviderStatus::Completo
        );

        s.execute(&format!("aprobar {id}")).await.unwrap();
        s.execute(&format!("quitar {id} rut")).await.unwrap();
        let p = s.store().provider(&id).unwrap();
        assert_eq!(p.status, ProviderStatus::Pendiente);
        assert!(s
            .store()
            .alerts()
            .iter()
            .any(|a| a.matches(&id, DocKey::Rut, AlertKind::Faltante)));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let mut s = session();
        let script = "aprobar nope\nsubir seed-3 pasaporte\nbogus\naprobar seed-3\n";
        s.run(script.as_bytes(), false).await.unwrap();
        assert_eq!(
            s.store().provider("seed-3").unwrap().status,
            ProviderStatus::Activo
        );
    }

    #[tokio::test]
    async fn test_duplicate_nit_rejected() {
        let mut s = session();
        let err = s
            .execute("agregar --nombre Otro --nit 900123456-7 --correo otro@x.co")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("NIT ya registrado"));
        assert_eq!(s.store().providers().len(), 6);
    }

    #[tokio::test]
    async fn test_exit_and_help() {
        let mut s = session();
        assert_eq!(s.execute("exit").await.unwrap(), Flow::Exit);
        assert_eq!(s.execute("  # comentario").await.unwrap(), Flow::Continue);
        assert_eq!(s.execute("help").await.unwrap(), Flow::Continue);

        s.run("aprobar seed-3\nquit\naprobar seed-5\n".as_bytes(), false)
            .await
            .unwrap();
        assert_eq!(
            s.store().provider("seed-5").unwrap().status,
            ProviderStatus::Pendiente
        );
    }

    #[tokio::test]
    async fn test_portal_login_flow() {
        let mut s = session();
        assert!(s.execute("portal").await.is_err());
        assert!(s
            .execute("login --correo ventas@aseoindustrial.co --clave 12")
            .await
            .is_err());
        s.execute("login --correo ventas@aseoindustrial.co --clave 1234")
            .await
            .unwrap();
        s.execute("portal").await.unwrap();
        s.execute("eliminar seed-3").await.unwrap();
        assert!(s.execute("portal").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let mut s = session();
        s.execute("eliminar seed-1").await.unwrap();
        s.execute("descartar a3").await.unwrap();
        s.execute("reiniciar").await.unwrap();
        assert_eq!(s.store().providers().len(), 6);
        assert_eq!(s.store().alerts().len(), 7);
        assert!(s.store().notifications().is_empty());
    }
}
