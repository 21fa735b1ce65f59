//! Customer list state: the fetched records, the create/update form and the
//! transient notice shown after an action.
//!
//! Every action issues a single request. Successful mutations re-fetch the
//! list; failures become an error notice and are never retried.

use crate::api::ClientesBackend;
use crate::cliente::{self, Cliente, ClienteForm, FormField};
use tracing::{info, warn};

pub const FETCH_NOTICE: &str = "Error al obtener los clientes";
pub const SAVE_NOTICE: &str = "Error al guardar el cliente";
pub const DELETE_NOTICE: &str = "Error al eliminar el cliente";
pub const SUCCESS_NOTICE: &str = "Operación exitosa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn success() -> Self {
        Notice {
            severity: Severity::Success,
            message: SUCCESS_NOTICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub action: FormAction,
    pub values: ClienteForm,
}

pub struct ClienteSession<B> {
    backend: B,
    clientes: Vec<Cliente>,
    form: Option<FormState>,
    notice: Option<Notice>,
}

impl<B: ClientesBackend> ClienteSession<B> {
    pub fn new(backend: B) -> Self {
        ClienteSession {
            backend,
            clientes: Vec::new(),
            form: None,
            notice: None,
        }
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Re-fetch the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> bool {
        match self.backend.list().await {
            Ok(clientes) => {
                self.clientes = clientes;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch clientes");
                self.notice = Some(Notice::error(FETCH_NOTICE));
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            action: FormAction::Create,
            values: ClienteForm::default(),
        });
    }

    pub fn open_update(&mut self, cliente: &Cliente) {
        self.form = Some(FormState {
            action: FormAction::Update(cliente.id.clone()),
            values: ClienteForm::from(cliente),
        });
    }

    /// No-op when no form is open.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.values.set(field, value);
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form. The form stays open if the request fails.
    pub async fn save(&mut self) -> bool {
        let Some(form) = self.form.as_ref() else {
            return false;
        };
        let result = match &form.action {
            FormAction::Create => self.backend.create(&form.values).await,
            FormAction::Update(id) => self.backend.update(id, &form.values).await,
        };
        match result {
            Ok(()) => {
                info!(action = ?form.action, "cliente saved");
                self.refresh().await;
                self.close_form();
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save cliente");
                self.notice = Some(Notice::error(SAVE_NOTICE));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.backend.delete(id).await {
            Ok(()) => {
                info!(id, "cliente deleted");
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!(error = %e, id, "failed to delete cliente");
                self.notice = Some(Notice::error(DELETE_NOTICE));
                false
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn search(&self, query: &str) -> Vec<&Cliente> {
        cliente::search(&self.clientes, query)
    }
}
