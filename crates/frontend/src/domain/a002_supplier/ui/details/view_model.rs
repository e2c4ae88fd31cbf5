use contracts::domain::a002_supplier::aggregate::fields;
use contracts::domain::a002_supplier::{Supplier, SupplierPayload};
use contracts::shared::FieldErrors;
use std::rc::Rc;

use crate::domain::a002_supplier::api;
use crate::shared::dialogs::Dialogs;
use crate::shared::form_controller::{submit_form, FormCallbacks, SubmitOutcome};
use crate::shared::http::ApiClient;
use crate::shared::state::{Draft, FieldValue, FormMode, FormState, StateCell};

pub const SAVE_FAILED: &str = "Error al guardar proveedor";

/// Text of the supplier form, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<&Supplier> for SupplierDraft {
    fn from(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            phone: s.phone.clone(),
            email: s.email.clone(),
            address: s.address.clone(),
        }
    }
}

impl Draft for SupplierDraft {
    type Payload = SupplierPayload;

    fn set(&mut self, field: &str, value: FieldValue) {
        let FieldValue::Text(text) = value else {
            return;
        };
        match field {
            fields::NAME => self.name = text,
            fields::PHONE => self.phone = text,
            fields::EMAIL => self.email = text,
            fields::ADDRESS => self.address = text,
            _ => {}
        }
    }

    fn validate(&self) -> Result<SupplierPayload, FieldErrors> {
        let payload = SupplierPayload {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
        .trimmed();
        let errors = payload.validate();
        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

pub type SupplierFormState = FormState<SupplierDraft>;

pub fn initial_state(supplier: Option<&Supplier>) -> SupplierFormState {
    match supplier {
        Some(s) => FormState::new(FormMode::Edit(s.id), SupplierDraft::from(s)),
        None => FormState::new(FormMode::Create, SupplierDraft::default()),
    }
}

/// Create/edit flow of one open supplier form.
pub struct SupplierFormController<C, D> {
    state: C,
    client: ApiClient,
    dialogs: Rc<D>,
    callbacks: FormCallbacks,
}

impl<C: Clone, D> Clone for SupplierFormController<C, D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            client: self.client.clone(),
            dialogs: self.dialogs.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<C, D> SupplierFormController<C, D>
where
    C: StateCell<SupplierFormState>,
    D: Dialogs,
{
    pub fn new(state: C, client: ApiClient, dialogs: Rc<D>, callbacks: FormCallbacks) -> Self {
        Self {
            state,
            client,
            dialogs,
            callbacks,
        }
    }

    pub fn change(&self, field: &str, value: FieldValue) {
        self.state.modify(|s| s.change(field, value));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let client = self.client.clone();
        submit_form(
            &self.state,
            &*self.dialogs,
            &self.callbacks,
            SAVE_FAILED,
            move |mode, payload: SupplierPayload| async move {
                match mode {
                    FormMode::Create => api::create(&client, &payload).await,
                    FormMode::Edit(id) => api::update(&client, id, &payload).await,
                }
            },
        )
        .await
    }

    pub fn cancel(&self) {
        (self.callbacks.on_close)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dialogs::ScriptedDialogs;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::Method;
    use futures::FutureExt;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    struct Harness {
        mock: MockTransport,
        dialogs: Rc<ScriptedDialogs>,
        state: Rc<RefCell<SupplierFormState>>,
        saved: Rc<Cell<u32>>,
        closed: Rc<Cell<u32>>,
        controller: SupplierFormController<Rc<RefCell<SupplierFormState>>, ScriptedDialogs>,
    }

    fn harness(supplier: Option<&Supplier>) -> Harness {
        let mock = MockTransport::new();
        let dialogs = Rc::new(ScriptedDialogs::accepting());
        let state = Rc::new(RefCell::new(initial_state(supplier)));
        let saved = Rc::new(Cell::new(0));
        let closed = Rc::new(Cell::new(0));
        let callbacks = {
            let saved = saved.clone();
            let closed = closed.clone();
            FormCallbacks::new(
                move || {
                    saved.set(saved.get() + 1);
                    async {}.boxed_local()
                },
                move || closed.set(closed.get() + 1),
            )
        };
        let controller =
            SupplierFormController::new(state.clone(), mock.client(), dialogs.clone(), callbacks);
        Harness {
            mock,
            dialogs,
            state,
            saved,
            closed,
            controller,
        }
    }

    fn fill(h: &Harness) {
        for (field, value) in [
            (fields::NAME, " Droguería Central "),
            (fields::PHONE, "3001234567"),
            (fields::EMAIL, "ventas@central.co"),
            (fields::ADDRESS, "Cra 7 # 12-34"),
        ] {
            h.controller.change(field, FieldValue::Text(value.into()));
        }
    }

    fn supplier() -> Supplier {
        serde_json::from_value(json!({
            "id": 5, "nombre": "Central", "telefono": "1", "email": "a@b.co",
            "direccion": "x", "fecha_creacion": "2026-01-05T10:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_each_blank_field_blocks_submit() {
        for blank in [fields::NAME, fields::PHONE, fields::EMAIL, fields::ADDRESS] {
            let h = harness(None);
            fill(&h);
            h.controller.change(blank, FieldValue::Text("   ".into()));

            assert_eq!(h.controller.submit().await, SubmitOutcome::Invalid);
            let errors = h.state.borrow().errors().clone();
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![blank]);
            assert!(h.mock.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let h = harness(None);
        fill(&h);
        h.controller.change(fields::EMAIL, FieldValue::Text("ventas@central".into()));
        assert_eq!(h.controller.submit().await, SubmitOutcome::Invalid);
        assert_eq!(
            h.state.borrow().error(fields::EMAIL),
            Some(contracts::domain::a002_supplier::aggregate::EMAIL_INVALID)
        );
    }

    #[tokio::test]
    async fn test_create_sends_trimmed_payload_then_closes() {
        let h = harness(None);
        h.mock
            .respond(Method::Post, "/proveedores/", 201, serde_json::to_value(supplier()).unwrap());
        fill(&h);

        assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);
        let sent = h.mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body.as_ref().unwrap()["nombre"], "Droguería Central");
        assert_eq!((h.saved.get(), h.closed.get()), (1, 1));
    }

    #[tokio::test]
    async fn test_edit_updates_by_id() {
        let s = supplier();
        let h = harness(Some(&s));
        h.mock.respond(Method::Put, "/proveedores/5/", 200, serde_json::to_value(&s).unwrap());
        h.controller.change(fields::NAME, FieldValue::Text("Nuevo".into()));

        assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);
        assert_eq!(h.mock.calls(), vec!["PUT /proveedores/5/"]);
    }

    #[tokio::test]
    async fn test_save_ignores_response_body() {
        let h = harness(None);
        h.mock.respond_empty(Method::Post, "/proveedores/", 201);
        fill(&h);
        assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);

        let s = supplier();
        let h = harness(Some(&s));
        h.mock.respond(Method::Put, "/proveedores/5/", 200, json!({"id": 5}));
        assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);
        assert!(h.dialogs.alerts().is_empty());
        assert_eq!((h.saved.get(), h.closed.get()), (1, 1));
    }

    #[tokio::test]
    async fn test_server_field_errors_stay_in_form() {
        let h = harness(None);
        h.mock.respond(
            Method::Post,
            "/proveedores/",
            400,
            json!({"email": ["Ya existe un proveedor con este email."]}),
        );
        fill(&h);

        assert_eq!(h.controller.submit().await, SubmitOutcome::Rejected);
        let state = h.state.borrow();
        assert_eq!(state.error(fields::EMAIL), Some("Ya existe un proveedor con este email."));
        assert_eq!(state.draft().email, "ventas@central.co");
        assert!(!state.is_submitting());
        assert_eq!((h.saved.get(), h.closed.get()), (0, 0));
        assert!(h.dialogs.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_opaque_failure_alerts() {
        let h = harness(None);
        h.mock.fail(Method::Post, "/proveedores/", "offline");
        fill(&h);

        assert_eq!(h.controller.submit().await, SubmitOutcome::Failed);
        assert_eq!(h.dialogs.alerts(), vec![SAVE_FAILED]);
        assert_eq!(h.closed.get(), 0);
        assert_eq!(h.state.borrow().draft().phone, "3001234567");
    }
}
