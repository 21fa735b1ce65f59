use crate::normalize;
use serde::{Deserialize, Serialize};

/// A customer record as the API returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cliente {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre_cliente: String,
    #[serde(default)]
    pub email_cliente: String,
    #[serde(default)]
    pub celular_cliente: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClienteForm {
    #[serde(default)]
    pub nombre_cliente: String,
    #[serde(default)]
    pub email_cliente: String,
    #[serde(default)]
    pub celular_cliente: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nombre,
    Email,
    Celular,
}

impl ClienteForm {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Nombre => self.nombre_cliente = value,
            FormField::Email => self.email_cliente = value,
            FormField::Celular => self.celular_cliente = value,
        }
    }
}

impl From<&Cliente> for ClienteForm {
    fn from(c: &Cliente) -> Self {
        ClienteForm {
            nombre_cliente: c.nombre_cliente.clone(),
            email_cliente: c.email_cliente.clone(),
            celular_cliente: c.celular_cliente.clone(),
        }
    }
}

/// Customers whose name contains `query`, ignoring accents, case and spacing.
/// An empty query matches everyone.
pub fn search<'a>(clientes: &'a [Cliente], query: &str) -> Vec<&'a Cliente> {
    let needle = normalize::normalize(query);
    clientes
        .iter()
        .filter(|c| normalize::normalize(&c.nombre_cliente).contains(&needle))
        .collect()
}

pub fn find_by_id<'a>(clientes: &'a [Cliente], id: &str) -> Option<&'a Cliente> {
    clientes.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cliente(id: &str, nombre: &str) -> Cliente {
        Cliente {
            id: id.to_string(),
            nombre_cliente: nombre.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_wire_names() {
        let c = Cliente {
            id: "abc".to_string(),
            nombre_cliente: "Ana".to_string(),
            email_cliente: "ana@example.com".to_string(),
            celular_cliente: "555".to_string(),
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(
            v,
            json!({
                "_id": "abc",
                "nombre_cliente": "Ana",
                "email_cliente": "ana@example.com",
                "celular_cliente": "555"
            })
        );
        let back: Cliente = serde_json::from_value(v).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let c: Cliente = serde_json::from_value(json!({"_id": "1", "__v": 0})).unwrap();
        assert_eq!(c.id, "1");
        assert!(c.nombre_cliente.is_empty());
    }

    #[test]
    fn test_form_has_no_id() {
        let form = ClienteForm::from(&cliente("1", "Ana"));
        let v = serde_json::to_value(&form).unwrap();
        assert!(v.get("_id").is_none());
        assert_eq!(v["nombre_cliente"], "Ana");
    }

    #[test]
    fn test_form_set() {
        let mut form = ClienteForm::default();
        form.set(FormField::Nombre, "Ana");
        form.set(FormField::Email, "a@b.c");
        form.set(FormField::Celular, String::from("123"));
        assert_eq!(form.nombre_cliente, "Ana");
        assert_eq!(form.email_cliente, "a@b.c");
        assert_eq!(form.celular_cliente, "123");
    }

    #[test]
    fn test_search_accent_insensitive() {
        let list = vec![
            cliente("1", "Ángel Pérez"),
            cliente("2", "María José"),
            cliente("3", "Angela Ruiz"),
        ];
        let ids: Vec<&str> = search(&list, "angel").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let ids: Vec<&str> = search(&list, "MARIA jose").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        assert_eq!(search(&list, "").len(), 3);
        assert!(search(&list, "zzz").is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let list = vec![cliente("1", "Ana"), cliente("2", "Beto")];
        assert_eq!(find_by_id(&list, "2").map(|c| c.nombre_cliente.as_str()), Some("Beto"));
        assert!(find_by_id(&list, "3").is_none());
    }
}
