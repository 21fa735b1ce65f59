//! Accent-insensitive name normalization and a client for the customer
//! records (`/api/clientes`) REST API.

pub mod api;
pub mod cliente;
pub mod config;
pub mod error;
pub mod normalize;
pub mod session;

pub use api::{ApiClient, ClientesBackend};
pub use cliente::{Cliente, ClienteForm, FormField};
pub use config::Config;
pub use error::{Error, Result};
pub use normalize::{normalize, normalize_value};
pub use session::{ClienteSession, Notice, Severity};

use std::io::{self, BufRead};

/// Normalize every line of `reader`, one output line per input line.
pub fn normalize_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| normalize(&l)))
        .collect()
}

/// Tab-separated listing: id, nombre, email, celular.
pub fn format_table(clientes: &[&Cliente]) -> String {
    let mut out = String::new();
    for c in clientes {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            c.id, c.nombre_cliente, c.email_cliente, c.celular_cliente
        ));
    }
    out
}
