use serde::{Deserialize, Serialize};

/// One sensor observation as returned by `GET /api/lecturas`.
///
/// Field names match the wire format exactly; `fecha_hora` is kept as the
/// server's timestamp string because readings are displayed and reported
/// verbatim, in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id_lectura: i64,
    pub valor_salida: f64,
    pub fecha_hora: String,
    pub id_sensor: i64,
    pub id_usuario: i64,
}
