use crate::models::Reading;

const TEXT_HEADER: &str = "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario";

/// Render readings as a delimited text table: a header row, then one row per
/// reading in input order. Deterministic: the same sequence always produces
/// byte-identical output.
pub fn to_delimited_text(readings: &[Reading]) -> String {
    let mut content = String::from(TEXT_HEADER);
    content.push('\n');

    for reading in readings {
        content.push_str(&format!(
            "{}, {}, {}, {}, {}\n",
            reading.id_lectura,
            reading.valor_salida,
            reading.fecha_hora,
            reading.id_sensor,
            reading.id_usuario
        ));
    }

    content
}

/// Render readings as a complete HTML document for the platform's
/// print-to-PDF service. Every interpolated value is escaped, so a timestamp
/// or sensor value containing markup cannot corrupt the document.
pub fn to_html_table(readings: &[Reading]) -> String {
    let mut html = String::from(
        r#"<html>
  <body style="font-family: Arial, sans-serif; margin: 20px;">
    <h1 style="text-align: center;">Reporte de Sensor</h1>
    <table border="1" style="width: 100%; border-collapse: collapse; margin-top: 20px;">
      <thead>
        <tr>
          <th>Sensor</th>
          <th>Valor</th>
          <th>Fecha</th>
        </tr>
      </thead>
      <tbody>
"#,
    );

    for reading in readings {
        html.push_str(&format!(
            "        <tr>\n          <td>{}</td>\n          <td>{}</td>\n          <td>{}</td>\n        </tr>\n",
            escape_html(&reading.id_sensor.to_string()),
            escape_html(&reading.valor_salida.to_string()),
            escape_html(&reading.fecha_hora),
        ));
    }

    html.push_str(
        r#"      </tbody>
    </table>
  </body>
</html>
"#,
    );

    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
