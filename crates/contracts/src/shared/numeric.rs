use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Los endpoints de finanzas devuelven los montos a veces como número y a
/// veces como string (herencia del driver SQL del servidor). La regla es
/// siempre la misma: parsear como número, 0 si no se puede.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Deserializador para campos f64 que pueden venir como string, null o faltar
pub fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| coerce_f64(&v)).unwrap_or(0.0))
}

/// Deserializador para campos i64 que pueden venir como string, null o faltar
pub fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| coerce_i64(&v)).unwrap_or(0))
}
