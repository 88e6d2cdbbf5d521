/// Formatea un monto en pesos: prefijo `$`, miles con punto, sin decimales.
/// `None` y NaN se tratan como cero.
///
/// # Ejemplos
/// ```
/// use reporting::shared::format::format_currency;
/// assert_eq!(format_currency(Some(1500000.0)), "$ 1.500.000");
/// assert_eq!(format_currency(None), "$ 0");
/// ```
pub fn format_currency(value: Option<f64>) -> String {
    let monto = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    let entero = monto.abs().round() as u64;
    if monto <= -0.5 {
        format!("-$ {}", agrupar_miles(entero))
    } else {
        format!("$ {}", agrupar_miles(entero))
    }
}

/// Porcentaje con un decimal y `%` al final. `None` y NaN rinden `0%`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(valor) => format!("{:.1}%", valor),
        None => "0%".to_string(),
    }
}

fn agrupar_miles(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Some(0.0)), "$ 0");
        assert_eq!(format_currency(Some(42.0)), "$ 42");
        assert_eq!(format_currency(Some(999.4)), "$ 999");
        assert_eq!(format_currency(Some(1000.0)), "$ 1.000");
        assert_eq!(format_currency(Some(1500000.0)), "$ 1.500.000");
        assert_eq!(format_currency(Some(-25300.0)), "-$ 25.300");
    }

    #[test]
    fn test_format_currency_valores_invalidos() {
        assert_eq!(format_currency(None), "$ 0");
        assert_eq!(format_currency(Some(f64::NAN)), "$ 0");
        assert_eq!(format_currency(Some(f64::INFINITY)), "$ 0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(33.333)), "33.3%");
        assert_eq!(format_percentage(Some(0.0)), "0.0%");
        assert_eq!(format_percentage(None), "0%");
        assert_eq!(format_percentage(Some(f64::NAN)), "0%");
    }
}
