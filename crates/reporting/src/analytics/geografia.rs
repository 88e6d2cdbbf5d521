//! Agregaciones geográficas sobre las filas de ganancias por ciudad.

use std::collections::HashMap;

use contracts::reports::dto::GananciaCiudad;

use super::ratios::{participacion, ticket_promedio};

/// Bucket centinela para las ciudades sin provincia informada
pub const SIN_PROVINCIA: &str = "Sin Provincia";

/// Acumulado de ventas por provincia
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinciaAgrupada {
    pub provincia: String,
    pub ciudades: usize,
    pub total_ventas: i64,
    pub clientes_unicos: i64,
    pub ingresos_totales: f64,
    pub ganancia_estimada: f64,
}

/// Reduce las filas de ciudad a un acumulado por provincia, ordenado
/// descendente por ganancia estimada.
pub fn agrupar_por_provincia(ciudades: &[GananciaCiudad]) -> Vec<ProvinciaAgrupada> {
    let mut grupos: HashMap<String, ProvinciaAgrupada> = HashMap::new();

    for ciudad in ciudades {
        let provincia = ciudad
            .provincia
            .clone()
            .filter(|nombre| !nombre.trim().is_empty())
            .unwrap_or_else(|| SIN_PROVINCIA.to_string());

        let grupo = grupos
            .entry(provincia.clone())
            .or_insert_with(|| ProvinciaAgrupada {
                provincia,
                ciudades: 0,
                total_ventas: 0,
                clientes_unicos: 0,
                ingresos_totales: 0.0,
                ganancia_estimada: 0.0,
            });

        grupo.ciudades += 1;
        grupo.total_ventas += ciudad.total_ventas;
        grupo.clientes_unicos += ciudad.clientes_unicos;
        grupo.ingresos_totales += ciudad.ingresos_totales;
        grupo.ganancia_estimada += ciudad.ganancia_estimada;
    }

    let mut resultado: Vec<ProvinciaAgrupada> = grupos.into_values().collect();
    resultado.sort_by(|a, b| {
        b.ganancia_estimada
            .partial_cmp(&a.ganancia_estimada)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    resultado
}

/// KPIs geográficos del conjunto completo de ciudades
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumenGeografico {
    pub total_ciudades: usize,
    pub clientes_unicos: i64,
    pub total_ventas: i64,
    pub ingresos_totales: f64,
    pub ticket_promedio: f64,
}

pub fn resumen_geografico(ciudades: &[GananciaCiudad]) -> ResumenGeografico {
    let total_ventas: i64 = ciudades.iter().map(|c| c.total_ventas).sum();
    let ingresos_totales: f64 = ciudades.iter().map(|c| c.ingresos_totales).sum();

    ResumenGeografico {
        total_ciudades: ciudades.len(),
        clientes_unicos: ciudades.iter().map(|c| c.clientes_unicos).sum(),
        total_ventas,
        ingresos_totales,
        ticket_promedio: ticket_promedio(ingresos_totales, total_ventas),
    }
}

/// Fila derivada de la tabla detallada por ciudad
#[derive(Debug, Clone, PartialEq)]
pub struct DetalleCiudad {
    pub ciudad: String,
    pub provincia: Option<String>,
    pub total_ventas: i64,
    pub clientes_unicos: i64,
    pub ingresos_totales: f64,
    pub ganancia_estimada: f64,
    pub ticket_promedio: f64,
    /// Participación de la ciudad sobre los ingresos totales, en %
    pub participacion: f64,
    pub performance: &'static str,
}

/// Deriva ticket, participación y nivel de performance por ciudad
pub fn detalle_ciudades(ciudades: &[GananciaCiudad]) -> Vec<DetalleCiudad> {
    let ingresos_totales: f64 = ciudades.iter().map(|c| c.ingresos_totales).sum();

    ciudades
        .iter()
        .map(|ciudad| {
            let cuota = participacion(ciudad.ingresos_totales, ingresos_totales);
            DetalleCiudad {
                ciudad: ciudad.ciudad.clone(),
                provincia: ciudad.provincia.clone(),
                total_ventas: ciudad.total_ventas,
                clientes_unicos: ciudad.clientes_unicos,
                ingresos_totales: ciudad.ingresos_totales,
                ganancia_estimada: ciudad.ganancia_estimada,
                ticket_promedio: ticket_promedio(ciudad.ingresos_totales, ciudad.total_ventas),
                participacion: cuota,
                performance: nivel_performance(cuota),
            }
        })
        .collect()
}

fn nivel_performance(cuota: f64) -> &'static str {
    if cuota >= 10.0 {
        "Alta"
    } else if cuota >= 5.0 {
        "Media"
    } else {
        "Baja"
    }
}

/// Distribución de clientes: top N ciudades por clientes únicos, con su
/// ticket promedio
#[derive(Debug, Clone, PartialEq)]
pub struct ClientesCiudad {
    pub ciudad: String,
    pub clientes: i64,
    pub ticket_promedio: f64,
}

pub fn distribucion_clientes(ciudades: &[GananciaCiudad], top: usize) -> Vec<ClientesCiudad> {
    let mut filas: Vec<ClientesCiudad> = ciudades
        .iter()
        .map(|ciudad| ClientesCiudad {
            ciudad: ciudad.ciudad.clone(),
            clientes: ciudad.clientes_unicos,
            ticket_promedio: ticket_promedio(ciudad.ingresos_totales, ciudad.total_ventas),
        })
        .collect();
    filas.sort_by(|a, b| b.clientes.cmp(&a.clientes));
    filas.truncate(top);
    filas
}

/// Concentración: ganancia de las primeras `top` ciudades sobre los ingresos
/// totales del conjunto, en %. Asume las filas ya ordenadas por el servidor.
pub fn concentracion_top(ciudades: &[GananciaCiudad], top: usize) -> f64 {
    let ganancia_top: f64 = ciudades
        .iter()
        .take(top)
        .map(|c| c.ganancia_estimada)
        .sum();
    let ingresos_totales: f64 = ciudades.iter().map(|c| c.ingresos_totales).sum();
    participacion(ganancia_top, ingresos_totales)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ciudad(
        nombre: &str,
        provincia: Option<&str>,
        ventas: i64,
        clientes: i64,
        ingresos: f64,
        ganancia: f64,
    ) -> GananciaCiudad {
        GananciaCiudad {
            ciudad: nombre.to_string(),
            provincia: provincia.map(|p| p.to_string()),
            total_ventas: ventas,
            clientes_unicos: clientes,
            ingresos_totales: ingresos,
            ganancia_estimada: ganancia,
        }
    }

    fn muestra() -> Vec<GananciaCiudad> {
        vec![
            ciudad("Rosario", Some("Santa Fe"), 40, 25, 100000.0, 30000.0),
            ciudad("Santa Fe", Some("Santa Fe"), 20, 12, 50000.0, 12000.0),
            ciudad("Córdoba", Some("Córdoba"), 35, 20, 90000.0, 45000.0),
            ciudad("Ushuaia", None, 5, 4, 12000.0, 3000.0),
        ]
    }

    #[test]
    fn test_agrupa_y_ordena_por_ganancia() {
        let grupos = agrupar_por_provincia(&muestra());
        assert_eq!(grupos.len(), 3);
        // Córdoba (45000) > Santa Fe (42000) > Sin Provincia (3000)
        assert_eq!(grupos[0].provincia, "Córdoba");
        assert_eq!(grupos[1].provincia, "Santa Fe");
        assert_eq!(grupos[1].ciudades, 2);
        assert_eq!(grupos[1].total_ventas, 60);
        assert_eq!(grupos[2].provincia, SIN_PROVINCIA);
    }

    #[test]
    fn test_provincia_en_blanco_va_al_centinela() {
        let filas = vec![ciudad("X", Some("  "), 1, 1, 10.0, 1.0)];
        let grupos = agrupar_por_provincia(&filas);
        assert_eq!(grupos[0].provincia, SIN_PROVINCIA);
    }

    #[test]
    fn test_conservacion_de_ingresos() {
        let filas = muestra();
        let entrada: f64 = filas.iter().map(|c| c.ingresos_totales).sum();
        let salida: f64 = agrupar_por_provincia(&filas)
            .iter()
            .map(|g| g.ingresos_totales)
            .sum();
        assert!((entrada - salida).abs() < 1e-9);
    }

    #[test]
    fn test_resumen_geografico() {
        let resumen = resumen_geografico(&muestra());
        assert_eq!(resumen.total_ciudades, 4);
        assert_eq!(resumen.total_ventas, 100);
        assert_eq!(resumen.clientes_unicos, 61);
        assert_eq!(resumen.ticket_promedio, 2520.0);
    }

    #[test]
    fn test_resumen_sin_filas() {
        let resumen = resumen_geografico(&[]);
        assert_eq!(resumen.ticket_promedio, 0.0);
    }

    #[test]
    fn test_detalle_participacion_y_performance() {
        let detalle = detalle_ciudades(&muestra());
        // Rosario: 100000 / 252000 ≈ 39.7% → Alta
        assert_eq!(detalle[0].performance, "Alta");
        assert!((detalle[0].participacion - 39.68).abs() < 0.01);
        // Ushuaia: 12000 / 252000 ≈ 4.8% → Baja
        assert_eq!(detalle[3].performance, "Baja");
        assert_eq!(detalle[0].ticket_promedio, 2500.0);
    }

    #[test]
    fn test_detalle_sin_ingresos_no_divide() {
        let filas = vec![ciudad("X", None, 0, 0, 0.0, 0.0)];
        let detalle = detalle_ciudades(&filas);
        assert_eq!(detalle[0].participacion, 0.0);
        assert_eq!(detalle[0].ticket_promedio, 0.0);
    }

    #[test]
    fn test_distribucion_clientes_top() {
        let top = distribucion_clientes(&muestra(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].ciudad, "Rosario");
        assert_eq!(top[1].ciudad, "Córdoba");
    }

    #[test]
    fn test_concentracion_top() {
        let filas = muestra();
        let esperado = (30000.0 + 12000.0 + 45000.0 + 3000.0) / 252000.0 * 100.0;
        assert!((concentracion_top(&filas, 4) - esperado).abs() < 1e-9);
        assert_eq!(concentracion_top(&[], 5), 0.0);
    }
}
