//! Derivaciones sobre empleados y vendedores.

use contracts::reports::dto::{GananciaEmpleado, VentaVendedor};

use super::ratios::{margen_porcentual, participacion, ticket_promedio};

/// Fila de empleado con su margen calculado
#[derive(Debug, Clone, PartialEq)]
pub struct EmpleadoConMargen {
    pub empleado_id: i64,
    pub empleado_nombre: String,
    pub cantidad_ventas: i64,
    pub ingresos_generados: f64,
    pub ganancia_generada: f64,
    pub margen_calculado: f64,
}

pub fn empleados_con_margen(empleados: &[GananciaEmpleado]) -> Vec<EmpleadoConMargen> {
    empleados
        .iter()
        .map(|empleado| EmpleadoConMargen {
            empleado_id: empleado.empleado_id,
            empleado_nombre: empleado.empleado_nombre.clone(),
            cantidad_ventas: empleado.cantidad_ventas,
            ingresos_generados: empleado.ingresos_generados,
            ganancia_generada: empleado.ganancia_generada,
            margen_calculado: margen_porcentual(
                empleado.ganancia_generada,
                empleado.ingresos_generados,
            ),
        })
        .collect()
}

/// Fila de vendedor con promedio por venta y participación sobre el total
#[derive(Debug, Clone, PartialEq)]
pub struct VendedorDetalle {
    pub empleado_id: i64,
    pub empleado_nombre: String,
    pub cantidad_ventas: i64,
    pub total_vendido: f64,
    pub promedio_por_venta: f64,
    pub participacion: f64,
}

pub fn detalle_vendedores(vendedores: &[VentaVendedor]) -> Vec<VendedorDetalle> {
    let total_vendido_todos: f64 = vendedores.iter().map(|v| v.total_vendido).sum();

    vendedores
        .iter()
        .map(|vendedor| VendedorDetalle {
            empleado_id: vendedor.empleado_id,
            empleado_nombre: vendedor.empleado_nombre.clone(),
            cantidad_ventas: vendedor.cantidad_ventas,
            total_vendido: vendedor.total_vendido,
            promedio_por_venta: ticket_promedio(vendedor.total_vendido, vendedor.cantidad_ventas),
            participacion: participacion(vendedor.total_vendido, total_vendido_todos),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empleado_sin_ingresos_margen_cero() {
        let empleados = vec![GananciaEmpleado {
            empleado_id: 1,
            empleado_nombre: "Laura Pérez".to_string(),
            cantidad_ventas: 0,
            ingresos_generados: 0.0,
            ganancia_generada: 0.0,
        }];
        let derivados = empleados_con_margen(&empleados);
        assert_eq!(derivados[0].margen_calculado, 0.0);
    }

    #[test]
    fn test_participacion_vendedores_suma_cien() {
        let vendedores = vec![
            VentaVendedor {
                empleado_id: 1,
                empleado_nombre: "A".to_string(),
                cantidad_ventas: 10,
                total_vendido: 75000.0,
            },
            VentaVendedor {
                empleado_id: 2,
                empleado_nombre: "B".to_string(),
                cantidad_ventas: 5,
                total_vendido: 25000.0,
            },
        ];
        let detalle = detalle_vendedores(&vendedores);
        assert_eq!(detalle[0].participacion, 75.0);
        assert_eq!(detalle[1].participacion, 25.0);
        assert_eq!(detalle[0].promedio_por_venta, 7500.0);

        let suma: f64 = detalle.iter().map(|d| d.participacion).sum();
        assert!((suma - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vendedores_sin_ventas() {
        let detalle = detalle_vendedores(&[]);
        assert!(detalle.is_empty());
    }
}
