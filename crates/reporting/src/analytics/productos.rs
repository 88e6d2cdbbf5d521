//! Agregaciones sobre las filas de ganancias por producto.

use contracts::reports::dto::GananciaProducto;

use super::ratios::{margen_porcentual, participacion};

/// Bandas fijas de margen, en orden de mayor a menor
pub const BANDA_ALTO: &str = "Alto (40%+)";
pub const BANDA_MEDIO: &str = "Medio (25-40%)";
pub const BANDA_BAJO: &str = "Bajo (15-25%)";
pub const BANDA_MUY_BAJO: &str = "Muy Bajo (<15%)";

/// Clasifica un margen porcentual en su banda. Exhaustivo y excluyente:
/// todo margen cae en exactamente una banda.
pub fn banda_de_margen(margen: f64) -> &'static str {
    if margen >= 40.0 {
        BANDA_ALTO
    } else if margen >= 25.0 {
        BANDA_MEDIO
    } else if margen >= 15.0 {
        BANDA_BAJO
    } else {
        BANDA_MUY_BAJO
    }
}

/// Conteo y porcentaje de productos por banda de margen
#[derive(Debug, Clone, PartialEq)]
pub struct BandaMargen {
    pub categoria: &'static str,
    pub cantidad: usize,
    pub porcentaje: f64,
}

/// Distribución de productos en las cuatro bandas, siempre en el mismo
/// orden (incluye bandas vacías).
pub fn distribucion_por_margen(productos: &[GananciaProducto]) -> Vec<BandaMargen> {
    let bandas = [BANDA_ALTO, BANDA_MEDIO, BANDA_BAJO, BANDA_MUY_BAJO];
    let mut conteos = [0usize; 4];

    for producto in productos {
        let banda = banda_de_margen(producto.margen_porcentaje);
        let indice = bandas.iter().position(|b| *b == banda).unwrap_or(3);
        conteos[indice] += 1;
    }

    bandas
        .iter()
        .zip(conteos)
        .map(|(categoria, cantidad)| BandaMargen {
            categoria,
            cantidad,
            porcentaje: participacion(cantidad as f64, productos.len() as f64),
        })
        .collect()
}

/// KPIs del conjunto de productos analizados
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumenProductos {
    pub productos: usize,
    pub unidades_vendidas: i64,
    pub ingresos_totales: f64,
    pub ganancia_total: f64,
    /// Margen promedio ponderado por ingresos, en %
    pub margen_promedio: f64,
}

pub fn resumen_productos(productos: &[GananciaProducto]) -> ResumenProductos {
    let ingresos_totales: f64 = productos.iter().map(|p| p.ingresos_producto).sum();
    let ganancia_total: f64 = productos.iter().map(|p| p.ganancia_estimada).sum();

    ResumenProductos {
        productos: productos.len(),
        unidades_vendidas: productos.iter().map(|p| p.cantidad_total_vendida).sum(),
        ingresos_totales,
        ganancia_total,
        margen_promedio: margen_porcentual(ganancia_total, ingresos_totales),
    }
}
