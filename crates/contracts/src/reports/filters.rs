use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const FORMATO_FECHA: &str = "%Y-%m-%d";

/// Filtros compartidos por todos los reportes de finanzas.
///
/// Los valores en blanco se omiten al armar el query string. Un período es
/// válido sólo cuando ambas fechas están presentes y `desde <= hasta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Fecha inicial del período, ISO `YYYY-MM-DD`
    pub desde: String,
    /// Fecha final del período, ISO `YYYY-MM-DD`
    pub hasta: String,
    /// Agrupación temporal: `diario`, `mensual` o `anual`
    pub periodo: String,
    pub empleado_id: String,
    pub ciudad: String,
    /// Tope de filas para los reportes de ranking; 0 u omitido = sin tope
    pub limite: Option<u32>,
}

impl Default for ReportFilters {
    fn default() -> Self {
        // Período por defecto: el último mes
        let hoy = Utc::now().date_naive();
        let hace_un_mes = hoy.checked_sub_months(Months::new(1)).unwrap_or(hoy);

        Self {
            desde: hace_un_mes.format(FORMATO_FECHA).to_string(),
            hasta: hoy.format(FORMATO_FECHA).to_string(),
            periodo: "mensual".to_string(),
            empleado_id: String::new(),
            ciudad: String::new(),
            limite: Some(20),
        }
    }
}

/// Períodos predefinidos de la barra de filtros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetPeriodo {
    Hoy,
    UltimaSemana,
    UltimoMes,
    UltimoTrimestre,
    UltimoAnio,
}

impl PresetPeriodo {
    pub fn label(&self) -> &'static str {
        match self {
            PresetPeriodo::Hoy => "Hoy",
            PresetPeriodo::UltimaSemana => "Última semana",
            PresetPeriodo::UltimoMes => "Último mes",
            PresetPeriodo::UltimoTrimestre => "Último trimestre",
            PresetPeriodo::UltimoAnio => "Último año",
        }
    }

    /// Agrupación temporal que corresponde al preset
    pub fn periodo(&self) -> &'static str {
        match self {
            PresetPeriodo::Hoy | PresetPeriodo::UltimaSemana => "diario",
            PresetPeriodo::UltimoMes | PresetPeriodo::UltimoTrimestre => "mensual",
            PresetPeriodo::UltimoAnio => "anual",
        }
    }
}

/// Overrides parciales que el orquestador mezcla sobre los filtros base
/// (`{ ...filtros, limite: 5 }` del tablero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOverrides {
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub periodo: Option<String>,
    pub empleado_id: Option<String>,
    pub ciudad: Option<String>,
    pub limite: Option<u32>,
}

impl FilterOverrides {
    /// Override que sólo pisa el límite de filas
    pub fn limite(valor: u32) -> Self {
        Self {
            limite: Some(valor),
            ..Default::default()
        }
    }
}

impl ReportFilters {
    /// Copia de los filtros con los overrides aplicados
    pub fn merged(&self, overrides: &FilterOverrides) -> ReportFilters {
        ReportFilters {
            desde: overrides.desde.clone().unwrap_or_else(|| self.desde.clone()),
            hasta: overrides.hasta.clone().unwrap_or_else(|| self.hasta.clone()),
            periodo: overrides
                .periodo
                .clone()
                .unwrap_or_else(|| self.periodo.clone()),
            empleado_id: overrides
                .empleado_id
                .clone()
                .unwrap_or_else(|| self.empleado_id.clone()),
            ciudad: overrides
                .ciudad
                .clone()
                .unwrap_or_else(|| self.ciudad.clone()),
            limite: overrides.limite.or(self.limite),
        }
    }

    /// Aplica un período predefinido sobre los filtros actuales
    pub fn aplicar_preset(&mut self, preset: PresetPeriodo) {
        let hoy = Utc::now().date_naive();
        let desde = match preset {
            PresetPeriodo::Hoy => hoy,
            PresetPeriodo::UltimaSemana => hoy - chrono::Duration::days(7),
            PresetPeriodo::UltimoMes => hoy.checked_sub_months(Months::new(1)).unwrap_or(hoy),
            PresetPeriodo::UltimoTrimestre => {
                hoy.checked_sub_months(Months::new(3)).unwrap_or(hoy)
            }
            PresetPeriodo::UltimoAnio => hoy.checked_sub_months(Months::new(12)).unwrap_or(hoy),
        };

        self.desde = desde.format(FORMATO_FECHA).to_string();
        self.hasta = hoy.format(FORMATO_FECHA).to_string();
        self.periodo = preset.periodo().to_string();
    }

    /// Pares `(clave, valor)` para el query string, omitiendo los vacíos.
    /// El orden no importa: las claves son únicas.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let campos = [
            ("desde", &self.desde),
            ("hasta", &self.hasta),
            ("periodo", &self.periodo),
            ("empleado_id", &self.empleado_id),
            ("ciudad", &self.ciudad),
        ];
        for (clave, valor) in campos {
            if !valor.trim().is_empty() {
                pairs.push((clave.to_string(), valor.clone()));
            }
        }
        if let Some(limite) = self.limite {
            if limite > 0 {
                pairs.push(("limite".to_string(), limite.to_string()));
            }
        }
        pairs
    }

    pub fn fecha_desde(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.desde, FORMATO_FECHA).ok()
    }

    pub fn fecha_hasta(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.hasta, FORMATO_FECHA).ok()
    }

    /// `true` sólo si ambas fechas parsean y `desde <= hasta`
    pub fn es_periodo_valido(&self) -> bool {
        match (self.fecha_desde(), self.fecha_hasta()) {
            (Some(desde), Some(hasta)) => desde <= hasta,
            _ => false,
        }
    }

    /// Días cubiertos por el período; 0 si el período no es válido
    pub fn dias_en_periodo(&self) -> i64 {
        if !self.es_periodo_valido() {
            return 0;
        }
        match (self.fecha_desde(), self.fecha_hasta()) {
            (Some(desde), Some(hasta)) => (hasta - desde).num_days(),
            _ => 0,
        }
    }

    /// Valida los filtros antes de emitir requests
    pub fn validar(&self) -> anyhow::Result<()> {
        if !self.es_periodo_valido() {
            anyhow::bail!("El período seleccionado no es válido");
        }
        Ok(())
    }

    /// Descripción legible del período, estilo `12 jul 2025 - 12 ago 2025`
    pub fn descripcion_periodo(&self) -> String {
        match (self.fecha_desde(), self.fecha_hasta()) {
            (Some(desde), Some(hasta)) => {
                format!("{} - {}", fecha_corta(desde), fecha_corta(hasta))
            }
            _ => "Período no definido".to_string(),
        }
    }
}

const MESES_CORTOS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

fn fecha_corta(fecha: NaiveDate) -> String {
    use chrono::Datelike;
    let mes = MESES_CORTOS[(fecha.month0()) as usize];
    format!("{} {} {}", fecha.day(), mes, fecha.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtros(desde: &str, hasta: &str) -> ReportFilters {
        ReportFilters {
            desde: desde.to_string(),
            hasta: hasta.to_string(),
            ..ReportFilters::default()
        }
    }

    #[test]
    fn test_default_es_valido() {
        let filtros = ReportFilters::default();
        assert!(filtros.es_periodo_valido());
        assert_eq!(filtros.periodo, "mensual");
        assert_eq!(filtros.limite, Some(20));
    }

    #[test]
    fn test_desde_mayor_que_hasta_invalida() {
        let filtros = filtros("2025-07-10", "2025-07-01");
        assert!(!filtros.es_periodo_valido());
        assert_eq!(filtros.dias_en_periodo(), 0);
        assert!(filtros.validar().is_err());
    }

    #[test]
    fn test_fechas_faltantes_invalidan() {
        let filtros = filtros("", "2025-07-01");
        assert!(!filtros.es_periodo_valido());
    }

    #[test]
    fn test_dias_en_periodo() {
        let filtros = filtros("2025-07-01", "2025-07-31");
        assert_eq!(filtros.dias_en_periodo(), 30);
    }

    #[test]
    fn test_query_pairs_omite_vacios() {
        let mut base = filtros("2025-07-01", "2025-07-31");
        base.empleado_id = String::new();
        base.ciudad = "  ".to_string();
        base.limite = Some(10);

        let pairs = base.query_pairs();
        let claves: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(claves, vec!["desde", "hasta", "periodo", "limite"]);
    }

    #[test]
    fn test_limite_cero_se_omite() {
        let mut base = filtros("2025-07-01", "2025-07-31");
        base.limite = Some(0);
        assert!(!base.query_pairs().iter().any(|(k, _)| k == "limite"));
    }

    #[test]
    fn test_merged_solo_pisa_overrides() {
        let base = filtros("2025-07-01", "2025-07-31");
        let merged = base.merged(&FilterOverrides::limite(5));
        assert_eq!(merged.limite, Some(5));
        assert_eq!(merged.desde, base.desde);
        assert_eq!(merged.periodo, base.periodo);
    }

    #[test]
    fn test_aplicar_preset_semana() {
        let mut base = ReportFilters::default();
        base.aplicar_preset(PresetPeriodo::UltimaSemana);
        assert_eq!(base.periodo, "diario");
        assert_eq!(base.dias_en_periodo(), 7);
    }

    #[test]
    fn test_descripcion_periodo() {
        let base = filtros("2025-07-01", "2025-08-15");
        assert_eq!(base.descripcion_periodo(), "1 jul 2025 - 15 ago 2025");
        assert_eq!(
            filtros("", "").descripcion_periodo(),
            "Período no definido"
        );
    }
}
