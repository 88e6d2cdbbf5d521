use chrono::Utc;

use contracts::dashboards::DashboardBundle;
use contracts::enums::ReportKey;

use super::state::{ReportData, ReportesState};

/// Acciones sobre el estado de reportes: conjunto cerrado, sin mutación
/// por fuera del reducer.
#[derive(Debug, Clone)]
pub enum ReportesAction {
    /// Guarda el resultado en el slot de su clave, haya salido bien o mal
    SetData(ReportData),
    SetLoading { key: ReportKey, loading: bool },
    SetError(String),
    ClearError,
    /// Compromete el bundle (parcial o completo) y sella `last_update`
    SetDashboardData(DashboardBundle),
    RefreshData,
    RefreshComplete,
    /// Vacía todos los slots de datos y el error global. No toca los flags
    /// de loading: no debe invocarse con una carga en vuelo (restricción
    /// del llamador, sin guardia).
    ClearData,
}

/// Transición pura: `(estado, acción) → estado nuevo`. El snapshot de
/// entrada no se modifica.
pub fn reduce(state: &ReportesState, action: ReportesAction) -> ReportesState {
    let mut next = state.clone();
    match action {
        ReportesAction::SetData(data) => {
            next.data.insert(data.key(), data);
        }
        ReportesAction::SetLoading { key, loading } => {
            next.loading.insert(key, loading);
        }
        ReportesAction::SetError(message) => {
            next.error = Some(message);
        }
        ReportesAction::ClearError => {
            next.error = None;
        }
        ReportesAction::SetDashboardData(bundle) => {
            next.dashboard_data = Some(bundle);
            next.last_update = Some(Utc::now());
        }
        ReportesAction::RefreshData => {
            next.refreshing = true;
            next.last_refresh = Some(Utc::now());
        }
        ReportesAction::RefreshComplete => {
            next.refreshing = false;
            next.last_update = Some(Utc::now());
        }
        ReportesAction::ClearData => {
            next.data.clear();
            next.dashboard_data = None;
            next.error = None;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::reports::result::ReportResult;

    fn dato_ok() -> ReportData {
        ReportData::AniosDisponibles(ReportResult::ok(vec![2023, 2024]))
    }

    #[test]
    fn test_set_data_guarda_en_su_slot() {
        let estado = ReportesState::default();
        let siguiente = reduce(&estado, ReportesAction::SetData(dato_ok()));

        assert!(siguiente.data.contains_key(&ReportKey::AniosDisponibles));
        // el snapshot de entrada quedó intacto
        assert!(estado.data.is_empty());
    }

    #[test]
    fn test_set_data_con_falla_tambien_se_guarda() {
        let fallido = ReportData::BalanceGeneral(ReportResult::failed("sin conexión"));
        let siguiente = reduce(&ReportesState::default(), ReportesAction::SetData(fallido));

        let guardado = siguiente.data.get(&ReportKey::BalanceGeneral).unwrap();
        assert!(!guardado.success());
        assert_eq!(guardado.error(), Some("sin conexión"));
    }

    #[test]
    fn test_loading_por_clave() {
        let estado = reduce(
            &ReportesState::default(),
            ReportesAction::SetLoading {
                key: ReportKey::ResumenFinanciero,
                loading: true,
            },
        );
        assert_eq!(
            estado.loading.get(&ReportKey::ResumenFinanciero),
            Some(&true)
        );
        assert!(estado.loading.get(&ReportKey::BalanceGeneral).is_none());
    }

    #[test]
    fn test_clear_data_no_toca_loading() {
        let mut estado = ReportesState::default();
        estado = reduce(&estado, ReportesAction::SetData(dato_ok()));
        estado = reduce(&estado, ReportesAction::SetError("algo falló".to_string()));
        estado = reduce(
            &estado,
            ReportesAction::SetLoading {
                key: ReportKey::FlujoDeFondos,
                loading: true,
            },
        );
        estado = reduce(&estado, ReportesAction::SetDashboardData(Default::default()));

        let limpio = reduce(&estado, ReportesAction::ClearData);

        assert!(limpio.data.is_empty());
        assert!(limpio.error.is_none());
        assert!(limpio.dashboard_data.is_none());
        // los flags de loading quedan como estaban
        assert_eq!(limpio.loading.get(&ReportKey::FlujoDeFondos), Some(&true));
    }

    #[test]
    fn test_refresh_marca_y_desmarca() {
        let estado = reduce(&ReportesState::default(), ReportesAction::RefreshData);
        assert!(estado.refreshing);
        assert!(estado.last_refresh.is_some());

        let listo = reduce(&estado, ReportesAction::RefreshComplete);
        assert!(!listo.refreshing);
        assert!(listo.last_update.is_some());
    }

    #[test]
    fn test_set_dashboard_sella_last_update() {
        let estado = reduce(
            &ReportesState::default(),
            ReportesAction::SetDashboardData(Default::default()),
        );
        assert!(estado.dashboard_data.is_some());
        assert!(estado.last_update.is_some());
    }
}
