use std::sync::Arc;

use reporting::analytics::geografia;
use reporting::api::ApiClient;
use reporting::reports::FinanzasApi;
use reporting::shared::config;
use reporting::shared::format::{format_currency, format_percentage};
use reporting::store::ReportesStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Logs a stdout y a archivo, mismo filtro por RUST_LOG
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("reporting.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = config::load_config()?;
    tracing::info!("Finanzas API: {}", config.api.base_url);

    let transport = Arc::new(ApiClient::new(&config.api));
    let store = ReportesStore::new(FinanzasApi::new(transport));

    tracing::info!(
        "Cargando tablero para el período {}",
        store.filters().descripcion_periodo()
    );
    let outcome = store.refresh_all().await?;

    if !outcome.errores.is_empty() {
        tracing::warn!(
            "Tablero cargado con {} secciones caídas: {}",
            outcome.errores.len(),
            outcome.errores.join(", ")
        );
    }

    let bundle = outcome.bundle;

    println!("== Tablero financiero ==");
    if let Some(resumen) = bundle.resumen.as_ref().and_then(|r| r.data.as_ref()) {
        println!(
            "Ingresos totales:   {}",
            format_currency(Some(resumen.ventas.ingresos_totales))
        );
        println!(
            "Ganancia estimada:  {}",
            format_currency(Some(resumen.ganancias.ganancia_estimada))
        );
        println!("Total ventas:       {}", resumen.ventas.total_ventas);
        println!(
            "Ticket promedio:    {}",
            format_currency(Some(resumen.ventas.ticket_promedio))
        );
        println!(
            "Margen promedio:    {}",
            format_percentage(Some(resumen.ganancias.margen_promedio))
        );
    } else {
        println!("(sin resumen financiero)");
    }

    if let Some(ciudades) = bundle.ciudades.as_ref().and_then(|r| r.data.as_ref()) {
        println!("\nGanancias por provincia:");
        for provincia in geografia::agrupar_por_provincia(ciudades) {
            println!(
                "  {:<24} {:>14}  ({} ciudades, {} clientes)",
                provincia.provincia,
                format_currency(Some(provincia.ganancia_estimada)),
                provincia.ciudades,
                provincia.clientes_unicos
            );
        }
    }

    if let Some(vendedores) = bundle.vendedores.as_ref().and_then(|r| r.data.as_ref()) {
        println!("\nVendedores:");
        for vendedor in reporting::analytics::ventas::detalle_vendedores(vendedores) {
            println!(
                "  {:<24} {:>14}  ({})",
                vendedor.empleado_nombre,
                format_currency(Some(vendedor.total_vendido)),
                format_percentage(Some(vendedor.participacion))
            );
        }
    }

    println!("\nÚltima actualización: {}", store.last_update_formatted());
    Ok(())
}
