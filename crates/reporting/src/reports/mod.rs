pub mod finanzas_api;

pub use finanzas_api::FinanzasApi;
