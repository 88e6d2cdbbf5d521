pub mod geografia;
pub mod productos;
pub mod ratios;
pub mod ventas;
