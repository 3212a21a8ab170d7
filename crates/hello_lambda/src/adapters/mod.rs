pub mod context;
pub mod emf;
