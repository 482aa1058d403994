// Adapters layer: concrete implementations of the domain ports (csv, http, llm).

pub mod csv_source;
pub mod http;
pub mod llm;
