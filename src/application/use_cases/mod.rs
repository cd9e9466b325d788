pub mod access_gate;
pub mod form_flow;
