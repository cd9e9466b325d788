pub mod use_cases;

pub use use_cases::access_gate::AccessGate;
pub use use_cases::form_flow::FormFlow;
