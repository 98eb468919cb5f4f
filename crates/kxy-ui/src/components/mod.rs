pub mod nav;
pub mod route_gate;
pub mod toast;
