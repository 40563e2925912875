pub mod panel;
pub mod reducer;
pub mod session;
pub mod state;
