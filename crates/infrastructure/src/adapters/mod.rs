//! Concrete port implementations backed by external crates.

mod interpreter_client;
mod reqwest_client;
mod system_clock;

pub use interpreter_client::InterpreterClient;
pub use reqwest_client::ReqwestHttpClient;
pub use system_clock::SystemClock;
