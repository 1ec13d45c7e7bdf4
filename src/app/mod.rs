pub mod app;
pub mod command;
pub mod context;
pub mod printer;

pub use app::App;
pub use command::Command;
pub use context::AppContext;
pub use printer::Printer;
