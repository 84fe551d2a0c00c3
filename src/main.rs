mod api;
mod app;
mod audio;
mod config;
mod format;
mod reorder;
mod runtime;
mod session;
mod ui;
mod upload;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    runtime::run()
}
