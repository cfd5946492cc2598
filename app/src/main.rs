#![windows_subsystem = "windows"]

use tokio::runtime::Builder;
use tracing::{error, info};

use prism::{bootstrap::bootstrap, error::Error, settings::Settings, utils::VERSION, window::Window, App};

fn main() -> Result<(), Error> {
    bootstrap()?;

    info!("Starting Prism v{VERSION}");

    let settings = Settings::from_env().map_err(|err| {
        error!("{err}");
        err
    })?;

    // GPU requests are futures; a single thread is enough to drive them
    let runtime = Builder::new_current_thread().build()?;

    let (window, event_loop) = Window::new(&settings, &runtime).map_err(|err| {
        error!("Initialization failed: {err}");
        err
    })?;

    // Only needed while the GPU context is being created
    drop(runtime);

    let app = App::new(window, settings);
    app.run(event_loop)
}
