mod api;
mod config;
mod logging;
mod services;

use color_eyre::Result;
use domain::core::Library;

use crate::services::LibraryHandle;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Initialize logging
    logging::init()?;
    tracing::info!("Starting Bookshelf application");

    let data_dir = config::get_data_dir();
    let library = Library::open(&data_dir)?;
    tracing::debug!("Library initialized: {library:#?}");

    let app_state = LibraryHandle::new(library);
    let app = api::create_api(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server running on http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
