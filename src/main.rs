mod config;
mod dynamodb;
mod error;
mod handlers;
mod logging;
mod model;
mod response;
mod router;
mod store;


use lambda_http::{run, service_fn, Error, Request};

use crate::config::Config;
use crate::router::AppState;
use crate::store::LibraryStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_logging()?;
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_from_env().await;
    let store = LibraryStore::new(&sdk_config, &config);
    let state = AppState { store, config };

    run(service_fn(|event: Request| async {
        Ok::<_, Error>(router::handle(&state, event).await)
    }))
    .await
}
