//! Single deployable: routes API Gateway proxy events and direct invocations per event.

use hello_lambda::handlers::routing::EntryPoint;
use hello_lambda::handlers::runtime::serve;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve(EntryPoint::Auto).await
}
