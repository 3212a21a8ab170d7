//! Direct-invocation target (SDK/CLI invoke, no HTTP envelope).

use hello_lambda::handlers::routing::EntryPoint;
use hello_lambda::handlers::runtime::serve;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve(EntryPoint::Direct).await
}
