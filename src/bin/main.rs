use lambda_http::{run, Error};
use lms::core::controller::{AppState, build_router};
use lms::core::domain::Configuration;
use lms::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env()?;
    setup_tracing(config.log_level.as_str());

    if config.dev_mode {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
    }
    tracing::info!(branch = %config.branch_id, store = %config.store, dev_mode = config.dev_mode, "starting library service");

    let state = AppState::build(config).await;
    let app = build_router(state);

    run(app).await
}
