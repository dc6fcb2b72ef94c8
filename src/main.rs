//! Illustrative entry point: build the sample frame, print it, run the
//! fixed query, print the result.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> framequery::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input = framequery::dataset::build();
    println!("Input:\n{}", input);

    let result = framequery::query::execute(&input)?;
    println!("Result:\n{}", result);

    Ok(())
}
