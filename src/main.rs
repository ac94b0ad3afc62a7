use anyhow::Result;
use nekobox::logging::init_logging;
use nekobox::{run_with_config, Config, Outcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env()?;

    match run_with_config(&config).await? {
        Outcome::Published(_) => println!("Done! The gist was successfully updated!"),
        Outcome::Unsupported(_) => println!("Latest activity type not supported! Exiting..."),
    }

    Ok(())
}
