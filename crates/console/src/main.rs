use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use storefront_client::{ClientConfig, HttpStorefrontClient};
use storefront_console::{Command, PageFixture, Session, Step};
use storefront_page::PageConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: storefront-console <fixture.json>")?;
    let fixture = PageFixture::load(&path)?;

    let client_config = ClientConfig::from_env()?;
    let page_config = PageConfig::from_env()?;
    tracing::info!(base_url = %client_config.base_url, fixture = %path, "starting console");

    let api = Arc::new(HttpStorefrontClient::new(client_config)?);
    let session = Session::new(fixture.to_document()?, page_config, api)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };
        match session.execute(command).await {
            Ok(Step::Output(text)) => println!("{text}"),
            Ok(Step::Quit) => break,
            Err(e) => {
                tracing::error!(error = %e, "command failed");
                println!("error: {e}");
            }
        }
    }

    Ok(())
}
