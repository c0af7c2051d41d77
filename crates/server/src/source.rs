use pinpoints::seed::{self, SeedData};
use std::io;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0} answered with status {1}")]
    Status(String, u16),
    #[error("Seed error: {0}")]
    Seed(#[from] seed::Error),
}

/// Loads the resources and users, each source is either a URL or a local path.
pub async fn load(resources: &str, users: &str) -> Result<SeedData, self::Error> {
    let client = reqwest::Client::new();
    let (resources, users) = tokio::try_join!(fetch(&client, resources), fetch(&client, users))?;
    Ok(SeedData::from_slices(&resources, &users)?)
}

async fn fetch(client: &reqwest::Client, source: &str) -> Result<Vec<u8>, self::Error> {
    if source.starts_with("http://") || source.starts_with("https://") {
        debug!("Fetching {source}...");
        let response = client.get(source).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(
                source.to_string(),
                response.status().as_u16(),
            ));
        }
        Ok(response.bytes().await?.to_vec())
    } else {
        debug!("Reading {source}...");
        Ok(tokio::fs::read(source).await?)
    }
}
